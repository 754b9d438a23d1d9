//! Keyword danger scanner
//!
//! Screens raw meal text for substances known to be dangerous to dogs,
//! independent of whether the text matches anything in the catalog.
//!
//! Matching is plain substring containment on the lower-cased text, not
//! whole-word, so "grapefruit" fires the grape warning. This is a known
//! false positive.

/// Dangerous keyword to warning message, scanned in this order
pub const DANGEROUS_KEYWORDS: &[(&str, &str)] = &[
    ("chocolate", "Chocolate (milk, dark, baking) is toxic to dogs."),
    ("cocoa", "Cocoa/chocolate products are toxic to dogs."),
    ("grape", "Grapes and raisins can cause kidney failure in dogs."),
    ("grapes", "Grapes and raisins can cause kidney failure in dogs."),
    ("raisin", "Grapes and raisins can cause kidney failure in dogs."),
    ("raisins", "Grapes and raisins can cause kidney failure in dogs."),
    ("onion", "Onions can damage red blood cells and cause anemia."),
    ("garlic", "Garlic is more potent than onion and is toxic to dogs."),
    ("xylitol", "Xylitol (sweetener) can cause hypoglycemia and liver failure."),
    ("macadamia", "Macadamia nuts can cause weakness and tremors."),
    ("avocado", "Avocado (especially skin/pit) can cause vomiting/diarrhea."),
    ("alcohol", "Alcohol can cause intoxication, coma, and death in dogs."),
    ("beer", "Alcohol (beer, wine, spirits) is dangerous for dogs."),
    ("wine", "Alcohol (beer, wine, spirits) is dangerous for dogs."),
    ("coffee", "Coffee/caffeine can cause heart problems and seizures."),
    ("caffeine", "Caffeine can cause heart problems and seizures."),
    ("espresso", "Caffeine can cause heart problems and seizures."),
    ("yeast dough", "Yeast dough can expand and cause bloat and alcohol poisoning."),
    ("cooked bones", "Cooked bones can splinter and puncture the gut."),
    ("chicken bones", "Cooked bones can splinter and puncture the gut."),
];

/// Return the warnings for every dangerous keyword found in `text`.
///
/// Warnings keep table order with duplicates removed.
pub fn scan_dangerous_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut hits: Vec<String> = Vec::new();

    for (keyword, warning) in DANGEROUS_KEYWORDS {
        if lower.contains(keyword) && !hits.iter().any(|h| h == warning) {
            hits.push((*warning).to_string());
        }
    }

    if !hits.is_empty() {
        tracing::debug!(hits = hits.len(), "dangerous keywords found");
    }

    hits
}
