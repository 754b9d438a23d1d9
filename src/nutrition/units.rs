//! Unit vocabulary and conversion constants
//!
//! Provides the unit words the quantity extractor recognizes, the synonym
//! table that collapses them to canonical symbols, and the factors used when
//! rescaling into a catalog entry's reference unit.

// ============================================================================
// Conversion Constants
// ============================================================================

/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per ounce
pub const G_PER_OZ: f64 = 28.3495;
/// Tablespoons per cup (US)
pub const TBSP_PER_CUP: f64 = 16.0;
/// Teaspoons per cup (US)
pub const TSP_PER_CUP: f64 = 48.0;

// ============================================================================
// Unit Recognition
// ============================================================================

/// Unit words recognized directly after a quantity, in regex alternation order.
///
/// Longer spellings come before their prefixes so that "grams" is never read
/// as "g" followed by leftover text.
pub const UNIT_WORDS: &[&str] = &[
    "kg",
    "grams",
    "gram",
    "g",
    "cups",
    "cup",
    "tablespoons",
    "tablespoon",
    "tbsp",
    "teaspoons",
    "teaspoon",
    "tsp",
    "ounces",
    "ounce",
    "oz",
    "pieces",
    "piece",
    "slices",
    "slice",
    "eggs",
    "egg",
    "cans",
    "can",
    "biscuits",
    "biscuit",
    "sticks",
    "stick",
    "bananas",
    "banana",
    "potatoes",
    "potato",
    "carrots",
    "carrot",
];

/// Plural and synonym spellings mapped to their canonical symbol
const UNIT_SYNONYMS: &[(&str, &str)] = &[
    ("gram", "g"),
    ("grams", "g"),
    ("ounce", "oz"),
    ("ounces", "oz"),
    ("tablespoon", "tbsp"),
    ("tablespoons", "tbsp"),
    ("teaspoon", "tsp"),
    ("teaspoons", "tsp"),
    ("cups", "cup"),
    ("pieces", "piece"),
    ("slices", "slice"),
    ("eggs", "egg"),
    ("cans", "can"),
    ("biscuits", "biscuit"),
    ("sticks", "stick"),
    ("bananas", "banana"),
    ("potatoes", "potato"),
    ("carrots", "carrot"),
];

/// Reference units that already denote a single item, so a typed quantity is
/// taken as a raw count whatever unit the user wrote.
pub const COUNT_REFERENCE_UNITS: &[&str] = &[
    "slice",
    "biscuit",
    "stick",
    "large egg",
    "medium banana",
    "medium potato",
    "medium carrot",
    "medium peach",
    "medium pear",
];

/// Collapse a unit token to its canonical symbol.
///
/// Unknown tokens pass through lower-cased; blank or absent input yields `None`.
pub fn canonicalize_unit(unit: Option<&str>) -> Option<String> {
    let lower = unit?.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    let canonical = UNIT_SYNONYMS
        .iter()
        .find(|(variant, _)| *variant == lower)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or(lower);

    Some(canonical)
}

/// Whether a catalog reference unit is a per-item count
pub fn is_count_unit(reference_unit: &str) -> bool {
    let lower = reference_unit.trim().to_lowercase();
    COUNT_REFERENCE_UNITS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_synonyms() {
        assert_eq!(canonicalize_unit(Some("gram")).as_deref(), Some("g"));
        assert_eq!(canonicalize_unit(Some("Grams")).as_deref(), Some("g"));
        assert_eq!(canonicalize_unit(Some("ounces")).as_deref(), Some("oz"));
        assert_eq!(canonicalize_unit(Some("tablespoon")).as_deref(), Some("tbsp"));
        assert_eq!(canonicalize_unit(Some("teaspoon")).as_deref(), Some("tsp"));
        assert_eq!(canonicalize_unit(Some("CUPS")).as_deref(), Some("cup"));
        assert_eq!(canonicalize_unit(Some("potatoes")).as_deref(), Some("potato"));
    }

    #[test]
    fn test_canonicalize_passthrough() {
        assert_eq!(canonicalize_unit(Some("kg")).as_deref(), Some("kg"));
        assert_eq!(canonicalize_unit(Some("Scoop")).as_deref(), Some("scoop"));
        assert_eq!(canonicalize_unit(None), None);
        assert_eq!(canonicalize_unit(Some("   ")), None);
    }

    #[test]
    fn test_canonicalize_idempotent() {
        let mut samples: Vec<&str> = UNIT_WORDS.to_vec();
        samples.extend(["Scoop", "fillet (3oz)", "TBSP", "Large Egg"]);

        for unit in samples {
            let once = canonicalize_unit(Some(unit));
            let twice = canonicalize_unit(once.as_deref());
            assert_eq!(once, twice, "canonicalize not idempotent for {unit:?}");
        }
    }

    #[test]
    fn test_every_unit_word_is_canonicalizable() {
        for unit in UNIT_WORDS {
            let canonical = canonicalize_unit(Some(unit)).unwrap();
            assert!(!canonical.is_empty());
            assert!(!canonical.ends_with('s'), "{unit} -> {canonical}");
        }
    }

    #[test]
    fn test_is_count_unit() {
        assert!(is_count_unit("slice"));
        assert!(is_count_unit("Large Egg"));
        assert!(is_count_unit("medium banana"));
        assert!(!is_count_unit("cup"));
        assert!(!is_count_unit("fillet (3oz)"));
    }
}
