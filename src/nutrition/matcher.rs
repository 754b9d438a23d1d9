//! Food name matching
//!
//! Resolves a free-text name guess to a catalog name. Resolution order:
//! exact (ignoring case; the last catalog name wins when two differ only in
//! case), then containment either way (first catalog name in catalog order
//! wins), then the best similarity score at or above the threshold (the
//! lexicographically greatest name wins a tie).

use serde::Serialize;

use super::similarity::{SequenceRatio, SimilarityScorer};

/// Minimum similarity ratio accepted for an approximate match
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.6;

/// How a catalog name was reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Containment,
    Fuzzy { score: f64 },
}

/// A resolved catalog name
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodMatch<'a> {
    pub name: &'a str,
    pub kind: MatchKind,
}

/// Matches name guesses against catalog names
#[derive(Debug, Clone)]
pub struct FoodMatcher<S = SequenceRatio> {
    scorer: S,
    threshold: f64,
}

impl FoodMatcher<SequenceRatio> {
    pub fn new() -> Self {
        Self::with_scorer(SequenceRatio)
    }
}

impl Default for FoodMatcher<SequenceRatio> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SimilarityScorer> FoodMatcher<S> {
    pub fn with_scorer(scorer: S) -> Self {
        Self {
            scorer,
            threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Resolve `guess` against `names`, which must be in catalog order.
    ///
    /// A blank guess never matches.
    pub fn best_match<'a>(&self, guess: &str, names: &[&'a str]) -> Option<FoodMatch<'a>> {
        let needle = guess.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        if let Some(name) = names.iter().copied().rev().find(|n| n.to_lowercase() == needle) {
            return Some(FoodMatch {
                name,
                kind: MatchKind::Exact,
            });
        }

        if let Some(name) = names.iter().copied().find(|n| {
            let hay = n.to_lowercase();
            hay.contains(&needle) || needle.contains(&hay)
        }) {
            return Some(FoodMatch {
                name,
                kind: MatchKind::Containment,
            });
        }

        // Approximate step compares the original casing, catalog name first
        let mut best: Option<(&'a str, f64)> = None;
        for &name in names {
            let score = self.scorer.ratio(name, guess);
            if score < self.threshold {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_name, best_score)) => {
                    score > best_score || (score == best_score && name > best_name)
                }
            };
            if better {
                best = Some((name, score));
            }
        }

        best.map(|(name, score)| FoodMatch {
            name,
            kind: MatchKind::Fuzzy { score },
        })
    }
}

/// Resolve `guess` with the default matcher
pub fn best_food_match<'a>(guess: &str, names: &[&'a str]) -> Option<&'a str> {
    FoodMatcher::new().best_match(guess, names).map(|m| m.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::nutrition::similarity::NormalizedLevenshtein;

    const NAMES: &[&str] = &[
        "Banana Chips",
        "Banana",
        "Boiled Chicken Breast",
        "White Rice (Cooked)",
        "Brown Rice (Cooked)",
        "Broccoli (Steamed)",
        "Celery",
    ];

    #[test]
    fn test_exact_wins_over_containment() {
        // "Banana Chips" comes first and contains "banana", but exact wins
        let m = FoodMatcher::new().best_match("banana", NAMES).unwrap();
        assert_eq!(m.name, "Banana");
        assert_eq!(m.kind, MatchKind::Exact);
    }

    #[test]
    fn test_exact_ignores_case_and_padding() {
        assert_eq!(best_food_match("  BOILED chicken breast ", NAMES), Some("Boiled Chicken Breast"));
    }

    #[test]
    fn test_containment_uses_catalog_order() {
        // Both rice entries contain "rice"; the first in catalog order wins
        let m = FoodMatcher::new().best_match("rice", NAMES).unwrap();
        assert_eq!(m.name, "White Rice (Cooked)");
        assert_eq!(m.kind, MatchKind::Containment);
    }

    #[test]
    fn test_containment_both_directions() {
        assert_eq!(best_food_match("white rice", NAMES), Some("White Rice (Cooked)"));
        assert_eq!(best_food_match("chopped celery sticks", NAMES), Some("Celery"));
    }

    #[test]
    fn test_fuzzy_match() {
        let m = FoodMatcher::new().best_match("Celary", NAMES).unwrap();
        assert_eq!(m.name, "Celery");
        match m.kind {
            MatchKind::Fuzzy { score } => assert!(score >= DEFAULT_MATCH_THRESHOLD),
            other => panic!("expected fuzzy match, got {other:?}"),
        }
    }

    #[test]
    fn test_fuzzy_is_case_sensitive() {
        // Lower-case typo scores below the threshold against "Celery"
        let names = &["Celery", "Kibble"];
        assert_eq!(best_food_match("CELARY", names), None);
    }

    #[test]
    fn test_exact_last_case_variant_wins() {
        let names = &["Peanut Butter", "peanut butter", "Kibble"];
        assert_eq!(best_food_match("PEANUT BUTTER", names), Some("peanut butter"));
    }

    #[test]
    fn test_fuzzy_scores_catalog_name_against_guess() {
        let catalog = Catalog::builtin().unwrap();
        let names = catalog.names();
        assert_eq!(best_food_match("Aolzohl", &names), Some("Alcohol"));
        assert_eq!(best_food_match("Alclhivl", &names), Some("Alcohol"));
        assert_eq!(best_food_match("Ozinain", &names), Some("Onion"));
        assert_eq!(best_food_match("Bnua", &names), None);
        assert_eq!(best_food_match("Oiiyn", &names), None);
    }

    #[test]
    fn test_fuzzy_tie_goes_to_greatest_name() {
        // Blueberries and Raspberries both score 0.7
        let catalog = Catalog::builtin().unwrap();
        let names = catalog.names();
        let m = FoodMatcher::new().best_match("lsvberris", &names).unwrap();
        assert_eq!(m.name, "Raspberries");
        assert_eq!(m.kind, MatchKind::Fuzzy { score: 0.7 });

        let reordered = &["Raspberries", "Blueberries"];
        assert_eq!(best_food_match("lsvberris", reordered), Some("Raspberries"));
    }

    #[test]
    fn test_below_threshold_is_none() {
        assert_eq!(best_food_match("xyzzy completely unrelated", NAMES), None);
    }

    #[test]
    fn test_blank_guess_is_none() {
        assert_eq!(best_food_match("", NAMES), None);
        assert_eq!(best_food_match("   ", NAMES), None);
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(best_food_match("banana", &[]), None);
    }

    #[test]
    fn test_threshold_and_scorer_are_configurable() {
        let strict = FoodMatcher::new().with_threshold(0.95);
        assert!(strict.best_match("Celary", NAMES).is_none());

        let lev = FoodMatcher::with_scorer(NormalizedLevenshtein);
        assert_eq!(lev.threshold(), DEFAULT_MATCH_THRESHOLD);
        assert_eq!(lev.best_match("Celary", NAMES).map(|m| m.name), Some("Celery"));
    }
}
