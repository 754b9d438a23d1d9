//! Meal text parsing and calorie estimation
//!
//! Handles quantity extraction, unit conversion, food matching and the
//! dangerous-keyword scan.

pub mod converter;
pub mod danger;
pub mod estimator;
pub mod extractor;
pub mod matcher;
pub mod similarity;
pub mod units;

pub use converter::{convert_quantity, Conversion};
pub use danger::{scan_dangerous_keywords, DANGEROUS_KEYWORDS};
pub use estimator::{estimate_meal, split_fragments, EstimationReport, MatchedItem, MealEstimator};
pub use extractor::{
    extract_quantity, parse_fragment, parse_mixed_number, Extraction, ParsedFragment,
    QuantityError,
};
pub use matcher::{best_food_match, FoodMatch, FoodMatcher, MatchKind, DEFAULT_MATCH_THRESHOLD};
pub use similarity::{sequence_ratio, NormalizedLevenshtein, SequenceRatio, SimilarityScorer};
pub use units::{canonicalize_unit, is_count_unit};
