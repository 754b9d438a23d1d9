//! Free-text meal estimation
//!
//! Splits text like "1 cup boiled chicken breast + 1 tbsp peanut butter,
//! 1/2 cup white rice" into fragments and runs each one through extraction,
//! matching and unit conversion against the catalog.
//!
//! Nothing here fails as a whole: unmatched fragments, malformed numbers,
//! unconvertible units and toxic foods all end up as data in the report.

use serde::Serialize;

use crate::catalog::Catalog;

use super::converter::convert_quantity;
use super::extractor::parse_fragment;
use super::matcher::{FoodMatcher, MatchKind};
use super::similarity::{SequenceRatio, SimilarityScorer};

/// Characters that separate food items in free text
const FRAGMENT_SEPARATORS: &[char] = &['+', ','];

/// One fragment resolved to a catalog food
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedItem {
    /// Fragment as typed
    pub name_input: String,
    pub quantity_typed: f64,
    /// Unit used for conversion (typed, or the reference unit if none)
    pub unit_typed: String,
    pub name_matched: String,
    #[serde(rename = "match")]
    pub match_kind: MatchKind,
    /// Quantity in the catalog's reference unit
    pub quantity_ref_units: f64,
    pub reference_unit: String,
    pub calories: f64,
    pub toxic: bool,
}

/// Outcome of estimating a whole meal
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EstimationReport {
    pub items: Vec<MatchedItem>,
    /// Sum over all matched items, toxic ones included
    pub total_calories: f64,
    /// Toxicity warnings, first occurrence order, no duplicates
    pub toxicity: Vec<String>,
    /// Advisory notes from unit conversion, no duplicates
    pub messages: Vec<String>,
    /// Fragments that matched nothing
    pub unmatched: Vec<String>,
}

impl EstimationReport {
    pub fn has_toxicity(&self) -> bool {
        !self.toxicity.is_empty()
    }

    /// Nothing matched but there was something to match
    pub fn is_unestimable(&self) -> bool {
        self.items.is_empty() && !self.unmatched.is_empty()
    }

    fn push_unique(list: &mut Vec<String>, value: String) {
        if !list.contains(&value) {
            list.push(value);
        }
    }
}

/// Split meal text on '+' and ',' dropping blank pieces
pub fn split_fragments(text: &str) -> Vec<&str> {
    text.split(FRAGMENT_SEPARATORS)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
}

/// Estimates meals against a borrowed catalog
pub struct MealEstimator<'c, S = SequenceRatio> {
    catalog: &'c Catalog,
    matcher: FoodMatcher<S>,
}

impl<'c> MealEstimator<'c, SequenceRatio> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self::with_matcher(catalog, FoodMatcher::new())
    }
}

impl<'c, S: SimilarityScorer> MealEstimator<'c, S> {
    pub fn with_matcher(catalog: &'c Catalog, matcher: FoodMatcher<S>) -> Self {
        Self { catalog, matcher }
    }

    pub fn estimate(&self, text: &str) -> EstimationReport {
        let mut report = EstimationReport::default();
        let names = self.catalog.names();

        for fragment in split_fragments(text) {
            let parsed = match parse_fragment(fragment) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!(fragment, error = %e, "treating fragment as unmatched");
                    report.unmatched.push(fragment.to_string());
                    continue;
                }
            };

            let Some(found) = self.matcher.best_match(&parsed.name_guess, &names) else {
                let label = if parsed.name_guess.is_empty() {
                    parsed.raw
                } else {
                    parsed.name_guess
                };
                report.unmatched.push(label);
                continue;
            };

            let Some(entry) = self.catalog.get(found.name) else {
                report.unmatched.push(parsed.raw);
                continue;
            };

            if entry.toxic {
                EstimationReport::push_unique(&mut report.toxicity, entry.warning_text());
            }

            let unit_typed = parsed.unit.unwrap_or_else(|| entry.unit.clone());
            let conversion = convert_quantity(parsed.quantity, Some(&unit_typed), &entry.unit);
            let calories = entry.calories * conversion.quantity;

            for note in conversion.notes {
                EstimationReport::push_unique(&mut report.messages, note);
            }

            tracing::debug!(
                input = %parsed.raw,
                matched = %entry.name,
                calories,
                "fragment matched"
            );

            report.total_calories += calories;
            report.items.push(MatchedItem {
                name_input: parsed.raw,
                quantity_typed: parsed.quantity,
                unit_typed,
                name_matched: entry.name.clone(),
                match_kind: found.kind,
                quantity_ref_units: conversion.quantity,
                reference_unit: entry.unit.clone(),
                calories,
                toxic: entry.toxic,
            });
        }

        report
    }
}

/// Estimate a meal with the default matcher
pub fn estimate_meal(text: &str, catalog: &Catalog) -> EstimationReport {
    MealEstimator::new(catalog).estimate(text)
}
