//! Quantity and unit extraction from meal fragments
//!
//! Finds the first numeric quantity in a fragment (integer, decimal, simple
//! fraction or mixed number), an optional unit word right after it, and the
//! leftover text that names the food.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use super::units::{canonicalize_unit, UNIT_WORDS};

/// Quantity assumed when a fragment has no numeric token
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// Errors raised while reading a numeric token
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantityError {
    #[error("Fraction '{literal}' has a zero denominator")]
    ZeroDenominator { literal: String },

    #[error("Invalid number '{literal}'")]
    InvalidNumber { literal: String },
}

// Mixed numbers and fractions come first so "1 1/2" and "1/2" are read
// whole instead of stopping at the leading integer. Digits are ASCII only,
// the set `f64` parsing accepts.
static QUANTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    let units = UNIT_WORDS.join("|");
    Regex::new(&format!(
        r"(?i)(?P<num>[0-9]+\s+[0-9]+/[0-9]+|[0-9]+/[0-9]+|[0-9]+(?:\.[0-9]+)?|\.[0-9]+)\s*(?:(?P<unit>{units})\b)?"
    ))
    .expect("valid quantity regex")
});

static FILLER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:of|and|with|the|a)\b").expect("valid filler regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Raw extraction result, with the unit token exactly as typed
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub quantity: f64,
    pub unit: Option<String>,
    pub name_guess: String,
}

/// A fragment after extraction and unit canonicalization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedFragment {
    /// Trimmed fragment text
    pub raw: String,
    pub quantity: f64,
    /// Canonical unit symbol, if one was typed
    pub unit: Option<String>,
    /// Text left after removing the quantity, unit and filler words
    pub name_guess: String,
}

/// Parse a numeric literal: "A B/C", "B/C", "1.5" or ".5"
pub fn parse_mixed_number(literal: &str) -> Result<f64, QuantityError> {
    let trimmed = literal.trim();
    let invalid = || QuantityError::InvalidNumber {
        literal: trimmed.to_string(),
    };

    let (whole, fraction) = match trimmed.split_once(char::is_whitespace) {
        Some((whole, rest)) if rest.contains('/') => (Some(whole), rest.trim()),
        _ => (None, trimmed),
    };

    let value = match fraction.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().map_err(|_| invalid())?;
            let den: f64 = den.trim().parse().map_err(|_| invalid())?;
            if den == 0.0 {
                return Err(QuantityError::ZeroDenominator {
                    literal: trimmed.to_string(),
                });
            }
            num / den
        }
        None => fraction.parse().map_err(|_| invalid())?,
    };

    let whole: f64 = match whole {
        Some(w) => w.parse().map_err(|_| invalid())?,
        None => 0.0,
    };

    let total = whole + value;
    if !total.is_finite() {
        return Err(invalid());
    }
    Ok(total)
}

/// Strip filler words and collapse whitespace
fn clean_name(text: &str) -> String {
    let without_filler = FILLER_RE.replace_all(text, " ");
    WHITESPACE_RE
        .replace_all(&without_filler, " ")
        .trim()
        .to_string()
}

/// Extract quantity, unit token and name guess from a fragment.
///
/// A fragment without any number yields the default quantity, no unit, and
/// the whole trimmed fragment as the name.
pub fn extract_quantity(fragment: &str) -> Result<Extraction, QuantityError> {
    let text = fragment.trim();

    let Some(caps) = QUANTITY_RE.captures(text) else {
        return Ok(Extraction {
            quantity: DEFAULT_QUANTITY,
            unit: None,
            name_guess: text.to_string(),
        });
    };

    // Group 0 always participates in a match
    let span = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
    let quantity = parse_mixed_number(&caps["num"])?;
    let unit = caps.name("unit").map(|m| m.as_str().to_string());

    let residual = format!("{} {}", &text[..span.start], &text[span.end..]);

    Ok(Extraction {
        quantity,
        unit,
        name_guess: clean_name(&residual),
    })
}

/// Extract a fragment and canonicalize its unit
pub fn parse_fragment(fragment: &str) -> Result<ParsedFragment, QuantityError> {
    let extraction = extract_quantity(fragment)?;
    Ok(ParsedFragment {
        raw: fragment.trim().to_string(),
        quantity: extraction.quantity,
        unit: canonicalize_unit(extraction.unit.as_deref()),
        name_guess: extraction.name_guess,
    })
}
