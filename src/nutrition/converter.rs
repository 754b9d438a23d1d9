//! Unit conversion into catalog reference units
//!
//! Rescales a typed quantity into the unit a catalog entry's calories are
//! defined in. Only a handful of factor pairs are known; anything else is
//! passed through with an advisory note.

use serde::Serialize;

use super::units::{is_count_unit, G_PER_KG, G_PER_OZ, TBSP_PER_CUP, TSP_PER_CUP};

/// Result of converting a quantity into reference units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    /// Quantity expressed in the reference unit
    pub quantity: f64,
    /// Advisory notes describing approximations made
    pub notes: Vec<String>,
}

impl Conversion {
    fn exact(quantity: f64) -> Self {
        Self {
            quantity,
            notes: Vec::new(),
        }
    }
}

/// Multiplier from `source` into `reference`, if the pair is known
fn conversion_factor(source: &str, reference: &str) -> Option<f64> {
    match (reference, source) {
        ("g", "kg") => Some(G_PER_KG),
        ("g", "oz") => Some(G_PER_OZ),
        ("cup", "tbsp") => Some(1.0 / TBSP_PER_CUP),
        ("cup", "tsp") => Some(1.0 / TSP_PER_CUP),
        _ => None,
    }
}

/// Whether one unit string contains the other ignoring case, so "cup" lines
/// up with a reference unit of "1/2 cup"
fn units_align(source: &str, reference: &str) -> bool {
    let source = source.to_lowercase();
    let reference = reference.to_lowercase();
    reference.contains(&source) || source.contains(&reference)
}

/// Convert `quantity` in `typed_unit` into `reference_unit`.
///
/// When no unit was typed the quantity is assumed to already be in reference
/// units. Never fails: an unknown pair keeps the quantity and adds a note.
pub fn convert_quantity(quantity: f64, typed_unit: Option<&str>, reference_unit: &str) -> Conversion {
    let source = typed_unit.unwrap_or(reference_unit);

    if source == reference_unit {
        return Conversion::exact(quantity);
    }

    // Known factors take precedence over containment: "kg" contains "g".
    if let Some(factor) = conversion_factor(source, reference_unit) {
        return Conversion::exact(quantity * factor);
    }

    if units_align(source, reference_unit) {
        return Conversion::exact(quantity);
    }

    if is_count_unit(reference_unit) {
        return Conversion::exact(quantity);
    }

    tracing::debug!(
        "Unit conversion fallback: '{}' vs '{}'. Using {} as-is.",
        source,
        reference_unit,
        quantity
    );

    Conversion {
        quantity,
        notes: vec![format!(
            "Couldn't reliably convert from '{}' to '{}'. Using quantity as {} {}(s).",
            source, reference_unit, quantity, reference_unit
        )],
    }
}
