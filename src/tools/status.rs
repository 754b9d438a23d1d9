//! PawPal Status Tool
//!
//! Provides runtime status information about the PawPal service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::catalog::Catalog;

/// Meal logging instructions for AI assistants
pub const MEAL_INSTRUCTIONS: &str = r#"
# PawPal Meal Logging Instructions

PawPal tracks what a dog eats against a daily calorie goal and refuses to log
anything known to be toxic to dogs.

## Free-text meals

Use `log_typed_meal` (or `estimate_meal` to preview without logging) with text
like:

    1 cup boiled chicken breast + 1 tbsp peanut butter, 1/2 cup white rice

- Separate items with `+` or `,`
- Quantities may be integers (`2`), decimals (`1.5`, `.5`), fractions (`1/2`)
  or mixed numbers (`1 1/2`)
- A unit word goes right after the number: g, kg, oz, cup, tbsp, tsp, slice,
  piece, egg, can, biscuit, stick, banana, potato, carrot
- Without a number the quantity is 1 in the food's own reference unit
- Filler words (of, and, with, the, a) are ignored

Food names are matched against the catalog: exact name first, then names that
contain (or are contained in) the typed text, then the closest spelling.

## Safety checks

Every typed meal goes through two checks before anything is logged:

1. **Dangerous keywords** - grapes, raisins, chocolate, xylitol, onion, garlic,
   macadamia and similar words block the meal even if the food is not in the
   catalog. Note this is a plain substring check, so "grapefruit" is flagged.
2. **Toxic catalog foods** - a matched food marked toxic blocks the meal.

A blocked meal is never partially logged. Tell the user which item caused it.

## Unit conversions

Only kg/oz to grams and tbsp/tsp to cups are converted. Count units (piece,
slice, egg...) line up with count reference units like "medium banana". For
anything else the quantity is taken as-is in the food's reference unit and the
report includes a note; pass that note on to the user.

## Catalog foods

- `list_food_categories` then `list_foods` with a category to browse
- `get_food` to look up one food (typos are tolerated)
- `log_food` to log a catalog food directly with a quantity in its reference
  unit; toxic foods are refused

## Daily goal

The goal is the Maintenance Energy Requirement:

    MER = 70 * weight_kg^0.75 * activity factor

Activity factors: neutered 1.6, intact 1.8, inactive 1.2, weight_loss 1.0,
working 2.0, puppy 3.0. Use `get_profile` / `update_profile` to read or change
weight, breed, name and activity level.

`daily_summary` shows consumed, goal, remaining and a status band:
green up to 90% of the goal, orange up to 100%, red above.

## Dates

Dates are ISO format YYYY-MM-DD. When omitted, today's local date is used.

## Vet questions

`ask_vet` forwards a nutrition question to an AI assistant with the dog's
profile as context. It is not a veterinarian: for emergencies or serious
symptoms always tell the user to contact a vet immediately.
"#;

/// Runtime status of the PawPal service
#[derive(Debug, Clone, Serialize)]
pub struct PawPalStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Catalog information
    pub catalog_source: String,
    pub catalog_foods: usize,
    pub catalog_toxic_foods: usize,
    pub catalog_categories: usize,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    catalog_source: String,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(catalog_source: impl Into<String>) -> Self {
        Self {
            start_time: Instant::now(),
            catalog_source: catalog_source.into(),
        }
    }

    /// Get the current status
    pub fn get_status(&self, catalog: &Catalog) -> PawPalStatus {
        let build_info = BuildInfo::current();

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        PawPalStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            catalog_source: self.catalog_source.clone(),
            catalog_foods: catalog.len(),
            catalog_toxic_foods: catalog.entries().iter().filter(|e| e.toxic).count(),
            catalog_categories: catalog.categories().len(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
