//! Meal MCP Tools
//!
//! Danger scan, estimation and logging of meals. Logging goes through two
//! gates: the dangerous-keyword scan over the raw text, then the toxicity of
//! the matched catalog foods. A blocked meal logs nothing.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::models::{FoodLog, FoodLogEntry};
use crate::nutrition::{scan_dangerous_keywords, EstimationReport, FoodMatcher, MealEstimator};

/// Response for scan_dangerous_foods
#[derive(Debug, Serialize)]
pub struct DangerScanResponse {
    pub dangerous: bool,
    pub warnings: Vec<String>,
}

/// Response for estimate_meal
#[derive(Debug, Serialize)]
pub struct EstimateMealResponse {
    /// Dangerous-keyword hits over the raw text
    pub danger_warnings: Vec<String>,
    /// Whether log_typed_meal would accept this text
    pub safe_to_log: bool,
    /// Total rounded to whole kcal
    pub total_calories_rounded: i64,
    pub report: EstimationReport,
}

/// Outcome of log_typed_meal
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LogTypedMealOutcome {
    /// The text mentions a dangerous food; nothing was estimated or logged
    BlockedDangerous { warnings: Vec<String> },
    /// A matched catalog food is toxic; nothing was logged
    BlockedToxic { report: EstimationReport },
    /// No fragment matched the catalog
    Unmatched { unmatched: Vec<String> },
    Logged {
        entries: Vec<FoodLogEntry>,
        total_calories: i64,
        messages: Vec<String>,
        unmatched: Vec<String>,
    },
}

impl LogTypedMealOutcome {
    pub fn is_logged(&self) -> bool {
        matches!(self, LogTypedMealOutcome::Logged { .. })
    }
}

/// Response for log_food
#[derive(Debug, Serialize)]
pub struct LogFoodResponse {
    pub entry: FoodLogEntry,
    pub calories_per_unit: f64,
    pub unit: String,
}

fn require_text(text: &str) -> Result<&str, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("Meal text cannot be empty. Enter at least one item.".to_string());
    }
    Ok(trimmed)
}

/// Scan text for dangerous food keywords
pub fn scan_dangerous_foods(text: &str) -> DangerScanResponse {
    let warnings = scan_dangerous_keywords(text);
    DangerScanResponse {
        dangerous: !warnings.is_empty(),
        warnings,
    }
}

/// Estimate a typed meal without logging it
pub fn estimate_meal(catalog: &Catalog, text: &str) -> Result<EstimateMealResponse, String> {
    let text = require_text(text)?;

    let danger_warnings = scan_dangerous_keywords(text);
    let report = MealEstimator::new(catalog).estimate(text);
    let safe_to_log = danger_warnings.is_empty() && !report.has_toxicity() && !report.items.is_empty();

    Ok(EstimateMealResponse {
        danger_warnings,
        safe_to_log,
        total_calories_rounded: report.total_calories.round() as i64,
        report,
    })
}

/// Estimate a typed meal and log every matched item if it passes both gates
pub fn log_typed_meal(
    catalog: &Catalog,
    log: &mut FoodLog,
    text: &str,
    now: NaiveDateTime,
) -> Result<LogTypedMealOutcome, String> {
    let text = require_text(text)?;

    let warnings = scan_dangerous_keywords(text);
    if !warnings.is_empty() {
        tracing::warn!(hits = warnings.len(), "typed meal blocked by dangerous keywords");
        return Ok(LogTypedMealOutcome::BlockedDangerous { warnings });
    }

    let report = MealEstimator::new(catalog).estimate(text);

    if report.has_toxicity() {
        tracing::warn!(warnings = ?report.toxicity, "typed meal blocked by toxic catalog food");
        return Ok(LogTypedMealOutcome::BlockedToxic { report });
    }

    if report.items.is_empty() {
        return Ok(LogTypedMealOutcome::Unmatched {
            unmatched: report.unmatched,
        });
    }

    let entries: Vec<FoodLogEntry> = report
        .items
        .iter()
        .map(|item| FoodLogEntry {
            date: now.date(),
            time: now.time(),
            food: item.name_matched.clone(),
            quantity: format!("{:.2} {}", item.quantity_ref_units, item.reference_unit),
            calories: item.calories.round() as i64,
        })
        .collect();

    for entry in &entries {
        log.push(entry.clone());
    }

    let total_calories = report.total_calories.round() as i64;
    tracing::info!(items = entries.len(), total_calories, "typed meal logged");

    Ok(LogTypedMealOutcome::Logged {
        entries,
        total_calories,
        messages: report.messages,
        unmatched: report.unmatched,
    })
}

/// Log a catalog food by name with a quantity in its reference unit
pub fn log_catalog_food(
    catalog: &Catalog,
    log: &mut FoodLog,
    name: &str,
    quantity: f64,
    now: NaiveDateTime,
) -> Result<LogFoodResponse, String> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err("quantity must be greater than 0".to_string());
    }

    let names = catalog.names();
    let entry = FoodMatcher::new()
        .best_match(name, &names)
        .and_then(|m| catalog.get(m.name))
        .ok_or_else(|| format!("Food not found in catalog: {}", name.trim()))?;

    if entry.toxic {
        return Err(format!(
            "{} cannot be logged because it is toxic: {}",
            entry.name,
            entry.warning_text()
        ));
    }

    let logged = FoodLogEntry {
        date: now.date(),
        time: now.time(),
        food: entry.name.clone(),
        quantity: format!("{} {}", quantity, entry.unit),
        calories: (entry.calories * quantity).trunc() as i64,
    };
    log.push(logged.clone());

    tracing::info!(food = %entry.name, calories = logged.calories, "catalog food logged");

    Ok(LogFoodResponse {
        entry: logged,
        calories_per_unit: entry.calories,
        unit: entry.unit.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 4)
            .unwrap()
            .and_hms_opt(18, 45, 0)
            .unwrap()
    }

    #[test]
    fn test_scan_dangerous_foods() {
        let response = scan_dangerous_foods("a few grapes and some chocolate");
        assert!(response.dangerous);
        assert_eq!(response.warnings.len(), 2);

        assert!(!scan_dangerous_foods("plain rice").dangerous);
    }

    #[test]
    fn test_estimate_meal_preview() {
        let catalog = Catalog::builtin().unwrap();
        let response = estimate_meal(
            &catalog,
            "1 cup boiled chicken breast + 1 tbsp peanut butter, 1/2 cup white rice",
        )
        .unwrap();
        assert!(response.safe_to_log);
        assert_eq!(response.total_calories_rounded, 360);
        assert!(response.danger_warnings.is_empty());
    }

    #[test]
    fn test_estimate_meal_flags_danger_but_still_estimates() {
        let catalog = Catalog::builtin().unwrap();
        let response = estimate_meal(&catalog, "1 cup white rice + garlic").unwrap();
        assert!(!response.safe_to_log);
        assert!(!response.danger_warnings.is_empty());
        assert!(response.report.has_toxicity());
    }

    #[test]
    fn test_empty_text_is_error() {
        let catalog = Catalog::builtin().unwrap();
        let mut log = FoodLog::new();
        assert!(estimate_meal(&catalog, "   ").is_err());
        assert!(log_typed_meal(&catalog, &mut log, "", now()).is_err());
    }

    #[test]
    fn test_log_typed_meal_logs_each_item() {
        let catalog = Catalog::builtin().unwrap();
        let mut log = FoodLog::new();
        let outcome = log_typed_meal(
            &catalog,
            &mut log,
            "1 cup boiled chicken breast + 1/2 cup white rice",
            now(),
        )
        .unwrap();

        match outcome {
            LogTypedMealOutcome::Logged {
                entries,
                total_calories,
                ..
            } => {
                assert_eq!(entries.len(), 2);
                assert_eq!(total_calories, 265);
                assert_eq!(entries[1].quantity, "0.50 cup");
                assert_eq!(entries[1].calories, 100);
            }
            other => panic!("expected logged, got {other:?}"),
        }
        assert_eq!(log.len(), 2);
        assert_eq!(log.consumed_on(now().date()), 265);
    }

    #[test]
    fn test_log_typed_meal_blocked_by_keyword() {
        let catalog = Catalog::builtin().unwrap();
        let mut log = FoodLog::new();
        let outcome = log_typed_meal(&catalog, &mut log, "1 cup rice + 3 grapes", now()).unwrap();
        assert!(matches!(outcome, LogTypedMealOutcome::BlockedDangerous { ref warnings } if warnings.len() == 1));
        assert!(log.is_empty());
    }

    #[test]
    fn test_log_typed_meal_blocked_by_toxic_match() {
        let catalog = Catalog::builtin().unwrap();
        let mut log = FoodLog::new();
        // A misspelling slips past the keyword scan but still matches "Garlic"
        let outcome = log_typed_meal(&catalog, &mut log, "1 cup white rice, garlik", now()).unwrap();
        match outcome {
            LogTypedMealOutcome::BlockedToxic { report } => {
                assert_eq!(report.toxicity.len(), 1);
                assert_eq!(report.items.len(), 2);
            }
            other => panic!("expected toxic block, got {other:?}"),
        }
        assert!(log.is_empty());
    }

    #[test]
    fn test_log_typed_meal_unmatched() {
        let catalog = Catalog::builtin().unwrap();
        let mut log = FoodLog::new();
        let outcome = log_typed_meal(&catalog, &mut log, "2 cups qqqq", now()).unwrap();
        assert!(matches!(outcome, LogTypedMealOutcome::Unmatched { ref unmatched } if unmatched == &["qqqq"]));
        assert!(!outcome.is_logged());
        assert!(log.is_empty());
    }

    #[test]
    fn test_log_catalog_food() {
        let catalog = Catalog::builtin().unwrap();
        let mut log = FoodLog::new();
        let response = log_catalog_food(&catalog, &mut log, "Banana", 1.5, now()).unwrap();
        // 105 * 1.5 = 157.5, truncated
        assert_eq!(response.entry.calories, 157);
        assert_eq!(response.entry.quantity, "1.5 medium banana");
        assert_eq!(response.unit, "medium banana");
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_log_catalog_food_refuses_toxic_and_bad_quantity() {
        let catalog = Catalog::builtin().unwrap();
        let mut log = FoodLog::new();

        let err = log_catalog_food(&catalog, &mut log, "Onion", 1.0, now()).unwrap_err();
        assert!(err.contains("toxic"));

        assert!(log_catalog_food(&catalog, &mut log, "Banana", 0.0, now()).is_err());
        assert!(log_catalog_food(&catalog, &mut log, "Banana", -1.0, now()).is_err());
        assert!(log_catalog_food(&catalog, &mut log, "qqqqqqqq", 1.0, now()).is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let outcome = LogTypedMealOutcome::Unmatched {
            unmatched: vec!["qqqq".to_string()],
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "unmatched");
        assert_eq!(json["unmatched"][0], "qqqq");
    }
}
