//! Catalog entries and loading
//!
//! Raw JSON records are validated and defaulted here, so the matching and
//! estimation code can rely on every entry being well-formed.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog shipped with the binary
static BUILTIN_CATALOG_JSON: &str = include_str!("data/default_catalog.json");

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Food name cannot be empty")]
    EmptyName,

    #[error("Duplicate food name '{0}'")]
    DuplicateName(String),

    #[error("Food '{name}' has invalid calories {calories}")]
    InvalidCalories { name: String, calories: f64 },

    #[error("Food '{0}' has an empty unit")]
    EmptyUnit(String),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A food in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub name: String,
    /// Calories per reference unit
    pub calories: f64,
    /// Reference unit the calorie figure is defined in
    pub unit: String,
    #[serde(default)]
    pub toxic: bool,
    #[serde(default)]
    pub warning: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl FoodEntry {
    pub fn new(name: impl Into<String>, calories: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calories,
            unit: unit.into(),
            toxic: false,
            warning: None,
            category: None,
        }
    }

    /// Mark the entry toxic with the given warning
    pub fn toxic(mut self, warning: impl Into<String>) -> Self {
        self.toxic = true;
        self.warning = Some(warning.into());
        self
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Warning text for a toxic entry, falling back to a generic message
    pub fn warning_text(&self) -> String {
        match self.warning.as_deref().map(str::trim) {
            Some(w) if !w.is_empty() => w.to_string(),
            _ => generic_warning(&self.name),
        }
    }
}

fn generic_warning(name: &str) -> String {
    format!("{} is marked as toxic to dogs.", name)
}

/// Immutable, ordered food catalog
///
/// Iteration order is load order; containment matching relies on it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<FoodEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, validating and normalizing every entry
    pub fn from_entries(entries: Vec<FoodEntry>) -> CatalogResult<Self> {
        let mut validated = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());

        for mut entry in entries {
            entry.name = entry.name.trim().to_string();
            entry.unit = entry.unit.trim().to_string();

            if entry.name.is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if !entry.calories.is_finite() || entry.calories < 0.0 {
                return Err(CatalogError::InvalidCalories {
                    name: entry.name,
                    calories: entry.calories,
                });
            }
            if entry.unit.is_empty() {
                return Err(CatalogError::EmptyUnit(entry.name));
            }
            if index.contains_key(&entry.name) {
                return Err(CatalogError::DuplicateName(entry.name));
            }

            if entry.toxic {
                entry.warning = Some(entry.warning_text());
            }
            entry.category = entry
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty());

            index.insert(entry.name.clone(), validated.len());
            validated.push(entry);
        }

        Ok(Self {
            entries: validated,
            index,
        })
    }

    /// Parse a catalog from a JSON array of entries
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let entries: Vec<FoodEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Load a catalog from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The catalog embedded in the binary
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_json_str(BUILTIN_CATALOG_JSON)
    }

    pub fn get(&self, name: &str) -> Option<&FoodEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Food names in catalog order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn entries(&self) -> &[FoodEntry] {
        &self.entries
    }

    /// Categories in order of first appearance
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for category in self.entries.iter().filter_map(|e| e.category.as_deref()) {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }

    /// Entries in a category, compared ignoring case
    pub fn in_category(&self, category: &str) -> Vec<&FoodEntry> {
        let wanted = category.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.category
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase() == wanted)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 75);

        let chicken = catalog.get("Boiled Chicken Breast").unwrap();
        assert_eq!(chicken.calories, 165.0);
        assert_eq!(chicken.unit, "cup");
        assert!(!chicken.toxic);

        let toxic: Vec<_> = catalog.entries().iter().filter(|e| e.toxic).collect();
        assert_eq!(toxic.len(), 12);
        assert!(toxic.iter().all(|e| e.warning.as_deref().is_some_and(|w| !w.is_empty())));
    }

    #[test]
    fn test_builtin_categories_in_order() {
        let catalog = Catalog::builtin().unwrap();
        let categories = catalog.categories();
        assert_eq!(categories.first(), Some(&"Proteins (Cooked/Plain)"));
        assert_eq!(categories.last(), Some(&"Toxic / Dangerous"));
        assert_eq!(categories.len(), 7);

        let fruits = catalog.in_category("fruits");
        assert_eq!(fruits.len(), 12);
        assert_eq!(fruits[0].name, "Apple (no seeds/core)");
    }

    #[test]
    fn test_names_keep_load_order() {
        let catalog = Catalog::from_entries(vec![
            FoodEntry::new("Zucchini", 20.0, "cup"),
            FoodEntry::new("Apple", 10.0, "slice"),
        ])
        .unwrap();
        assert_eq!(catalog.names(), vec!["Zucchini", "Apple"]);
    }

    #[test]
    fn test_toxic_warning_defaulted() {
        let mut grapes = FoodEntry::new("Grapes", 0.0, "any amount");
        grapes.toxic = true;
        let catalog = Catalog::from_entries(vec![grapes]).unwrap();
        assert_eq!(
            catalog.get("Grapes").unwrap().warning.as_deref(),
            Some("Grapes is marked as toxic to dogs.")
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = Catalog::from_entries(vec![
            FoodEntry::new("Banana", 105.0, "medium banana"),
            FoodEntry::new(" Banana ", 90.0, "medium banana"),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateName(name)) if name == "Banana"));
    }

    #[test]
    fn test_invalid_entries_rejected() {
        assert!(matches!(
            Catalog::from_entries(vec![FoodEntry::new("Rice", -1.0, "cup")]),
            Err(CatalogError::InvalidCalories { .. })
        ));
        assert!(matches!(
            Catalog::from_entries(vec![FoodEntry::new("Rice", f64::NAN, "cup")]),
            Err(CatalogError::InvalidCalories { .. })
        ));
        assert!(matches!(
            Catalog::from_entries(vec![FoodEntry::new("Rice", 200.0, "  ")]),
            Err(CatalogError::EmptyUnit(_))
        ));
        assert!(matches!(
            Catalog::from_entries(vec![FoodEntry::new("", 200.0, "cup")]),
            Err(CatalogError::EmptyName)
        ));
    }

    #[test]
    fn test_from_json_optional_fields() {
        let json = r#"[
            {"name": "Celery", "calories": 10, "unit": "stalk"},
            {"name": "Onion", "calories": 0, "unit": "any amount", "toxic": true, "warning": "Causes anemia."}
        ]"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.get("Celery").unwrap().toxic);
        assert_eq!(catalog.get("Onion").unwrap().warning_text(), "Causes anemia.");
        assert!(catalog.categories().is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(Catalog::from_json_str("{"), Err(CatalogError::Json(_))));
        assert!(matches!(
            Catalog::from_json_str(r#"[{"name": "Rice"}]"#),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join(format!("pawpal-catalog-{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"name": "Kibble", "calories": 350, "unit": "cup"}]"#).unwrap();
        let catalog = Catalog::from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(catalog.get("Kibble").unwrap().calories, 350.0);

        assert!(matches!(
            Catalog::from_path("/nonexistent/pawpal/catalog.json"),
            Err(CatalogError::Io(_))
        ));
    }
}
