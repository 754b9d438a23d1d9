//! Food Catalog MCP Tools
//!
//! Browsing and lookup over the read-only food catalog.

use serde::Serialize;

use crate::catalog::{Catalog, FoodEntry};
use crate::nutrition::{FoodMatcher, MatchKind};

/// Category with its food count
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub food_count: usize,
}

/// Response for list_food_categories
#[derive(Debug, Serialize)]
pub struct ListCategoriesResponse {
    pub categories: Vec<CategorySummary>,
    pub total: usize,
}

/// Summary of a food for list results
#[derive(Debug, Serialize)]
pub struct FoodSummary {
    pub name: String,
    pub calories: f64,
    pub unit: String,
    pub toxic: bool,
    pub category: Option<String>,
}

impl From<&FoodEntry> for FoodSummary {
    fn from(entry: &FoodEntry) -> Self {
        Self {
            name: entry.name.clone(),
            calories: entry.calories,
            unit: entry.unit.clone(),
            toxic: entry.toxic,
            category: entry.category.clone(),
        }
    }
}

/// Response for list_foods
#[derive(Debug, Serialize)]
pub struct ListFoodsResponse {
    pub category: Option<String>,
    pub foods: Vec<FoodSummary>,
    pub total: usize,
}

/// Response for get_food
#[derive(Debug, Serialize)]
pub struct GetFoodResponse {
    pub query: String,
    #[serde(rename = "match")]
    pub match_kind: MatchKind,
    pub food: FoodEntry,
}

/// List categories in catalog order
pub fn list_food_categories(catalog: &Catalog) -> ListCategoriesResponse {
    let categories: Vec<CategorySummary> = catalog
        .categories()
        .into_iter()
        .map(|name| CategorySummary {
            name: name.to_string(),
            food_count: catalog.in_category(name).len(),
        })
        .collect();
    let total = categories.len();

    ListCategoriesResponse { categories, total }
}

/// List foods, optionally restricted to one category
pub fn list_foods(catalog: &Catalog, category: Option<&str>) -> Result<ListFoodsResponse, String> {
    let category = category.map(str::trim).filter(|c| !c.is_empty());

    let foods: Vec<FoodSummary> = match category {
        Some(c) => {
            let entries = catalog.in_category(c);
            if entries.is_empty() {
                return Err(format!(
                    "Unknown category '{}'. Available: {}",
                    c,
                    catalog.categories().join(", ")
                ));
            }
            entries.into_iter().map(FoodSummary::from).collect()
        }
        None => catalog.entries().iter().map(FoodSummary::from).collect(),
    };
    let total = foods.len();

    Ok(ListFoodsResponse {
        category: category.map(str::to_string),
        foods,
        total,
    })
}

/// Look up a food by name, tolerating case differences and typos
pub fn get_food(catalog: &Catalog, name: &str) -> Result<Option<GetFoodResponse>, String> {
    let query = name.trim();
    if query.is_empty() {
        return Err("Food name cannot be empty".to_string());
    }

    let names = catalog.names();
    let found = FoodMatcher::new()
        .best_match(query, &names)
        .and_then(|m| catalog.get(m.name).map(|entry| (entry, m.kind)));

    Ok(found.map(|(entry, match_kind)| GetFoodResponse {
        query: query.to_string(),
        match_kind,
        food: entry.clone(),
    }))
}
