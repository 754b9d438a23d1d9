//! Food catalog
//!
//! Read-only lookup of foods with per-unit calories and toxicity data.
//! Loaded once at startup and shared with every estimate.

mod entry;

pub use entry::{Catalog, CatalogError, CatalogResult, FoodEntry};
