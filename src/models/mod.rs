//! Data models
//!
//! The dog profile and the session food log.

mod dog_profile;
mod food_log;

pub use dog_profile::{calculate_mer, ActivityLevel, DogProfile, DogProfileUpdate};
pub use food_log::{FoodLog, FoodLogEntry};
