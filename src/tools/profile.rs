//! Dog Profile MCP Tools

use serde::Serialize;

use crate::models::{ActivityLevel, DogProfile, DogProfileUpdate};

/// Profile detail with the derived goal
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub weight_kg: f64,
    pub breed: String,
    pub activity: ActivityLevel,
    pub activity_label: &'static str,
    pub activity_factor: f64,
    pub daily_goal: i64,
}

impl From<&DogProfile> for ProfileResponse {
    fn from(profile: &DogProfile) -> Self {
        Self {
            name: profile.name.clone(),
            weight_kg: profile.weight_kg,
            breed: profile.breed.clone(),
            activity: profile.activity,
            activity_label: profile.activity.label(),
            activity_factor: profile.activity.factor(),
            daily_goal: profile.daily_goal(),
        }
    }
}

pub fn get_profile(profile: &DogProfile) -> ProfileResponse {
    ProfileResponse::from(profile)
}

/// Apply a partial update, validating before anything changes
pub fn update_profile(profile: &mut DogProfile, update: DogProfileUpdate) -> Result<ProfileResponse, String> {
    let name = match update.name {
        Some(n) if n.trim().is_empty() => return Err("Dog name cannot be empty".to_string()),
        Some(n) => Some(n.trim().to_string()),
        None => None,
    };

    if let Some(w) = update.weight_kg {
        if !w.is_finite() || w <= 0.0 {
            return Err("weight_kg must be greater than 0".to_string());
        }
    }

    if let Some(n) = name {
        profile.name = n;
    }
    if let Some(w) = update.weight_kg {
        profile.weight_kg = w;
    }
    if let Some(b) = update.breed {
        profile.breed = b.trim().to_string();
    }
    if let Some(a) = update.activity {
        profile.activity = a;
    }

    tracing::info!(name = %profile.name, goal = profile.daily_goal(), "dog profile updated");

    Ok(ProfileResponse::from(&*profile))
}
