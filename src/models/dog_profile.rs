//! Dog profile model
//!
//! Holds the dog's details and derives the daily calorie goal (MER).

use serde::{Deserialize, Serialize};

/// Activity level, mapped to an MER multiplier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    #[default]
    Neutered,
    Intact,
    Inactive,
    WeightLoss,
    Working,
    Puppy,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 6] = [
        ActivityLevel::Neutered,
        ActivityLevel::Intact,
        ActivityLevel::Inactive,
        ActivityLevel::WeightLoss,
        ActivityLevel::Working,
        ActivityLevel::Puppy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Neutered => "neutered",
            ActivityLevel::Intact => "intact",
            ActivityLevel::Inactive => "inactive",
            ActivityLevel::WeightLoss => "weight_loss",
            ActivityLevel::Working => "working",
            ActivityLevel::Puppy => "puppy",
        }
    }

    /// Parse a level name, accepting spaces or dashes for underscores
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "neutered" => Some(ActivityLevel::Neutered),
            "intact" => Some(ActivityLevel::Intact),
            "inactive" => Some(ActivityLevel::Inactive),
            "weight_loss" => Some(ActivityLevel::WeightLoss),
            "working" => Some(ActivityLevel::Working),
            "puppy" => Some(ActivityLevel::Puppy),
            _ => None,
        }
    }

    /// MER multiplier applied to the resting energy requirement
    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Neutered => 1.6,
            ActivityLevel::Intact => 1.8,
            ActivityLevel::Inactive => 1.2,
            ActivityLevel::WeightLoss => 1.0,
            ActivityLevel::Working => 2.0,
            ActivityLevel::Puppy => 3.0,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Neutered => "Neutered Adult",
            ActivityLevel::Intact => "Intact Adult",
            ActivityLevel::Inactive => "Inactive/Obese Prone",
            ActivityLevel::WeightLoss => "Weight Loss",
            ActivityLevel::Working => "Active/Working",
            ActivityLevel::Puppy => "Puppy (0-4 months)",
        }
    }
}

/// Maintenance Energy Requirement in kcal/day.
///
/// RER = 70 * weight_kg^0.75, scaled by `factor` and truncated.
pub fn calculate_mer(weight_kg: f64, factor: f64) -> i64 {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return 0;
    }
    let rer = 70.0 * weight_kg.powf(0.75);
    (rer * factor) as i64
}

/// The dog being tracked
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DogProfile {
    pub name: String,
    pub weight_kg: f64,
    pub breed: String,
    pub activity: ActivityLevel,
}

impl Default for DogProfile {
    fn default() -> Self {
        Self {
            name: "Duoduo".to_string(),
            weight_kg: 25.0,
            breed: "Golden Retriever".to_string(),
            activity: ActivityLevel::Neutered,
        }
    }
}

impl DogProfile {
    /// Daily calorie goal for this profile
    pub fn daily_goal(&self) -> i64 {
        calculate_mer(self.weight_kg, self.activity.factor())
    }
}

/// Partial profile update; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DogProfileUpdate {
    pub name: Option<String>,
    pub weight_kg: Option<f64>,
    pub breed: Option<String>,
    pub activity: Option<ActivityLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_mer() {
        // 70 * 25^0.75 = 782.62..., * 1.6 = 1252.2
        assert_eq!(calculate_mer(25.0, 1.6), 1252);
        assert_eq!(calculate_mer(10.0, 1.0), 393);
        assert_eq!(calculate_mer(0.0, 1.6), 0);
        assert_eq!(calculate_mer(-3.0, 1.6), 0);
    }

    #[test]
    fn test_default_profile_goal() {
        let profile = DogProfile::default();
        assert_eq!(profile.name, "Duoduo");
        assert_eq!(profile.daily_goal(), 1252);
    }

    #[test]
    fn test_activity_round_trip() {
        for level in ActivityLevel::ALL {
            assert_eq!(ActivityLevel::from_str(level.as_str()), Some(level));
        }
        assert_eq!(ActivityLevel::from_str("Weight Loss"), Some(ActivityLevel::WeightLoss));
        assert_eq!(ActivityLevel::from_str("couch potato"), None);
    }

    #[test]
    fn test_activity_serde_names() {
        let json = serde_json::to_string(&ActivityLevel::WeightLoss).unwrap();
        assert_eq!(json, "\"weight_loss\"");
        let level: ActivityLevel = serde_json::from_str("\"puppy\"").unwrap();
        assert_eq!(level.factor(), 3.0);
    }
}
