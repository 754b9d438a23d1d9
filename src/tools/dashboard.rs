//! Dashboard MCP Tools
//!
//! Daily intake against the profile's calorie goal.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{DogProfile, FoodLog, FoodLogEntry};

/// Share of the goal up to which the day is still green
pub const GREEN_LIMIT: f64 = 0.9;

/// Intake status band for a day
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IntakeStatus {
    Green,
    Orange,
    Red,
}

impl IntakeStatus {
    /// Band for a consumed/goal ratio (unclamped)
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio <= GREEN_LIMIT {
            IntakeStatus::Green
        } else if ratio <= 1.0 {
            IntakeStatus::Orange
        } else {
            IntakeStatus::Red
        }
    }
}

/// Response for daily_summary
#[derive(Debug, Serialize)]
pub struct DailySummaryResponse {
    pub date: NaiveDate,
    pub dog_name: String,
    pub consumed: i64,
    pub goal: i64,
    /// Goal minus consumed, negative when over
    pub remaining: i64,
    /// consumed / goal clamped to [0, 1]; 0 when there is no goal
    pub progress: f64,
    pub status: IntakeStatus,
    pub entries: Vec<FoodLogEntry>,
}

/// Response for clear_logs
#[derive(Debug, Serialize)]
pub struct ClearLogsResponse {
    pub success: bool,
    pub entries_removed: usize,
}

/// Summarize one day's intake
pub fn daily_summary(log: &FoodLog, profile: &DogProfile, date: NaiveDate) -> DailySummaryResponse {
    let consumed = log.consumed_on(date);
    let goal = profile.daily_goal();

    let ratio = if goal > 0 {
        consumed as f64 / goal as f64
    } else {
        0.0
    };

    DailySummaryResponse {
        date,
        dog_name: profile.name.clone(),
        consumed,
        goal,
        remaining: goal - consumed,
        progress: ratio.clamp(0.0, 1.0),
        status: IntakeStatus::from_ratio(ratio),
        entries: log.entries_on(date).into_iter().cloned().collect(),
    }
}

/// Remove every logged entry
pub fn clear_logs(log: &mut FoodLog) -> ClearLogsResponse {
    let entries_removed = log.clear();
    tracing::info!(entries_removed, "food log cleared");
    ClearLogsResponse {
        success: true,
        entries_removed,
    }
}
