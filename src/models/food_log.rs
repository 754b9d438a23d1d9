//! Food log model
//!
//! In-memory record of what was fed this session, in insertion order.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A logged food
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodLogEntry {
    pub date: NaiveDate,
    /// Time of day, minute precision
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    pub food: String,
    /// Quantity with its unit, e.g. "0.50 cup"
    pub quantity: String,
    pub calories: i64,
}

/// Session food log
#[derive(Debug, Clone, Default)]
pub struct FoodLog {
    entries: Vec<FoodLogEntry>,
}

impl FoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: FoodLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[FoodLogEntry] {
        &self.entries
    }

    /// Entries for a single day
    pub fn entries_on(&self, date: NaiveDate) -> Vec<&FoodLogEntry> {
        self.entries.iter().filter(|e| e.date == date).collect()
    }

    /// Calories consumed on a day
    pub fn consumed_on(&self, date: NaiveDate) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.date == date)
            .map(|e| e.calories)
            .sum()
    }

    /// Remove every entry, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, food: &str, calories: i64) -> FoodLogEntry {
        FoodLogEntry {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            food: food.to_string(),
            quantity: "1.00 cup".to_string(),
            calories,
        }
    }

    #[test]
    fn test_consumed_per_day() {
        let mut log = FoodLog::new();
        log.push(entry("2024-03-01", "Banana", 105));
        log.push(entry("2024-03-01", "Boiled Chicken Breast", 165));
        log.push(entry("2024-03-02", "Banana", 105));

        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(log.consumed_on(day), 270);
        assert_eq!(log.entries_on(day).len(), 2);
        assert_eq!(log.entries_on(day)[1].food, "Boiled Chicken Breast");
        assert_eq!(log.consumed_on(NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()), 0);
    }

    #[test]
    fn test_clear() {
        let mut log = FoodLog::new();
        log.push(entry("2024-03-01", "Banana", 105));
        log.push(entry("2024-03-02", "Banana", 105));
        assert_eq!(log.clear(), 2);
        assert!(log.is_empty());
        assert_eq!(log.clear(), 0);
    }

    #[test]
    fn test_entry_serializes_time_as_hh_mm() {
        let json = serde_json::to_value(entry("2024-03-01", "Banana", 105)).unwrap();
        assert_eq!(json["time"], "08:30");
        assert_eq!(json["date"], "2024-03-01");

        let back: FoodLogEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back.time, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
    }
}
