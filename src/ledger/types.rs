use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::nutrition::NutritionRecord;

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10_f64.powi(places as i32);
    (value * factor).round() / factor
}

/// One scanned food item. Immutable once created; owned by exactly one
/// daily log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub confidence: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl FoodLogEntry {
    /// Macros are stored to one decimal place, confidence to four;
    /// calories stay unrounded.
    pub fn from_scan(name: &str, record: &NutritionRecord, confidence: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            calories: record.calories,
            protein: round_to(record.protein, 1),
            carbs: round_to(record.carbs, 1),
            fat: round_to(record.fat, 1),
            fiber: round_to(record.fiber, 1),
            confidence: round_to(confidence, 4),
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}

/// One logged workout, carried in the day document alongside nutrition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub id: Uuid,
    pub exercise: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    /// Minutes.
    pub duration: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Running totals plus itemized history. The totals always equal the sums
/// over `items`; the upsert keeps them in lockstep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyNutrition {
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub total_fiber: f64,
    pub items: Vec<FoodLogEntry>,
}

impl DailyNutrition {
    pub fn empty() -> Self {
        Self {
            total_calories: 0.0,
            total_protein: 0.0,
            total_carbs: 0.0,
            total_fat: 0.0,
            total_fiber: 0.0,
            items: Vec::new(),
        }
    }
}

/// The per-user per-date aggregate document. One per calendar date, created
/// lazily on the first workout or scan of the day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLog {
    pub user_id: Uuid,
    pub date: Date,
    pub workouts: Vec<WorkoutEntry>,
    pub nutrition: DailyNutrition,
}

impl DailyLog {
    /// What reads return for dates with no data (including already-purged
    /// dates — never an error).
    pub fn empty(user_id: Uuid, date: Date) -> Self {
        Self {
            user_id,
            date,
            workouts: Vec::new(),
            nutrition: DailyNutrition::empty(),
        }
    }
}

#[cfg(test)]
mod types_tests {
    use super::*;

    #[test]
    fn test_entry_rounding_rules() {
        let record = NutritionRecord {
            calories: 215.37,
            protein: 15.04,
            carbs: 8.25,
            fat: 12.06,
            fiber: 0.55,
        };
        let entry = FoodLogEntry::from_scan("butter_chicken", &record, 0.873_46);
        assert_eq!(entry.calories, 215.37);
        assert_eq!(entry.protein, 15.0);
        assert_eq!(entry.carbs, 8.3);
        assert_eq!(entry.fat, 12.1);
        assert_eq!(entry.fiber, 0.6);
        assert_eq!(entry.confidence, 0.8735);
    }
}
