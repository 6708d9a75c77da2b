use serde::{Deserialize, Serialize};

use crate::ledger::{DailyLog, DailyNutrition, WorkoutEntry};

/// Response body for `GET /data/:date`.
#[derive(Debug, Serialize)]
pub struct DailyHistoryResponse {
    pub workouts: Vec<WorkoutEntry>,
    pub nutrition: DailyNutrition,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start_date: String,
    pub end_date: String,
}

/// Response body for `GET /data?start_date&end_date`.
#[derive(Debug, Serialize)]
pub struct HistoryRangeResponse {
    pub start_date: String,
    pub end_date: String,
    pub logs: Vec<DailyLog>,
    pub count: usize,
}
