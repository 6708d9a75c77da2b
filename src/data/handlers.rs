use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};
use tracing::{error, instrument};

use super::dto::{DailyHistoryResponse, HistoryRangeResponse, RangeQuery};
use crate::auth::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/data/:date", get(daily_history))
        .route("/data", get(history_range))
        .route("/data/", get(history_range))
}

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

fn parse_date(raw: &str) -> Result<Date, (StatusCode, String)> {
    Date::parse(raw, DATE_FORMAT).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid date format. Use YYYY-MM-DD".to_string(),
        )
    })
}

/// GET /data/:date — one day's workouts and nutrition. Days with no data
/// (including purged ones) come back empty.
#[instrument(skip(state))]
async fn daily_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<String>,
) -> Result<Json<DailyHistoryResponse>, (StatusCode, String)> {
    let date = parse_date(&date)?;
    let log = state.ledger.get(user_id, date).await.map_err(internal)?;
    Ok(Json(DailyHistoryResponse {
        workouts: log.workouts,
        nutrition: log.nutrition,
    }))
}

/// GET /data?start_date&end_date — logs in the closed interval.
#[instrument(skip(state))]
async fn history_range(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(range): Query<RangeQuery>,
) -> Result<Json<HistoryRangeResponse>, (StatusCode, String)> {
    let start = parse_date(&range.start_date)?;
    let end = parse_date(&range.end_date)?;
    if start > end {
        return Err((
            StatusCode::BAD_REQUEST,
            "Start date must be before end date".to_string(),
        ));
    }

    let logs = state
        .ledger
        .get_range(user_id, start, end)
        .await
        .map_err(internal)?;

    Ok(Json(HistoryRangeResponse {
        start_date: range.start_date,
        end_date: range.end_date,
        count: logs.len(),
        logs,
    }))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "history fetch failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to fetch data".to_string(),
    )
}

#[cfg(test)]
mod data_tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_date_accepts_iso_dates() {
        assert_eq!(parse_date("2024-03-11").unwrap(), date!(2024 - 03 - 11));
    }

    #[test]
    fn test_parse_date_rejects_other_shapes() {
        for raw in ["11-03-2024", "2024/03/11", "2024-3-11", "yesterday", ""] {
            assert!(parse_date(raw).is_err(), "accepted {raw:?}");
        }
    }
}
