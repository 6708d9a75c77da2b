use anyhow::Context;
use async_trait::async_trait;
use sqlx::{types::Json, FromRow, PgPool};
use time::Date;
use uuid::Uuid;

use super::types::{DailyLog, DailyNutrition, FoodLogEntry, WorkoutEntry};
use super::LedgerStore;

/// Postgres-backed ledger. Appends are a single conditional upsert so the
/// array append and the total increments cannot be torn apart by concurrent
/// scans for the same key.
pub struct PgLedger {
    pool: PgPool,
}

impl PgLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DailyLogRow {
    user_id: Uuid,
    date: Date,
    workouts: Json<Vec<WorkoutEntry>>,
    items: Json<Vec<FoodLogEntry>>,
    total_calories: f64,
    total_protein: f64,
    total_carbs: f64,
    total_fat: f64,
    total_fiber: f64,
}

impl From<DailyLogRow> for DailyLog {
    fn from(row: DailyLogRow) -> Self {
        DailyLog {
            user_id: row.user_id,
            date: row.date,
            workouts: row.workouts.0,
            nutrition: DailyNutrition {
                total_calories: row.total_calories,
                total_protein: row.total_protein,
                total_carbs: row.total_carbs,
                total_fat: row.total_fat,
                total_fiber: row.total_fiber,
                items: row.items.0,
            },
        }
    }
}

const SELECT_COLUMNS: &str = "user_id, date, workouts, items, \
     total_calories, total_protein, total_carbs, total_fat, total_fiber";

#[async_trait]
impl LedgerStore for PgLedger {
    async fn append_food(
        &self,
        user_id: Uuid,
        date: Date,
        entry: &FoodLogEntry,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO daily_logs
                (user_id, date, items,
                 total_calories, total_protein, total_carbs, total_fat, total_fiber)
            VALUES ($1, $2, jsonb_build_array($3::jsonb), $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, date) DO UPDATE SET
                items          = daily_logs.items || excluded.items,
                total_calories = daily_logs.total_calories + excluded.total_calories,
                total_protein  = daily_logs.total_protein  + excluded.total_protein,
                total_carbs    = daily_logs.total_carbs    + excluded.total_carbs,
                total_fat      = daily_logs.total_fat      + excluded.total_fat,
                total_fiber    = daily_logs.total_fiber    + excluded.total_fiber
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(Json(entry))
        .bind(entry.calories)
        .bind(entry.protein)
        .bind(entry.carbs)
        .bind(entry.fat)
        .bind(entry.fiber)
        .execute(&self.pool)
        .await
        .context("append food entry to daily log")?;
        Ok(())
    }

    async fn append_workout(
        &self,
        user_id: Uuid,
        date: Date,
        entry: &WorkoutEntry,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO daily_logs (user_id, date, workouts)
            VALUES ($1, $2, jsonb_build_array($3::jsonb))
            ON CONFLICT (user_id, date) DO UPDATE SET
                workouts = daily_logs.workouts || excluded.workouts
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(Json(entry))
        .execute(&self.pool)
        .await
        .context("append workout entry to daily log")?;
        Ok(())
    }

    async fn get(&self, user_id: Uuid, date: Date) -> anyhow::Result<DailyLog> {
        let row = sqlx::query_as::<_, DailyLogRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM daily_logs WHERE user_id = $1 AND date = $2"
        ))
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .context("fetch daily log")?;

        Ok(row
            .map(DailyLog::from)
            .unwrap_or_else(|| DailyLog::empty(user_id, date)))
    }

    async fn get_range(
        &self,
        user_id: Uuid,
        start: Date,
        end: Date,
    ) -> anyhow::Result<Vec<DailyLog>> {
        let rows = sqlx::query_as::<_, DailyLogRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM daily_logs \
             WHERE user_id = $1 AND date >= $2 AND date <= $3 \
             ORDER BY date ASC"
        ))
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .context("fetch daily log range")?;

        Ok(rows.into_iter().map(DailyLog::from).collect())
    }
}
