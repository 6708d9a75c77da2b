use std::collections::HashMap;

use async_trait::async_trait;
use time::Date;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::types::{DailyLog, FoodLogEntry, WorkoutEntry};
use super::LedgerStore;

/// In-memory ledger for tests and DB-less wiring. The mutex plays the role
/// of the database's atomic upsert: append and increments happen under one
/// lock acquisition.
#[derive(Default)]
pub struct MemoryLedger {
    days: Mutex<HashMap<(Uuid, Date), DailyLog>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn append_food(
        &self,
        user_id: Uuid,
        date: Date,
        entry: &FoodLogEntry,
    ) -> anyhow::Result<()> {
        let mut days = self.days.lock().await;
        let day = days
            .entry((user_id, date))
            .or_insert_with(|| DailyLog::empty(user_id, date));
        day.nutrition.items.push(entry.clone());
        day.nutrition.total_calories += entry.calories;
        day.nutrition.total_protein += entry.protein;
        day.nutrition.total_carbs += entry.carbs;
        day.nutrition.total_fat += entry.fat;
        day.nutrition.total_fiber += entry.fiber;
        Ok(())
    }

    async fn append_workout(
        &self,
        user_id: Uuid,
        date: Date,
        entry: &WorkoutEntry,
    ) -> anyhow::Result<()> {
        let mut days = self.days.lock().await;
        days.entry((user_id, date))
            .or_insert_with(|| DailyLog::empty(user_id, date))
            .workouts
            .push(entry.clone());
        Ok(())
    }

    async fn get(&self, user_id: Uuid, date: Date) -> anyhow::Result<DailyLog> {
        let days = self.days.lock().await;
        Ok(days
            .get(&(user_id, date))
            .cloned()
            .unwrap_or_else(|| DailyLog::empty(user_id, date)))
    }

    async fn get_range(
        &self,
        user_id: Uuid,
        start: Date,
        end: Date,
    ) -> anyhow::Result<Vec<DailyLog>> {
        let days = self.days.lock().await;
        let mut logs: Vec<DailyLog> = days
            .values()
            .filter(|log| log.user_id == user_id && log.date >= start && log.date <= end)
            .cloned()
            .collect();
        logs.sort_by_key(|log| log.date);
        Ok(logs)
    }
}

#[cfg(test)]
mod ledger_tests {
    use std::sync::Arc;

    use time::macros::date;
    use time::OffsetDateTime;

    use super::*;
    use crate::nutrition::NutritionRecord;

    fn entry(calories: f64) -> FoodLogEntry {
        FoodLogEntry::from_scan(
            "egg_biryani",
            &NutritionRecord {
                calories,
                protein: 8.5,
                carbs: 35.0,
                fat: 7.0,
                fiber: 0.5,
            },
            0.85,
        )
    }

    fn assert_totals_match_items(log: &DailyLog) {
        let n = &log.nutrition;
        let sum = |f: fn(&FoodLogEntry) -> f64| n.items.iter().map(f).sum::<f64>();
        assert!((n.total_calories - sum(|e| e.calories)).abs() < 1e-9);
        assert!((n.total_protein - sum(|e| e.protein)).abs() < 1e-9);
        assert!((n.total_carbs - sum(|e| e.carbs)).abs() < 1e-9);
        assert!((n.total_fat - sum(|e| e.fat)).abs() < 1e-9);
        assert!((n.total_fiber - sum(|e| e.fiber)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_sequential_upserts_keep_totals_in_lockstep() {
        let ledger = MemoryLedger::new();
        let user = Uuid::new_v4();
        let day = date!(2024 - 03 - 11);

        for i in 1..=5 {
            ledger.append_food(user, day, &entry(100.0 * i as f64)).await.unwrap();
        }

        let log = ledger.get(user, day).await.unwrap();
        assert_eq!(log.nutrition.items.len(), 5);
        assert!((log.nutrition.total_calories - 1500.0).abs() < 1e-9);
        assert_totals_match_items(&log);
    }

    #[tokio::test]
    async fn test_concurrent_upserts_lose_no_updates() {
        let ledger = Arc::new(MemoryLedger::new());
        let user = Uuid::new_v4();
        let day = date!(2024 - 03 - 12);

        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                tokio::spawn(async move { ledger.append_food(user, day, &entry(240.0)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let log = ledger.get(user, day).await.unwrap();
        assert_eq!(log.nutrition.items.len(), 32);
        assert!((log.nutrition.total_calories - 32.0 * 240.0).abs() < 1e-6);
        assert_totals_match_items(&log);
    }

    #[tokio::test]
    async fn test_read_of_absent_date_is_empty_not_an_error() {
        let ledger = MemoryLedger::new();
        let log = ledger
            .get(Uuid::new_v4(), date!(2020 - 01 - 01))
            .await
            .unwrap();
        assert!(log.workouts.is_empty());
        assert!(log.nutrition.items.is_empty());
        assert_eq!(log.nutrition.total_calories, 0.0);
    }

    #[tokio::test]
    async fn test_range_is_closed_interval_ordered_by_date() {
        let ledger = MemoryLedger::new();
        let user = Uuid::new_v4();
        for day in [
            date!(2024 - 03 - 10),
            date!(2024 - 03 - 14),
            date!(2024 - 03 - 12),
        ] {
            ledger.append_food(user, day, &entry(100.0)).await.unwrap();
        }
        // Another user's data must not leak into the range.
        ledger
            .append_food(Uuid::new_v4(), date!(2024 - 03 - 12), &entry(999.0))
            .await
            .unwrap();

        let logs = ledger
            .get_range(user, date!(2024 - 03 - 10), date!(2024 - 03 - 12))
            .await
            .unwrap();
        let dates: Vec<Date> = logs.iter().map(|l| l.date).collect();
        assert_eq!(dates, vec![date!(2024 - 03 - 10), date!(2024 - 03 - 12)]);
        assert!(logs.iter().all(|l| l.user_id == user));
    }

    #[tokio::test]
    async fn test_workout_append_creates_the_day_lazily() {
        let ledger = MemoryLedger::new();
        let user = Uuid::new_v4();
        let day = date!(2024 - 03 - 13);
        let workout = WorkoutEntry {
            id: Uuid::new_v4(),
            exercise: "deadlift".into(),
            sets: 3,
            reps: 5,
            weight: 120.0,
            duration: 25,
            timestamp: OffsetDateTime::now_utc(),
        };

        ledger.append_workout(user, day, &workout).await.unwrap();

        let log = ledger.get(user, day).await.unwrap();
        assert_eq!(log.workouts.len(), 1);
        assert_eq!(log.workouts[0].exercise, "deadlift");
        assert!(log.nutrition.items.is_empty());
    }
}
