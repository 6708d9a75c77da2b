use async_trait::async_trait;
use time::Date;
use uuid::Uuid;

mod memory;
mod repo;
pub mod retention;
mod types;

pub use memory::MemoryLedger;
pub use repo::PgLedger;
pub use types::{DailyLog, DailyNutrition, FoodLogEntry, WorkoutEntry};

/// Per-user per-date aggregate store.
///
/// `append_*` operations are atomic create-or-append: either the whole
/// append+increment lands or none of it does, and concurrent appends for the
/// same `(user, date)` key serialize at the storage layer. No
/// read-modify-write is allowed in an implementation.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Append a food entry and increment every nutrition total by the
    /// entry's fields in the same operation, creating the day lazily.
    async fn append_food(&self, user_id: Uuid, date: Date, entry: &FoodLogEntry)
        -> anyhow::Result<()>;

    /// Append a workout, creating the day lazily.
    async fn append_workout(
        &self,
        user_id: Uuid,
        date: Date,
        entry: &WorkoutEntry,
    ) -> anyhow::Result<()>;

    /// The day's log, or an empty one when none exists (including dates the
    /// retention policy already purged).
    async fn get(&self, user_id: Uuid, date: Date) -> anyhow::Result<DailyLog>;

    /// All logs with `date` in the closed interval, ordered by date.
    async fn get_range(&self, user_id: Uuid, start: Date, end: Date)
        -> anyhow::Result<Vec<DailyLog>>;
}
