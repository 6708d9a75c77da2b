use std::time::Duration;

use sqlx::PgPool;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Bounded-retention lifecycle for day documents: anything older than the
/// configured window is purged in the background, without the request path
/// ever deleting data. Reads for purged dates come back empty.
pub fn spawn_retention_sweeper(pool: PgPool, retention_days: i64) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            tick.tick().await;
            let result = sqlx::query(
                "DELETE FROM daily_logs WHERE created_at < now() - make_interval(days => $1)",
            )
            .bind(retention_days as i32)
            .execute(&pool)
            .await;

            match result {
                Ok(done) if done.rows_affected() > 0 => {
                    tracing::info!(
                        purged = done.rows_affected(),
                        retention_days,
                        "purged expired daily logs"
                    );
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "retention sweep failed"),
            }
        }
    })
}
