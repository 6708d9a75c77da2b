use bytes::Bytes;
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::FoodPredictionResponse;
use super::gate;
use crate::error::ScanError;
use crate::ledger::FoodLogEntry;
use crate::state::AppState;

/// The whole recognition-and-resolution pipeline for one uploaded image:
/// normalize, classify through the fallback chain, gate on confidence,
/// resolve nutrition, and fold the entry into today's ledger.
pub async fn scan_food(
    state: &AppState,
    user_id: Uuid,
    file: Bytes,
) -> Result<FoodPredictionResponse, ScanError> {
    let tensor = state.normalizer.normalize(&file)?;
    let prediction = state.classifier.classify(&tensor).await?;
    gate::admit(&prediction.label, prediction.confidence)?;

    let record = state.nutrition.resolve(&prediction.label).await;

    let entry = FoodLogEntry::from_scan(&prediction.label, &record, prediction.confidence);
    let today = OffsetDateTime::now_utc().date();
    state
        .ledger
        .append_food(user_id, today, &entry)
        .await
        .map_err(ScanError::LedgerWrite)?;

    tracing::info!(
        food_item = %prediction.label,
        calories = record.calories,
        protein = record.protein,
        carbs = record.carbs,
        fat = record.fat,
        fiber = record.fiber,
        confidence = prediction.confidence,
        source = prediction.source,
        "food scanned"
    );

    Ok(FoodPredictionResponse {
        food_item: prediction.label,
        calories: record.calories,
        protein: record.protein,
        carbs: record.carbs,
        fat: record.fat,
        fiber: record.fiber,
        confidence: prediction.confidence,
    })
}
