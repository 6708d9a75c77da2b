use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde_json::json;
use tracing::instrument;

use super::dto::{ModelStatusResponse, SupportedFoodsResponse};
use super::services;
use crate::auth::AuthUser;
use crate::nutrition::catalog;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/scan", post(scan_food))
        .route("/scan/supported-foods", get(supported_foods))
        .route("/scan/model-status", get(model_status))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

/// POST /scan (multipart, field `file`)
#[instrument(skip(state, mp))]
async fn scan_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut mp: Multipart,
) -> Response {
    let mut file: Option<Bytes> = None;
    while let Ok(Some(field)) = mp.next_field().await {
        if field.name() == Some("file") {
            match field.bytes().await {
                Ok(bytes) => file = Some(bytes),
                Err(e) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "detail": format!("failed to read upload: {e}") })),
                    )
                        .into_response();
                }
            }
            break;
        }
    }
    let Some(file) = file else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "multipart field 'file' is required" })),
        )
            .into_response();
    };

    match services::scan_food(&state, user_id, file).await {
        Ok(prediction) => Json(prediction).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /scan/supported-foods
#[instrument(skip(state))]
async fn supported_foods(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Json<SupportedFoodsResponse> {
    let total_foods = catalog::food_count();
    Json(SupportedFoodsResponse {
        total_foods,
        categories: catalog::CATEGORIES.to_vec(),
        model_status: if state.local_model.is_loaded() {
            "Model Loaded"
        } else {
            "Simulation Mode"
        },
        message: format!(
            "Supports {total_foods}+ foods including Indian, Chinese, Japanese, Thai, \
             Western, Mediterranean, and many more cuisines"
        ),
    })
}

/// GET /scan/model-status
#[instrument(skip(state))]
async fn model_status(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Json<ModelStatusResponse> {
    let loaded = state.local_model.is_loaded();
    Json(ModelStatusResponse {
        model_loaded: loaded,
        input_shape: state.local_model.input_shape(),
        total_supported_foods: catalog::food_count(),
        status: if loaded {
            "Ready for predictions"
        } else {
            "Running in simulation mode"
        },
    })
}
