use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;

/// A provider could not answer at all (transport failure, timeout, missing
/// model, empty result). Distinct from a successful low-confidence answer:
/// only this signal advances a fallback chain to the next provider.
#[derive(Debug)]
pub struct Unavailable(pub String);

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failure taxonomy for the scan pipeline.
///
/// Provider-level failures never show up here: the classifier and nutrition
/// chains absorb them and only surface an error once a whole chain is
/// exhausted. Gate rejections are expected outcomes, not bugs.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Failed to decode image. Please upload a valid image file.")]
    DecodeFailure(#[source] image::ImageError),

    #[error("Please scan a food item. The image does not appear to contain food.")]
    NotFood,

    #[error("Unable to identify food item. Please ensure you're scanning actual food.")]
    UnknownFood,

    #[error("Prediction failed: no classification provider is available.")]
    PredictionFailed,

    #[error("Failed to record the scan. Please try again.")]
    LedgerWrite(#[source] anyhow::Error),
}

impl ScanError {
    pub fn status(&self) -> StatusCode {
        match self {
            ScanError::DecodeFailure(_) | ScanError::NotFood | ScanError::UnknownFood => {
                StatusCode::BAD_REQUEST
            }
            ScanError::PredictionFailed | ScanError::LedgerWrite(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ScanError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "scan pipeline failed");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ScanError::NotFood.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ScanError::UnknownFood.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ScanError::PredictionFailed.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ScanError::LedgerWrite(anyhow::anyhow!("db down")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
