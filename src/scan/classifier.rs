use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::{Deserialize, Serialize};

use super::image::ImageTensor;
use crate::config::VisionApiConfig;
use crate::error::{ScanError, Unavailable};
use crate::nutrition::catalog::normalize_key;

/// What the chain hands downstream once some adapter answered.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    /// Normalized label (lowercase, underscores).
    pub label: String,
    pub confidence: f64,
    /// Which adapter produced the answer.
    pub source: &'static str,
}

/// A classification adapter. `Unavailable` means the provider could not
/// answer at all; a successful answer with low confidence is still an
/// answer and must be returned as `Ok`.
#[async_trait]
pub trait Classifier: Send + Sync {
    fn name(&self) -> &'static str;
    async fn classify(&self, tensor: &ImageTensor) -> Result<(String, f64), Unavailable>;
}

/// Ordered adapter list. Providers differ wildly in cost and availability;
/// the chain isolates callers from provider topology and returns a result
/// whenever any provider is reachable.
pub struct ClassifierChain {
    adapters: Vec<Arc<dyn Classifier>>,
}

impl ClassifierChain {
    pub fn new(adapters: Vec<Arc<dyn Classifier>>) -> Self {
        Self { adapters }
    }

    pub async fn classify(&self, tensor: &ImageTensor) -> Result<PredictionResult, ScanError> {
        for adapter in &self.adapters {
            match adapter.classify(tensor).await {
                Ok((label, confidence)) => {
                    return Ok(PredictionResult {
                        label: normalize_key(&label),
                        confidence,
                        source: adapter.name(),
                    });
                }
                Err(reason) => {
                    tracing::warn!(
                        provider = adapter.name(),
                        %reason,
                        "classifier unavailable, advancing chain"
                    );
                }
            }
        }
        Err(ScanError::PredictionFailed)
    }
}

/// Pay-per-call remote vision service: uploads the normalized image as PNG
/// and takes the best-scored prediction from the response.
pub struct RemoteVisionClassifier {
    http: Client,
    url: String,
    api_key: String,
}

impl RemoteVisionClassifier {
    pub fn new(http: Client, cfg: &VisionApiConfig) -> Self {
        Self {
            http,
            url: cfg.url.clone(),
            api_key: cfg.api_key.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VisionPrediction {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
struct VisionResponse {
    #[serde(default)]
    predictions: Vec<VisionPrediction>,
}

#[async_trait]
impl Classifier for RemoteVisionClassifier {
    fn name(&self) -> &'static str {
        "remote_vision_api"
    }

    async fn classify(&self, tensor: &ImageTensor) -> Result<(String, f64), Unavailable> {
        let png = tensor
            .to_png()
            .map_err(|e| Unavailable(format!("png encode: {e}")))?;

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "image/png")
            .body(png)
            .send()
            .await
            .map_err(|e| Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Unavailable(format!("status {}", response.status())));
        }

        let body: VisionResponse = response
            .json()
            .await
            .map_err(|e| Unavailable(format!("bad payload: {e}")))?;

        body.predictions
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|p| (p.label, p.score))
            .ok_or_else(|| Unavailable("empty prediction set".into()))
    }
}

/// Deterministic degraded-mode classifier: a fixed prediction set, best
/// entry wins. Last in the chain so a scan always gets an answer even with
/// no model and no network.
pub struct SimulatedClassifier {
    predictions: Vec<(String, f64)>,
}

impl SimulatedClassifier {
    pub fn with_predictions(predictions: Vec<(String, f64)>) -> Self {
        Self { predictions }
    }

    /// Always answers with exactly this label and confidence.
    pub fn fixed(label: &str, confidence: f64) -> Self {
        Self::with_predictions(vec![(label.to_string(), confidence)])
    }
}

impl Default for SimulatedClassifier {
    fn default() -> Self {
        Self::with_predictions(vec![
            ("chicken_tikka".to_string(), 0.85),
            ("butter_chicken".to_string(), 0.10),
            ("egg_biryani".to_string(), 0.05),
        ])
    }
}

#[async_trait]
impl Classifier for SimulatedClassifier {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn classify(&self, _tensor: &ImageTensor) -> Result<(String, f64), Unavailable> {
        self.predictions
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .cloned()
            .ok_or_else(|| Unavailable("no simulated predictions configured".into()))
    }
}

#[cfg(test)]
mod classifier_tests {
    use super::*;
    use crate::scan::image::{image_tests::sample_png, ImageNormalizer};

    struct DownClassifier;

    #[async_trait]
    impl Classifier for DownClassifier {
        fn name(&self) -> &'static str {
            "down"
        }

        async fn classify(&self, _tensor: &ImageTensor) -> Result<(String, f64), Unavailable> {
            Err(Unavailable("timed out".into()))
        }
    }

    struct LowConfidenceClassifier;

    #[async_trait]
    impl Classifier for LowConfidenceClassifier {
        fn name(&self) -> &'static str {
            "hesitant"
        }

        async fn classify(&self, _tensor: &ImageTensor) -> Result<(String, f64), Unavailable> {
            Ok(("Egg Biryani".to_string(), 0.05))
        }
    }

    fn tensor() -> ImageTensor {
        ImageNormalizer::new(32).normalize(&sample_png()).unwrap()
    }

    #[tokio::test]
    async fn test_unavailable_adapter_advances_to_next() {
        let chain = ClassifierChain::new(vec![
            Arc::new(DownClassifier),
            Arc::new(SimulatedClassifier::default()),
        ]);
        let result = chain.classify(&tensor()).await.unwrap();
        assert_eq!(result.label, "chicken_tikka");
        assert_eq!(result.source, "simulated");
        assert!((result.confidence - 0.85).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_low_confidence_success_is_not_retried_downstream() {
        // The second adapter would answer with 0.85, but a successful
        // low-confidence call wins because it is not "unavailable".
        let chain = ClassifierChain::new(vec![
            Arc::new(LowConfidenceClassifier),
            Arc::new(SimulatedClassifier::default()),
        ]);
        let result = chain.classify(&tensor()).await.unwrap();
        assert_eq!(result.source, "hesitant");
        assert!((result.confidence - 0.05).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_labels_are_normalized() {
        let chain = ClassifierChain::new(vec![Arc::new(LowConfidenceClassifier)]);
        let result = chain.classify(&tensor()).await.unwrap();
        assert_eq!(result.label, "egg_biryani");
    }

    #[tokio::test]
    async fn test_exhausted_chain_is_a_prediction_failure() {
        let chain = ClassifierChain::new(vec![Arc::new(DownClassifier), Arc::new(DownClassifier)]);
        let err = chain.classify(&tensor()).await.unwrap_err();
        assert!(matches!(err, ScanError::PredictionFailed));
    }

    #[tokio::test]
    async fn test_simulated_default_picks_best_prediction() {
        let sim = SimulatedClassifier::default();
        let (label, confidence) = sim.classify(&tensor()).await.unwrap();
        assert_eq!(label, "chicken_tikka");
        assert!((confidence - 0.85).abs() < 1e-9);
    }
}
