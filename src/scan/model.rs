use std::sync::Arc;

use async_trait::async_trait;
use tract_onnx::prelude::*;

use super::classifier::Classifier;
use super::image::ImageTensor;
use crate::config::ModelConfig;
use crate::error::Unavailable;

type LoadedModel = TypedRunnableModel<TypedModel>;

/// Optionally loaded local ONNX food classifier.
///
/// A missing or unreadable model file leaves the adapter unloaded instead of
/// failing startup; an unloaded adapter reports `Unavailable` so the chain
/// falls through to the next provider.
pub struct LocalModelClassifier {
    model: Option<Arc<LoadedModel>>,
    class_names: Vec<String>,
    input_size: u32,
}

impl LocalModelClassifier {
    pub fn load(cfg: &ModelConfig) -> Self {
        let model = cfg.path.as_deref().and_then(|path| {
            match Self::load_model(path, cfg.input_size) {
                Ok(loaded) => {
                    tracing::info!(path, input_size = cfg.input_size, "local food model loaded");
                    Some(Arc::new(loaded))
                }
                Err(e) => {
                    tracing::warn!(path, error = %e, "failed to load local food model, adapter disabled");
                    None
                }
            }
        });

        let class_names = cfg
            .labels_path
            .as_deref()
            .map(Self::load_class_names)
            .unwrap_or_default();
        if !class_names.is_empty() {
            tracing::info!(count = class_names.len(), "loaded model class names");
        }

        Self {
            model,
            class_names,
            input_size: cfg.input_size,
        }
    }

    fn load_model(path: &str, input_size: u32) -> TractResult<LoadedModel> {
        let s = i64::from(input_size);
        tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(0, InferenceFact::dt_shape(f32::datum_type(), tvec!(1, s, s, 3)))?
            .into_optimized()?
            .into_runnable()
    }

    /// One class name per line, in output-index order.
    fn load_class_names(path: &str) -> Vec<String> {
        match std::fs::read_to_string(path) {
            Ok(contents) => contents
                .lines()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .collect(),
            Err(e) => {
                tracing::warn!(path, error = %e, "failed to read model class names");
                Vec::new()
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn input_shape(&self) -> (u32, u32, u32) {
        (self.input_size, self.input_size, 3)
    }
}

#[async_trait]
impl Classifier for LocalModelClassifier {
    fn name(&self) -> &'static str {
        "local_model"
    }

    async fn classify(&self, tensor: &ImageTensor) -> Result<(String, f64), Unavailable> {
        let Some(model) = self.model.clone() else {
            return Err(Unavailable("no local model loaded".into()));
        };

        let shape = tensor.shape().to_vec();
        let data = tensor.to_vec();

        // Inference is CPU-bound; keep it off the async workers.
        let (index, score) = tokio::task::spawn_blocking(move || -> anyhow::Result<(usize, f32)> {
            let input = Tensor::from_shape(&shape, &data)?;
            let outputs = model.run(tvec!(input.into()))?;
            let scores = outputs[0].to_array_view::<f32>()?;
            scores
                .iter()
                .copied()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .ok_or_else(|| anyhow::anyhow!("empty output tensor"))
        })
        .await
        .map_err(|e| Unavailable(format!("inference task failed: {e}")))?
        .map_err(|e| Unavailable(format!("inference failed: {e}")))?;

        let label = self
            .class_names
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("class_{index}"));
        Ok((label, f64::from(score).clamp(0.0, 1.0)))
    }
}
