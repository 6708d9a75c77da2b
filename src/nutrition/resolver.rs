use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{catalog, NutritionRecord};
use crate::config::NutritionApiConfig;
use crate::error::Unavailable;

/// One step in the nutrition fallback chain.
#[async_trait]
pub trait NutritionProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn resolve(&self, label: &str) -> Result<NutritionRecord, Unavailable>;
}

/// Ordered provider chain. Resolution never fails: when every provider is
/// unavailable or has no match, the generic default record is returned.
pub struct NutritionResolver {
    providers: Vec<Arc<dyn NutritionProvider>>,
}

impl NutritionResolver {
    pub fn new(providers: Vec<Arc<dyn NutritionProvider>>) -> Self {
        Self { providers }
    }

    /// Chain without any remote provider configured.
    pub fn catalog_only() -> Self {
        Self::new(vec![Arc::new(CatalogProvider)])
    }

    pub async fn resolve(&self, label: &str) -> NutritionRecord {
        for provider in &self.providers {
            match provider.resolve(label).await {
                Ok(record) => {
                    tracing::debug!(provider = provider.name(), label, "nutrition resolved");
                    return record;
                }
                Err(reason) => {
                    tracing::warn!(
                        provider = provider.name(),
                        %reason,
                        label,
                        "nutrition provider unavailable"
                    );
                }
            }
        }
        tracing::debug!(label, "no nutrition provider matched, using generic default");
        NutritionRecord::GENERIC_DEFAULT
    }
}

/// Local static catalog: exact match on the normalized key, then the first
/// substring-containment hit in catalog definition order.
pub struct CatalogProvider;

#[async_trait]
impl NutritionProvider for CatalogProvider {
    fn name(&self) -> &'static str {
        "local_catalog"
    }

    async fn resolve(&self, label: &str) -> Result<NutritionRecord, Unavailable> {
        catalog::lookup(label).ok_or_else(|| Unavailable("no catalog match".into()))
    }
}

/// Networked nutrition lookup by label string.
pub struct RemoteNutritionProvider {
    http: Client,
    url: String,
    api_key: String,
}

impl RemoteNutritionProvider {
    pub fn new(http: Client, cfg: &NutritionApiConfig) -> Self {
        Self {
            http,
            url: cfg.url.clone(),
            api_key: cfg.api_key.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RemoteNutritionPayload {
    calories: Option<f64>,
    protein: Option<f64>,
    carbs: Option<f64>,
    fat: Option<f64>,
    fiber: Option<f64>,
}

/// Zero or missing fields from the remote service are substituted with a
/// minimum non-zero value so a clearly-wrong "0 calorie" record never
/// propagates downstream.
fn or_floor(value: Option<f64>, floor: f64) -> f64 {
    match value {
        Some(v) if v > 0.0 => v,
        _ => floor,
    }
}

#[async_trait]
impl NutritionProvider for RemoteNutritionProvider {
    fn name(&self) -> &'static str {
        "remote_nutrition_api"
    }

    async fn resolve(&self, label: &str) -> Result<NutritionRecord, Unavailable> {
        let response = self
            .http
            .get(&self.url)
            .header("x-api-key", &self.api_key)
            .query(&[("query", label)])
            .send()
            .await
            .map_err(|e| Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Unavailable(format!("status {}", response.status())));
        }

        let payload: RemoteNutritionPayload = response
            .json()
            .await
            .map_err(|e| Unavailable(format!("bad payload: {e}")))?;

        Ok(NutritionRecord {
            calories: or_floor(payload.calories, 1.0),
            protein: or_floor(payload.protein, 0.1),
            carbs: or_floor(payload.carbs, 0.1),
            fat: or_floor(payload.fat, 0.1),
            fiber: or_floor(payload.fiber, 0.1),
        })
    }
}

#[cfg(test)]
mod resolver_tests {
    use super::*;

    struct DownProvider;

    #[async_trait]
    impl NutritionProvider for DownProvider {
        fn name(&self) -> &'static str {
            "down"
        }

        async fn resolve(&self, _label: &str) -> Result<NutritionRecord, Unavailable> {
            Err(Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_catalog_keys_resolve_exactly() {
        let resolver = NutritionResolver::catalog_only();
        for (key, record) in catalog::FOOD_CATALOG {
            assert_eq!(resolver.resolve(key).await, *record);
        }
    }

    #[tokio::test]
    async fn test_unmatched_label_falls_back_to_generic_default() {
        let resolver = NutritionResolver::catalog_only();
        assert_eq!(
            resolver.resolve("mystery_object").await,
            NutritionRecord::GENERIC_DEFAULT
        );
    }

    #[tokio::test]
    async fn test_unavailable_provider_advances_the_chain() {
        let resolver = NutritionResolver::new(vec![
            Arc::new(DownProvider),
            Arc::new(CatalogProvider),
        ]);
        let record = resolver.resolve("egg_biryani").await;
        assert_eq!(record, catalog::lookup_exact("egg_biryani").unwrap());
    }

    #[tokio::test]
    async fn test_all_providers_down_still_yields_a_record() {
        let resolver = NutritionResolver::new(vec![Arc::new(DownProvider)]);
        assert_eq!(
            resolver.resolve("egg_biryani").await,
            NutritionRecord::GENERIC_DEFAULT
        );
    }

    #[test]
    fn test_zero_and_missing_fields_get_floored() {
        assert_eq!(or_floor(Some(240.0), 1.0), 240.0);
        assert_eq!(or_floor(Some(0.0), 1.0), 1.0);
        assert_eq!(or_floor(None, 0.1), 0.1);
        assert_eq!(or_floor(Some(-3.0), 0.1), 0.1);
    }
}
