use serde::Serialize;

/// Response body for `POST /scan`.
#[derive(Debug, Serialize)]
pub struct FoodPredictionResponse {
    pub food_item: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub confidence: f64,
}

#[derive(Debug, Serialize)]
pub struct SupportedFoodsResponse {
    pub total_foods: usize,
    pub categories: Vec<&'static str>,
    pub model_status: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ModelStatusResponse {
    pub model_loaded: bool,
    pub input_shape: (u32, u32, u32),
    pub total_supported_foods: usize,
    pub status: &'static str,
}
