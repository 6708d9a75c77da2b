use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

/// Remote vision classification service (optional).
#[derive(Debug, Clone, Deserialize)]
pub struct VisionApiConfig {
    pub url: String,
    pub api_key: String,
}

/// Remote nutrition lookup service (optional).
#[derive(Debug, Clone, Deserialize)]
pub struct NutritionApiConfig {
    pub url: String,
    pub api_key: String,
}

/// Locally loaded food classification model (optional).
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub path: Option<String>,
    pub labels_path: Option<String>,
    pub input_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub vision_api: Option<VisionApiConfig>,
    pub nutrition_api: Option<NutritionApiConfig>,
    pub model: ModelConfig,
    /// Daily logs older than this many days are purged by the retention sweeper.
    pub retention_days: i64,
    /// Per-call timeout for remote provider requests.
    pub provider_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "mealscan".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "mealscan-users".into()),
        };

        // Remote providers are opt-in: no URL means the adapter is simply
        // absent from its chain.
        let vision_api = std::env::var("VISION_API_URL").ok().map(|url| VisionApiConfig {
            url,
            api_key: std::env::var("VISION_API_KEY").unwrap_or_default(),
        });
        let nutrition_api = std::env::var("NUTRITION_API_URL")
            .ok()
            .map(|url| NutritionApiConfig {
                url,
                api_key: std::env::var("NUTRITION_API_KEY").unwrap_or_default(),
            });

        let model = ModelConfig {
            path: std::env::var("FOOD_MODEL_PATH").ok(),
            labels_path: std::env::var("FOOD_MODEL_LABELS").ok(),
            input_size: std::env::var("FOOD_MODEL_INPUT_SIZE")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(224),
        };

        let retention_days = std::env::var("LOG_RETENTION_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(7);
        let provider_timeout_secs = std::env::var("PROVIDER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        Ok(Self {
            database_url,
            jwt,
            vision_api,
            nutrition_api,
            model,
            retention_days,
            provider_timeout_secs,
        })
    }
}
