use serde::Deserialize;

/// Settings for the external AI collaborators.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Base URL of the object-detection sidecar. `None` disables detection.
    pub detector_url: Option<String>,
    pub detector_min_confidence: f32,
    /// `None` makes every generative call degrade to its fallback answer.
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub gemini_model: String,
    pub timeout_secs: u64,
}

/// Windowing policies for the "recent" and "favorite" listings.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    pub recent_food_window_days: i64,
    pub recent_activity_limit: usize,
    pub favorite_food_min_count: i64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            recent_food_window_days: 14,
            recent_activity_limit: 20,
            favorite_food_min_count: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub ai: AiConfig,
    pub history: HistoryConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let defaults = HistoryConfig::default();

        let ai = AiConfig {
            detector_url: non_empty_var("DETECTOR_URL"),
            detector_min_confidence: parsed_var("DETECTOR_MIN_CONFIDENCE").unwrap_or(0.4),
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            gemini_api_url: std::env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".into()),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-flash-latest".into()),
            timeout_secs: parsed_var("AI_TIMEOUT_SECS").unwrap_or(30),
        };

        let history = HistoryConfig {
            recent_food_window_days: parsed_var("RECENT_FOOD_WINDOW_DAYS")
                .unwrap_or(defaults.recent_food_window_days),
            recent_activity_limit: parsed_var("RECENT_ACTIVITY_LIMIT")
                .unwrap_or(defaults.recent_activity_limit),
            favorite_food_min_count: parsed_var("FAVORITE_FOOD_MIN_COUNT")
                .unwrap_or(defaults.favorite_food_min_count),
        };

        Ok(Self {
            database_url,
            db_max_connections: parsed_var("DB_MAX_CONNECTIONS").unwrap_or(10),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parsed_var("APP_PORT").unwrap_or(8000),
            ai,
            history,
        })
    }
}

fn parsed_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
