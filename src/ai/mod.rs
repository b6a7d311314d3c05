pub mod api_types;
pub mod assistant;
pub mod detector;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use tracing::{info, warn};

use crate::config::AiConfig;
use crate::state::AppState;

pub use assistant::Assistant;
pub use detector::IngredientDetector;

pub fn router() -> Router<AppState> {
    handlers::routes()
}

/// Builds the detector from config; an unset URL disables detection.
pub fn detector_from_config(cfg: &AiConfig) -> anyhow::Result<Arc<dyn IngredientDetector>> {
    match cfg.detector_url.as_deref() {
        Some(url) => {
            info!(%url, min_confidence = cfg.detector_min_confidence, "ingredient detector enabled");
            let detector =
                detector::HttpDetector::new(url, cfg.detector_min_confidence, cfg.timeout_secs)?;
            Ok(Arc::new(detector))
        }
        None => {
            warn!("DETECTOR_URL not set, detection returns no ingredients");
            Ok(Arc::new(detector::DisabledDetector))
        }
    }
}

/// Builds the generative client; without an API key every call degrades.
pub fn assistant_from_config(cfg: &AiConfig) -> anyhow::Result<Arc<dyn Assistant>> {
    match cfg.gemini_api_key.clone() {
        Some(key) => {
            info!(model = %cfg.gemini_model, "gemini assistant enabled");
            Ok(Arc::new(assistant::GeminiClient::new(key, cfg)?))
        }
        None => {
            warn!("GEMINI_API_KEY not set, AI answers fall back to apologies");
            Ok(Arc::new(assistant::DisabledAssistant))
        }
    }
}
