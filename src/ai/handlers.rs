use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use super::assistant::{chat_or_apologize, suggest_or_apologize, ProfileContext, Recommendation};
use crate::{error::ApiError, profile::resolve_user, response::ApiResponse, state::AppState};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/detect",
            post(detect).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/suggest", post(suggest))
        .route("/chat", post(chat))
}

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub ingredients: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub firebase_id: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub degraded: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub degraded: bool,
}

/// POST /detect, multipart field `file`.
#[instrument(skip(state, mp))]
pub async fn detect(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<ApiResponse<DetectResponse>, ApiError> {
    let mut upload = None;
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("malformed upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_type.starts_with("image/") {
            return Err(ApiError::Validation("file must be an image".into()));
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("malformed upload: {e}")))?;
        upload = Some((data, content_type));
        break;
    }

    let (data, content_type) = upload.ok_or_else(|| ApiError::Validation("file is required".into()))?;
    if data.is_empty() {
        return Err(ApiError::Validation("file is empty".into()));
    }

    let size = data.len();
    let ingredients = state.detector.detect(data, &content_type).await.map_err(|e| {
        error!(error = %e, size, "detection failed");
        ApiError::Upstream(format!("{e:#}"))
    })?;
    info!(size, found = ingredients.len(), "image classified");
    Ok(ApiResponse::ok(DetectResponse { ingredients }))
}

#[instrument(skip(state, payload), fields(firebase_id = %payload.firebase_id))]
pub async fn suggest(
    State(state): State<AppState>,
    Json(payload): Json<SuggestRequest>,
) -> Result<ApiResponse<SuggestResponse>, ApiError> {
    let ingredients: Vec<String> = payload
        .ingredients
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if ingredients.is_empty() {
        return Err(ApiError::Validation("ingredients must not be empty".into()));
    }

    let user = resolve_user(state.profiles.as_ref(), &payload.firebase_id).await?;
    let ctx = ProfileContext {
        nickname: user.nickname,
        goal: user.goal_type,
        daily_calorie_target: user.daily_calorie,
    };
    let answer = suggest_or_apologize(state.assistant.as_ref(), &ctx, &ingredients).await;
    Ok(ApiResponse::ok(SuggestResponse {
        recommendation: answer.value,
        degraded: answer.degraded,
    }))
}

#[instrument(skip(state, payload))]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<ApiResponse<ChatReply>, ApiError> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(ApiError::Validation("message must not be empty".into()));
    }
    let answer = chat_or_apologize(state.assistant.as_ref(), message).await;
    Ok(ApiResponse::ok(ChatReply {
        reply: answer.value,
        degraded: answer.degraded,
    }))
}
