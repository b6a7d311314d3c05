use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{OnboardingRequest, ProfileView, ResetResponse, SaveProfileResponse};
use super::services::{resolve_user, save_profile};
use crate::{dates, error::ApiError, response::ApiResponse, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/save-profile", post(save))
        .route("/get-profile/:firebase_id", get(get_profile))
        .route("/reset-user-progress/:firebase_id", delete(reset_progress))
}

#[instrument(skip(state, payload), fields(firebase_id = %payload.firebase_id))]
pub async fn save(
    State(state): State<AppState>,
    Json(payload): Json<OnboardingRequest>,
) -> Result<ApiResponse<SaveProfileResponse>, ApiError> {
    let (saved, metrics) = save_profile(state.profiles.as_ref(), &payload, dates::today()).await?;
    Ok(ApiResponse::ok_with_message(
        SaveProfileResponse::new(saved.firebase_id, &metrics),
        "Success",
    ))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(firebase_id): Path<String>,
) -> Result<ApiResponse<ProfileView>, ApiError> {
    let profile = resolve_user(state.profiles.as_ref(), &firebase_id).await?;
    Ok(ApiResponse::ok(profile.into()))
}

#[instrument(skip(state))]
pub async fn reset_progress(
    State(state): State<AppState>,
    Path(firebase_id): Path<String>,
) -> Result<ApiResponse<ResetResponse>, ApiError> {
    let user = resolve_user(state.profiles.as_ref(), &firebase_id).await?;
    let deleted = state.profiles.reset_progress(user.id).await?;
    info!(
        %firebase_id,
        food_logs = deleted.food_logs,
        activity_logs = deleted.activity_logs,
        water_logs = deleted.water_logs,
        "progress reset"
    );
    Ok(ApiResponse::ok(ResetResponse {
        firebase_id,
        deleted,
    }))
}
