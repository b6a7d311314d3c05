use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::hydration::actual_water_ml;
use super::repo::{Drink, FavoriteSwap, NewWaterLog, SwapOutcome, WaterFavorite, WaterLogView};
use crate::{
    dates,
    error::ApiError,
    favorites::{self, ToggleOutcome},
    profile::resolve_user,
    response::ApiResponse,
    state::AppState,
};

const DRINK_NOT_FOUND: &str = "Water type not found";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/get-all-water-types", get(all_drinks))
        .route("/get-water-favorites/:firebase_id", get(water_favorites))
        .route("/log-water", post(log_water))
        .route("/get-water-logs/:firebase_id", get(water_logs))
        .route("/delete-water-log/:log_id", delete(delete_water_log))
        .route("/update-water-favorite", post(update_water_favorite))
        .route("/toggle-favorite-drink", post(toggle_favorite_drink))
}

#[derive(Debug, Deserialize)]
pub struct LogWaterRequest {
    pub uid: String,
    pub w_id: i64,
    pub amount_ml: i32,
    pub date_str: String,
}

#[derive(Debug, Serialize)]
pub struct LoggedWater {
    pub log_id: i64,
    pub actual_water_ml: f64,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date_str: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeletedLog {
    pub deleted: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFavoriteRequest {
    pub uid: String,
    pub old_w_id: i64,
    pub new_w_id: i64,
    pub new_volume: i32,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteDrinkRequest {
    pub firebase_id: String,
    pub w_id: i64,
}

#[instrument(skip(state))]
pub async fn all_drinks(State(state): State<AppState>) -> Result<ApiResponse<Vec<Drink>>, ApiError> {
    Ok(ApiResponse::ok(state.water.list_drinks().await?))
}

#[instrument(skip(state))]
pub async fn water_favorites(
    State(state): State<AppState>,
    Path(firebase_id): Path<String>,
) -> Result<ApiResponse<Vec<WaterFavorite>>, ApiError> {
    let user = resolve_user(state.profiles.as_ref(), &firebase_id).await?;
    Ok(ApiResponse::ok(state.water.list_favorites(user.id).await?))
}

#[instrument(skip(state, payload), fields(uid = %payload.uid, w_id = payload.w_id))]
pub async fn log_water(
    State(state): State<AppState>,
    Json(payload): Json<LogWaterRequest>,
) -> Result<ApiResponse<LoggedWater>, ApiError> {
    if payload.amount_ml <= 0 {
        return Err(ApiError::Validation("amount_ml must be positive".into()));
    }
    let day = dates::parse_day(&payload.date_str)?;
    let user = resolve_user(state.profiles.as_ref(), &payload.uid).await?;
    let drink = state
        .water
        .find_drink(payload.w_id)
        .await?
        .ok_or(ApiError::NotFound(DRINK_NOT_FOUND))?;

    let actual = actual_water_ml(payload.amount_ml, drink.true_water);
    let log_id = state
        .water
        .insert_log(&NewWaterLog {
            user_id: user.id,
            w_id: drink.w_id,
            volume_ml: payload.amount_ml,
            actual_water_ml: actual,
            log_time: dates::at_current_time(day),
        })
        .await?;

    info!(log_id, actual_water_ml = actual, "water logged");
    Ok(ApiResponse::ok_with_message(
        LoggedWater {
            log_id,
            actual_water_ml: actual,
        },
        "Logged water successfully",
    ))
}

#[instrument(skip(state))]
pub async fn water_logs(
    State(state): State<AppState>,
    Path(firebase_id): Path<String>,
    Query(q): Query<DayQuery>,
) -> Result<ApiResponse<Vec<WaterLogView>>, ApiError> {
    let day = dates::day_or_today(q.date_str.as_deref())?;
    let user = resolve_user(state.profiles.as_ref(), &firebase_id).await?;
    Ok(ApiResponse::ok(state.water.list_logs_for_day(user.id, day).await?))
}

#[instrument(skip(state))]
pub async fn delete_water_log(
    State(state): State<AppState>,
    Path(log_id): Path<i64>,
) -> Result<ApiResponse<DeletedLog>, ApiError> {
    let deleted = state.water.delete_log(log_id).await?;
    if deleted {
        info!(log_id, "water log deleted");
        Ok(ApiResponse::ok_with_message(DeletedLog { deleted }, "Deleted successfully"))
    } else {
        warn!(log_id, "water log already gone");
        Ok(ApiResponse::ok_with_message(DeletedLog { deleted }, "Log not found"))
    }
}

#[instrument(skip(state, payload), fields(uid = %payload.uid))]
pub async fn update_water_favorite(
    State(state): State<AppState>,
    Json(payload): Json<UpdateFavoriteRequest>,
) -> Result<ApiResponse<Vec<WaterFavorite>>, ApiError> {
    if payload.new_volume <= 0 {
        return Err(ApiError::Validation("new_volume must be positive".into()));
    }
    let user = resolve_user(state.profiles.as_ref(), &payload.uid).await?;
    if state.water.find_drink(payload.new_w_id).await?.is_none() {
        return Err(ApiError::NotFound(DRINK_NOT_FOUND));
    }

    let swap = FavoriteSwap {
        user_id: user.id,
        old_w_id: payload.old_w_id,
        new_w_id: payload.new_w_id,
        new_volume: payload.new_volume,
    };
    match state.water.update_favorite(&swap).await? {
        SwapOutcome::Swapped => {}
        SwapOutcome::MissingFavorite => return Err(ApiError::NotFound("Favorite item not found")),
        SwapOutcome::AlreadyFavorite => {
            return Err(ApiError::Validation("drink is already a favorite".into()))
        }
    }
    info!(old_w_id = swap.old_w_id, new_w_id = swap.new_w_id, "water favorite updated");
    Ok(ApiResponse::ok_with_message(
        state.water.list_favorites(user.id).await?,
        "Updated successfully",
    ))
}

#[instrument(skip(state, payload), fields(firebase_id = %payload.firebase_id, w_id = payload.w_id))]
pub async fn toggle_favorite_drink(
    State(state): State<AppState>,
    Json(payload): Json<FavoriteDrinkRequest>,
) -> Result<ApiResponse<ToggleOutcome>, ApiError> {
    let user = resolve_user(state.profiles.as_ref(), &payload.firebase_id).await?;
    let outcome = favorites::toggle(state.water.as_ref(), user.id, payload.w_id)
        .await?
        .ok_or(ApiError::NotFound(DRINK_NOT_FOUND))?;
    info!(action = ?outcome.action, "favorite drink toggled");
    Ok(ApiResponse::ok(outcome))
}
