use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::reconciler::{reconcile, FoodLogEvent, LogAction};
use super::repo::{DailyLogEntry, NutritionTotals};
use super::slot::MealSlot;
use crate::{
    dates,
    error::ApiError,
    foods::FoodItem,
    profile::resolve_user,
    ranking::{FrequencyPolicy, ItemStats, RecencyPolicy},
    response::ApiResponse,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/log-food", post(log_food))
        .route("/get-daily-log/:firebase_id", get(daily_log))
        .route("/get-recent-foods/:firebase_id", get(recent_foods))
        .route("/get-favorite-foods/:firebase_id", get(favorite_foods))
}

#[derive(Debug, Deserialize)]
pub struct LogFoodRequest {
    pub firebase_id: String,
    pub food_id: i64,
    /// Free text such as "Bữa sáng".
    pub meal_label: String,
    pub quantity: f64,
    pub log_date: String,
    pub calories: f64,
    pub protein: f64,
    pub carb: f64,
    pub fat: f64,
}

#[derive(Debug, Serialize)]
pub struct LogFoodResponse {
    pub action: LogAction,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date_str: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DailyLogView {
    #[serde(flatten)]
    pub entry: DailyLogEntry,
    pub meal_label: &'static str,
}

impl From<DailyLogEntry> for DailyLogView {
    fn from(entry: DailyLogEntry) -> Self {
        let meal_label = MealSlot::from_code(entry.meal_slot).display_label();
        Self { entry, meal_label }
    }
}

#[instrument(skip(state, payload), fields(firebase_id = %payload.firebase_id, food_id = payload.food_id))]
pub async fn log_food(
    State(state): State<AppState>,
    Json(payload): Json<LogFoodRequest>,
) -> Result<ApiResponse<LogFoodResponse>, ApiError> {
    let log_date = dates::parse_day(&payload.log_date)?;
    let user = resolve_user(state.profiles.as_ref(), &payload.firebase_id).await?;

    let event = FoodLogEvent {
        user_id: user.id,
        food_id: payload.food_id,
        meal_label: payload.meal_label,
        quantity: payload.quantity,
        log_date,
        nutrition: NutritionTotals {
            calories: payload.calories,
            protein: payload.protein,
            carb: payload.carb,
            fat: payload.fat,
        },
    };
    let action = reconcile(state.food_logs.as_ref(), &event)
        .await?
        .ok_or(ApiError::NotFound("Food not found"))?;
    let message = match action {
        LogAction::Deleted => "Item deleted",
        LogAction::Inserted | LogAction::Updated => "Saved successfully",
    };
    Ok(ApiResponse::ok_with_message(LogFoodResponse { action }, message))
}

#[instrument(skip(state))]
pub async fn daily_log(
    State(state): State<AppState>,
    Path(firebase_id): Path<String>,
    Query(q): Query<DayQuery>,
) -> Result<ApiResponse<Vec<DailyLogView>>, ApiError> {
    let day = dates::day_or_today(q.date_str.as_deref())?;
    let user = resolve_user(state.profiles.as_ref(), &firebase_id).await?;
    let entries = state.food_logs.list_for_day(user.id, day).await?;
    Ok(ApiResponse::ok(entries.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn recent_foods(
    State(state): State<AppState>,
    Path(firebase_id): Path<String>,
) -> Result<ApiResponse<Vec<ItemStats<FoodItem>>>, ApiError> {
    let user = resolve_user(state.profiles.as_ref(), &firebase_id).await?;
    let policy = RecencyPolicy::window(state.config.history.recent_food_window_days);
    let today = dates::today();
    let stats = state.food_logs.item_stats(user.id, policy.since(today)).await?;
    Ok(ApiResponse::ok(policy.apply(today, stats)))
}

#[instrument(skip(state))]
pub async fn favorite_foods(
    State(state): State<AppState>,
    Path(firebase_id): Path<String>,
) -> Result<ApiResponse<Vec<ItemStats<FoodItem>>>, ApiError> {
    let user = resolve_user(state.profiles.as_ref(), &firebase_id).await?;
    let policy = FrequencyPolicy {
        min_count: state.config.history.favorite_food_min_count,
    };
    let stats = state.food_logs.item_stats(user.id, None).await?;
    Ok(ApiResponse::ok(policy.apply(stats)))
}
