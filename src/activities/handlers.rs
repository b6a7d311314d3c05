use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::catalog::{group_activities, order_by_ids, ActivityGroup, ActivityListing};
use super::repo::{CatalogFilter, NewActivityLog};
use crate::{
    dates,
    error::ApiError,
    favorites::{self, ToggleOutcome},
    profile::resolve_user,
    ranking::RecencyPolicy,
    response::ApiResponse,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/activities", get(list_activities))
        .route("/log-activity", post(log_activity))
        .route("/toggle-favorite-activity", post(toggle_favorite))
}

#[derive(Debug, Deserialize)]
pub struct ActivitiesQuery {
    pub category: Option<String>,
    pub firebase_uid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LogActivityRequest {
    pub firebase_id: String,
    pub level_id: i64,
    pub duration_minutes: i32,
    pub calories_burned: f64,
    pub log_date: String,
}

#[derive(Debug, Serialize)]
pub struct LoggedActivity {
    pub log_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteActivityRequest {
    pub firebase_id: String,
    pub activity_id: i64,
}

#[instrument(skip(state))]
pub async fn list_activities(
    State(state): State<AppState>,
    Query(q): Query<ActivitiesQuery>,
) -> Result<ApiResponse<Vec<ActivityGroup>>, ApiError> {
    let listing = ActivityListing::from_label(q.category.as_deref());

    // An unknown caller still sees the catalog, just without personal flags.
    let user_id = match q.firebase_uid.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(uid) => state.profiles.find_by_firebase_id(uid).await?.map(|p| p.id),
        None => None,
    };

    let groups = match (listing, user_id) {
        (ActivityListing::Popular, _) => {
            let rows = state.activities.catalog_rows(user_id, &CatalogFilter::All).await?;
            group_activities(rows)
        }
        (ActivityListing::Category(category), _) => {
            let filter = CatalogFilter::Category(category);
            group_activities(state.activities.catalog_rows(user_id, &filter).await?)
        }
        (ActivityListing::Favorites | ActivityListing::Recent, None) => Vec::new(),
        (ActivityListing::Favorites, Some(uid)) => {
            let rows = state
                .activities
                .catalog_rows(Some(uid), &CatalogFilter::FavoritesOnly)
                .await?;
            group_activities(rows)
        }
        (ActivityListing::Recent, Some(uid)) => {
            let policy = RecencyPolicy::capped(state.config.history.recent_activity_limit);
            let ranked = policy.apply(dates::today(), state.activities.item_stats(uid).await?);
            let ids: Vec<i64> = ranked.into_iter().map(|s| s.item).collect();
            if ids.is_empty() {
                Vec::new()
            } else {
                let filter = CatalogFilter::Ids(ids.clone());
                let rows = state.activities.catalog_rows(Some(uid), &filter).await?;
                order_by_ids(group_activities(rows), &ids)
            }
        }
    };
    Ok(ApiResponse::ok(groups))
}

#[instrument(skip(state, payload), fields(firebase_id = %payload.firebase_id, level_id = payload.level_id))]
pub async fn log_activity(
    State(state): State<AppState>,
    Json(payload): Json<LogActivityRequest>,
) -> Result<ApiResponse<LoggedActivity>, ApiError> {
    if payload.duration_minutes < 0 {
        return Err(ApiError::Validation("duration_minutes must not be negative".into()));
    }
    if !(payload.calories_burned >= 0.0) {
        return Err(ApiError::Validation("calories_burned must not be negative".into()));
    }
    let log_date = dates::parse_day(&payload.log_date)?;
    let user = resolve_user(state.profiles.as_ref(), &payload.firebase_id).await?;

    let log_id = state
        .activities
        .insert_log(&NewActivityLog {
            user_id: user.id,
            level_id: payload.level_id,
            duration_minutes: payload.duration_minutes,
            calories_burned: payload.calories_burned,
            log_date,
        })
        .await?
        .ok_or(ApiError::NotFound("Activity level not found"))?;

    info!(log_id, calories_burned = payload.calories_burned, "activity logged");
    Ok(ApiResponse::ok_with_message(LoggedActivity { log_id }, "Logged successfully"))
}

#[instrument(skip(state, payload), fields(firebase_id = %payload.firebase_id, activity_id = payload.activity_id))]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Json(payload): Json<FavoriteActivityRequest>,
) -> Result<ApiResponse<ToggleOutcome>, ApiError> {
    let user = resolve_user(state.profiles.as_ref(), &payload.firebase_id).await?;
    let outcome = favorites::toggle(state.activities.as_ref(), user.id, payload.activity_id)
        .await?
        .ok_or(ApiError::NotFound("Activity not found"))?;
    info!(action = ?outcome.action, "favorite activity toggled");
    Ok(ApiResponse::ok(outcome))
}
