use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::repo::{FoodItem, SEARCH_LIMIT};
use crate::{error::ApiError, response::ApiResponse, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods))
        .route("/get-foods-by-category", get(foods_by_category))
        .route("/search-food", get(search_food))
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[instrument(skip(state))]
pub async fn list_foods(State(state): State<AppState>) -> Result<ApiResponse<Vec<FoodItem>>, ApiError> {
    Ok(ApiResponse::ok(state.foods.list().await?))
}

#[instrument(skip(state))]
pub async fn foods_by_category(
    State(state): State<AppState>,
    Query(q): Query<CategoryQuery>,
) -> Result<ApiResponse<Vec<FoodItem>>, ApiError> {
    Ok(ApiResponse::ok(state.foods.by_category(&q.category).await?))
}

#[instrument(skip(state))]
pub async fn search_food(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<ApiResponse<Vec<FoodItem>>, ApiError> {
    let needle = q.q.trim();
    if needle.is_empty() {
        return Err(ApiError::Validation("q must not be empty".into()));
    }
    Ok(ApiResponse::ok(state.foods.search(needle, SEARCH_LIMIT).await?))
}
