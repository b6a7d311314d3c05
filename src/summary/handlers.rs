use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::aggregator::{DailySummary, DailySummaryAggregator};
use crate::{dates, error::ApiError, response::ApiResponse, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/get-daily-summary/:firebase_id", get(daily_summary))
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub date_str: Option<String>,
}

#[instrument(skip(state))]
pub async fn daily_summary(
    State(state): State<AppState>,
    Path(firebase_id): Path<String>,
    Query(q): Query<SummaryQuery>,
) -> Result<ApiResponse<DailySummary>, ApiError> {
    let day = dates::day_or_today(q.date_str.as_deref())?;
    let aggregator = DailySummaryAggregator {
        profiles: state.profiles.as_ref(),
        food_logs: state.food_logs.as_ref(),
        activities: state.activities.as_ref(),
        water: state.water.as_ref(),
    };
    Ok(ApiResponse::ok(aggregator.summarize(&firebase_id, day).await?))
}
