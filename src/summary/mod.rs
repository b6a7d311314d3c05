pub mod aggregator;
pub mod handlers;

use crate::state::AppState;
use axum::Router;

pub use aggregator::{DailySummary, DailySummaryAggregator};

pub fn router() -> Router<AppState> {
    handlers::routes()
}
