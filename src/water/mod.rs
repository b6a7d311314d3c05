pub mod handlers;
pub mod hydration;
pub mod repo;

use crate::state::AppState;
use axum::Router;

pub use repo::{PgWaterRepo, WaterRepo};

pub fn router() -> Router<AppState> {
    handlers::routes()
}
