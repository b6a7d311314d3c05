pub mod catalog;
pub mod handlers;
pub mod repo;

use crate::state::AppState;
use axum::Router;

pub use repo::{ActivityRepo, PgActivityRepo};

pub fn router() -> Router<AppState> {
    handlers::routes()
}
