pub mod dto;
pub mod handlers;
pub mod metrics;
pub mod repo;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::{PgProfileRepo, ProfileRepo};
pub use services::resolve_user;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
