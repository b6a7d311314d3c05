pub mod handlers;
pub mod reconciler;
pub mod repo;
pub mod slot;

use crate::state::AppState;
use axum::Router;

pub use repo::{FoodLogRepo, NutritionTotals, PgFoodLogRepo};
pub use slot::MealSlot;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
