use serde::Serialize;
use time::Date;

use crate::activities::ActivityRepo;
use crate::error::ApiError;
use crate::food_log::FoodLogRepo;
use crate::profile::metrics::round2;
use crate::profile::{resolve_user, ProfileRepo};
use crate::water::WaterRepo;

pub const DEFAULT_TARGET_CALORIES: f64 = 2000.0;
pub const DEFAULT_TARGET_WATER_L: f64 = 2.0;

/// A user's day: what was eaten, burned and drunk against the stored targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailySummary {
    pub consumed_calories: f64,
    pub consumed_protein: f64,
    pub consumed_carbs: f64,
    pub consumed_fat: f64,
    pub burned_calories: f64,
    pub consumed_water_ml: i64,
    pub target_calories: f64,
    pub target_water_ml: f64,
}

/// Reads the stored targets and same-day totals. Nothing is cached.
pub struct DailySummaryAggregator<'a> {
    pub profiles: &'a dyn ProfileRepo,
    pub food_logs: &'a dyn FoodLogRepo,
    pub activities: &'a dyn ActivityRepo,
    pub water: &'a dyn WaterRepo,
}

impl DailySummaryAggregator<'_> {
    /// Only an unknown identity fails; missing targets and empty days degrade to defaults and zeros.
    pub async fn summarize(&self, firebase_id: &str, day: Date) -> Result<DailySummary, ApiError> {
        let user = resolve_user(self.profiles, firebase_id).await?;

        let food = self.food_logs.sum_for_day(user.id, day).await?;
        let burned = self.activities.sum_burned(user.id, day).await?;
        let water_ml = self.water.sum_actual_ml(user.id, day).await?;

        let target_calories = stored_or(user.daily_calorie, DEFAULT_TARGET_CALORIES);
        let target_water_l = stored_or(user.daily_water_l, DEFAULT_TARGET_WATER_L);

        Ok(DailySummary {
            consumed_calories: food.calories,
            consumed_protein: food.protein,
            consumed_carbs: food.carb,
            consumed_fat: food.fat,
            burned_calories: burned,
            consumed_water_ml: water_ml.trunc() as i64,
            target_calories,
            target_water_ml: round2(target_water_l * 1000.0),
        })
    }
}

/// Unset and zero targets both fall back to the default.
fn stored_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| *v != 0.0 && v.is_finite()).unwrap_or(default)
}
