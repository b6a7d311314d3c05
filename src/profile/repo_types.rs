use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Row of `user_profile`.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub firebase_id: String,
    pub email: String,
    pub nickname: String,
    pub character_id: Option<String>,
    pub goal_type: String,
    pub gender: String,
    pub date_of_birth: Date,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: f64,
    pub lifestyle_name: String,
    pub target_weight_kg: f64,
    pub target_rate_kg_per_week: f64,
    pub bmi: f64,
    pub bmr: f64,
    pub tdee: f64,
    // nullable for rows imported before targets existed
    pub daily_calorie: Option<f64>,
    pub daily_water_l: Option<f64>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Full replacement written on every onboarding submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub firebase_id: String,
    pub email: String,
    pub nickname: String,
    pub character_id: Option<String>,
    pub goal_type: String,
    pub gender: String,
    pub date_of_birth: Date,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: f64,
    pub lifestyle_name: String,
    pub target_weight_kg: f64,
    pub target_rate_kg_per_week: f64,
    pub bmi: f64,
    pub bmr: f64,
    pub tdee: f64,
    pub daily_calorie: f64,
    pub daily_water_l: f64,
}

/// Rows removed by a progress reset, per log table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ResetCounts {
    pub food_logs: u64,
    pub activity_logs: u64,
    pub water_logs: u64,
}
