use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::Date;

use super::metrics::{Goal, Metrics, MetricsInput, Sex};
use super::repo_types::{ResetCounts, UserProfile};
use crate::error::ApiError;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex");
}

/// Body of `POST /api/save-profile`, as sent by the onboarding flow.
#[derive(Debug, Clone, Deserialize)]
pub struct OnboardingRequest {
    pub firebase_id: String,
    pub email: String,
    pub nickname: String,
    #[serde(default)]
    pub character_id: Option<String>,
    pub gender: String,
    pub age: i32,
    /// cm
    pub height: f64,
    /// kg
    pub weight: f64,
    pub activity_level: f64,
    pub goal_type: String,
    pub target_weight: f64,
    /// kg per week
    pub weight_speed: f64,
}

impl OnboardingRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.firebase_id.trim().is_empty() {
            return Err(ApiError::Validation("firebase_id is required".into()));
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ApiError::Validation("invalid email".into()));
        }
        if !(1..=120).contains(&self.age) {
            return Err(ApiError::Validation("age must be between 1 and 120".into()));
        }
        if !(50.0..=300.0).contains(&self.height) {
            return Err(ApiError::Validation("height must be between 50 and 300 cm".into()));
        }
        if !(20.0..=500.0).contains(&self.weight) {
            return Err(ApiError::Validation("weight must be between 20 and 500 kg".into()));
        }
        if !(self.activity_level > 0.0) {
            return Err(ApiError::Validation("activity_level must be positive".into()));
        }
        if !(self.weight_speed >= 0.0) {
            return Err(ApiError::Validation("weight_speed must not be negative".into()));
        }
        Ok(())
    }

    pub fn metrics_input(&self) -> MetricsInput {
        MetricsInput {
            sex: Sex::from_label(&self.gender),
            age: self.age,
            height_cm: self.height,
            weight_kg: self.weight,
            activity_level: self.activity_level,
            goal: Goal::from_label(&self.goal_type),
            weight_change_rate_kg_per_week: self.weight_speed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveProfileResponse {
    pub firebase_id: String,
    pub lifestyle: &'static str,
    pub bmi: f64,
    pub bmr: f64,
    pub tdee: f64,
    pub daily_calorie: f64,
    pub daily_water_l: f64,
}

impl SaveProfileResponse {
    pub fn new(firebase_id: String, m: &Metrics) -> Self {
        Self {
            firebase_id,
            lifestyle: m.lifestyle.as_str(),
            bmi: m.bmi,
            bmr: m.bmr,
            tdee: m.tdee,
            daily_calorie: m.daily_calorie_target,
            daily_water_l: m.daily_water_target_l,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileView {
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
    pub daily_calorie: Option<f64>,
    pub daily_water_l: Option<f64>,
}

impl From<UserProfile> for ProfileView {
    fn from(p: UserProfile) -> Self {
        Self {
            firebase_id: p.firebase_id,
            email: p.email,
            nickname: p.nickname,
            character_id: p.character_id,
            goal_type: p.goal_type,
            gender: p.gender,
            date_of_birth: p.date_of_birth,
            height_cm: p.height_cm,
            weight_kg: p.weight_kg,
            activity_level: p.activity_level,
            lifestyle_name: p.lifestyle_name,
            target_weight_kg: p.target_weight_kg,
            target_rate_kg_per_week: p.target_rate_kg_per_week,
            bmi: p.bmi,
            bmr: p.bmr,
            tdee: p.tdee,
            daily_calorie: p.daily_calorie,
            daily_water_l: p.daily_water_l,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub firebase_id: String,
    pub deleted: ResetCounts,
}

#[cfg(test)]
pub(crate) fn sample_onboarding(firebase_id: &str) -> OnboardingRequest {
    OnboardingRequest {
        firebase_id: firebase_id.into(),
        email: "nana@example.com".into(),
        nickname: "Nana".into(),
        character_id: Some("cat".into()),
        gender: "male".into(),
        age: 30,
        height: 175.0,
        weight: 70.0,
        activity_level: 1.55,
        goal_type: "maintain".into(),
        target_weight: 68.0,
        weight_speed: 0.5,
    }
}
