use tracing::info;

use super::dto::OnboardingRequest;
use super::metrics::{self, Metrics};
use super::repo::ProfileRepo;
use super::repo_types::{NewProfile, UserProfile};
use crate::error::ApiError;

pub const USER_NOT_FOUND: &str = "User not found";

/// Maps an external identity to its stored profile.
pub async fn resolve_user(
    repo: &dyn ProfileRepo,
    firebase_id: &str,
) -> Result<UserProfile, ApiError> {
    repo.find_by_firebase_id(firebase_id)
        .await?
        .ok_or(ApiError::NotFound(USER_NOT_FOUND))
}

/// Recomputes every derived target and overwrites the whole profile in one write.
pub async fn save_profile(
    repo: &dyn ProfileRepo,
    req: &OnboardingRequest,
    today: time::Date,
) -> Result<(UserProfile, Metrics), ApiError> {
    req.validate()?;
    let m = metrics::calculate(&req.metrics_input(), today);

    let new = NewProfile {
        firebase_id: req.firebase_id.trim().to_string(),
        email: req.email.trim().to_string(),
        nickname: req.nickname.clone(),
        character_id: req.character_id.clone(),
        goal_type: req.goal_type.clone(),
        gender: req.gender.clone(),
        date_of_birth: m.dob_estimate,
        height_cm: req.height,
        weight_kg: req.weight,
        activity_level: req.activity_level,
        lifestyle_name: m.lifestyle.as_str().to_string(),
        target_weight_kg: req.target_weight,
        target_rate_kg_per_week: req.weight_speed,
        bmi: m.bmi,
        bmr: m.bmr,
        tdee: m.tdee,
        daily_calorie: m.daily_calorie_target,
        daily_water_l: m.daily_water_target_l,
    };
    let saved = repo.upsert(&new).await?;
    info!(firebase_id = %saved.firebase_id, daily_calorie = m.daily_calorie_target, "profile saved");
    Ok((saved, m))
}
