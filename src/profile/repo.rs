use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewProfile, ResetCounts, UserProfile};

#[async_trait]
pub trait ProfileRepo: Send + Sync {
    async fn find_by_firebase_id(&self, firebase_id: &str) -> anyhow::Result<Option<UserProfile>>;
    /// Inserts or fully overwrites the profile keyed by `firebase_id`.
    async fn upsert(&self, profile: &NewProfile) -> anyhow::Result<UserProfile>;
    /// Clears the user's food, activity and water logs atomically.
    async fn reset_progress(&self, user_id: Uuid) -> anyhow::Result<ResetCounts>;
}

const PROFILE_COLUMNS: &str = r#"
    id, firebase_id, email, nickname, character_id, goal_type, gender, date_of_birth,
    height_cm, weight_kg, activity_level, lifestyle_name, target_weight_kg,
    target_rate_kg_per_week, bmi, bmr, tdee, daily_calorie, daily_water_l,
    created_at, updated_at
"#;

#[derive(Clone)]
pub struct PgProfileRepo {
    db: PgPool,
}

impl PgProfileRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepo for PgProfileRepo {
    async fn find_by_firebase_id(&self, firebase_id: &str) -> anyhow::Result<Option<UserProfile>> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM user_profile WHERE firebase_id = $1");
        let profile = sqlx::query_as::<_, UserProfile>(&sql)
            .bind(firebase_id)
            .fetch_optional(&self.db)
            .await
            .context("find profile by firebase_id")?;
        Ok(profile)
    }

    async fn upsert(&self, p: &NewProfile) -> anyhow::Result<UserProfile> {
        let sql = format!(
            r#"
            INSERT INTO user_profile (
                firebase_id, email, nickname, character_id, goal_type, gender, date_of_birth,
                height_cm, weight_kg, activity_level, lifestyle_name, target_weight_kg,
                target_rate_kg_per_week, bmi, bmr, tdee, daily_calorie, daily_water_l
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            ON CONFLICT (firebase_id) DO UPDATE SET
                email = EXCLUDED.email,
                nickname = EXCLUDED.nickname,
                character_id = EXCLUDED.character_id,
                goal_type = EXCLUDED.goal_type,
                gender = EXCLUDED.gender,
                date_of_birth = EXCLUDED.date_of_birth,
                height_cm = EXCLUDED.height_cm,
                weight_kg = EXCLUDED.weight_kg,
                activity_level = EXCLUDED.activity_level,
                lifestyle_name = EXCLUDED.lifestyle_name,
                target_weight_kg = EXCLUDED.target_weight_kg,
                target_rate_kg_per_week = EXCLUDED.target_rate_kg_per_week,
                bmi = EXCLUDED.bmi,
                bmr = EXCLUDED.bmr,
                tdee = EXCLUDED.tdee,
                daily_calorie = EXCLUDED.daily_calorie,
                daily_water_l = EXCLUDED.daily_water_l,
                updated_at = now()
            RETURNING {PROFILE_COLUMNS}
            "#
        );
        let profile = sqlx::query_as::<_, UserProfile>(&sql)
            .bind(&p.firebase_id)
            .bind(&p.email)
            .bind(&p.nickname)
            .bind(&p.character_id)
            .bind(&p.goal_type)
            .bind(&p.gender)
            .bind(p.date_of_birth)
            .bind(p.height_cm)
            .bind(p.weight_kg)
            .bind(p.activity_level)
            .bind(&p.lifestyle_name)
            .bind(p.target_weight_kg)
            .bind(p.target_rate_kg_per_week)
            .bind(p.bmi)
            .bind(p.bmr)
            .bind(p.tdee)
            .bind(p.daily_calorie)
            .bind(p.daily_water_l)
            .fetch_one(&self.db)
            .await
            .context("upsert profile")?;
        Ok(profile)
    }

    async fn reset_progress(&self, user_id: Uuid) -> anyhow::Result<ResetCounts> {
        let mut tx = self.db.begin().await.context("begin tx")?;

        let food_logs = sqlx::query("DELETE FROM daily_food_log WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .context("clear food log")?
            .rows_affected();
        let activity_logs = sqlx::query("DELETE FROM daily_activity_log WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .context("clear activity log")?
            .rows_affected();
        let water_logs = sqlx::query("DELETE FROM daily_water_log WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .context("clear water log")?
            .rows_affected();

        tx.commit().await.context("commit tx")?;
        Ok(ResetCounts {
            food_logs,
            activity_logs,
            water_logs,
        })
    }
}
