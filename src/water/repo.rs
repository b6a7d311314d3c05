use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::favorites::FavoriteToggle;

/// Volume given to a drink when it first becomes a favorite.
pub const DEFAULT_FAVORITE_VOLUME_ML: i32 = 250;

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Drink {
    pub w_id: i64,
    pub w_name: String,
    pub image_path: Option<String>,
    /// Hydration factor in percent.
    pub true_water: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct WaterFavorite {
    pub fav_id: i64,
    pub w_id: i64,
    pub default_volume: i32,
    pub display_order: i32,
    pub drink_name: String,
    pub image_path: Option<String>,
    pub true_water: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct WaterLogView {
    pub log_id: i64,
    pub w_id: i64,
    pub volume_ml: i32,
    pub actual_water_ml: f64,
    pub log_time: PrimitiveDateTime,
    pub drink_name: String,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWaterLog {
    pub user_id: Uuid,
    pub w_id: i64,
    pub volume_ml: i32,
    pub actual_water_ml: f64,
    pub log_time: PrimitiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteSwap {
    pub user_id: Uuid,
    pub old_w_id: i64,
    pub new_w_id: i64,
    pub new_volume: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    Swapped,
    /// `old_w_id` is not among the user's favorites.
    MissingFavorite,
    /// `new_w_id` already fills another favorite slot.
    AlreadyFavorite,
}

#[async_trait]
pub trait WaterRepo: FavoriteToggle {
    async fn sum_actual_ml(&self, user_id: Uuid, day: Date) -> anyhow::Result<f64>;
    async fn find_drink(&self, w_id: i64) -> anyhow::Result<Option<Drink>>;
    async fn list_drinks(&self) -> anyhow::Result<Vec<Drink>>;
    async fn insert_log(&self, log: &NewWaterLog) -> anyhow::Result<i64>;
    /// Newest first.
    async fn list_logs_for_day(&self, user_id: Uuid, day: Date) -> anyhow::Result<Vec<WaterLogView>>;
    async fn delete_log(&self, log_id: i64) -> anyhow::Result<bool>;
    /// Ordered by display order.
    async fn list_favorites(&self, user_id: Uuid) -> anyhow::Result<Vec<WaterFavorite>>;
    async fn update_favorite(&self, swap: &FavoriteSwap) -> anyhow::Result<SwapOutcome>;
}

#[derive(Clone)]
pub struct PgWaterRepo {
    db: PgPool,
}

impl PgWaterRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FavoriteToggle for PgWaterRepo {
    async fn remove_favorite(&self, user_id: Uuid, w_id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM user_water_favorites WHERE user_id = $1 AND w_id = $2")
            .bind(user_id)
            .bind(w_id)
            .execute(&self.db)
            .await
            .context("remove favorite drink")?;
        Ok(res.rows_affected() > 0)
    }

    async fn add_favorite(&self, user_id: Uuid, w_id: i64) -> anyhow::Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            WITH target AS (
                SELECT w_id FROM water WHERE w_id = $2
            ), ins AS (
                INSERT INTO user_water_favorites (user_id, w_id, default_volume, display_order)
                SELECT $1, w_id, $3,
                    COALESCE((SELECT MAX(display_order) FROM user_water_favorites WHERE user_id = $1), 0) + 1
                FROM target
                ON CONFLICT (user_id, w_id) DO NOTHING
            )
            SELECT EXISTS (SELECT 1 FROM target)
            "#,
        )
        .bind(user_id)
        .bind(w_id)
        .bind(DEFAULT_FAVORITE_VOLUME_ML)
        .fetch_one(&self.db)
        .await
        .context("add favorite drink")?;
        Ok(exists)
    }
}

#[async_trait]
impl WaterRepo for PgWaterRepo {
    async fn sum_actual_ml(&self, user_id: Uuid, day: Date) -> anyhow::Result<f64> {
        sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(actual_water_ml), 0)::float8
            FROM daily_water_log
            WHERE user_id = $1 AND log_time::date = $2
            "#,
        )
        .bind(user_id)
        .bind(day)
        .fetch_one(&self.db)
        .await
        .context("sum water log")
    }

    async fn find_drink(&self, w_id: i64) -> anyhow::Result<Option<Drink>> {
        sqlx::query_as::<_, Drink>(
            "SELECT w_id, w_name, image_path, true_water FROM water WHERE w_id = $1",
        )
        .bind(w_id)
        .fetch_optional(&self.db)
        .await
        .context("find drink")
    }

    async fn list_drinks(&self) -> anyhow::Result<Vec<Drink>> {
        sqlx::query_as::<_, Drink>(
            "SELECT w_id, w_name, image_path, true_water FROM water ORDER BY w_name ASC",
        )
        .fetch_all(&self.db)
        .await
        .context("list drinks")
    }

    async fn insert_log(&self, log: &NewWaterLog) -> anyhow::Result<i64> {
        sqlx::query_scalar(
            r#"
            INSERT INTO daily_water_log (user_id, w_id, volume_ml, actual_water_ml, log_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING log_id
            "#,
        )
        .bind(log.user_id)
        .bind(log.w_id)
        .bind(log.volume_ml)
        .bind(log.actual_water_ml)
        .bind(log.log_time)
        .fetch_one(&self.db)
        .await
        .context("insert water log")
    }

    async fn list_logs_for_day(&self, user_id: Uuid, day: Date) -> anyhow::Result<Vec<WaterLogView>> {
        sqlx::query_as::<_, WaterLogView>(
            r#"
            SELECT l.log_id, l.w_id, l.volume_ml, l.actual_water_ml, l.log_time,
                   w.w_name AS drink_name, w.image_path
            FROM daily_water_log l
            JOIN water w ON w.w_id = l.w_id
            WHERE l.user_id = $1 AND l.log_time::date = $2
            ORDER BY l.log_time DESC, l.log_id DESC
            "#,
        )
        .bind(user_id)
        .bind(day)
        .fetch_all(&self.db)
        .await
        .context("list water logs")
    }

    async fn delete_log(&self, log_id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM daily_water_log WHERE log_id = $1")
            .bind(log_id)
            .execute(&self.db)
            .await
            .context("delete water log")?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_favorites(&self, user_id: Uuid) -> anyhow::Result<Vec<WaterFavorite>> {
        sqlx::query_as::<_, WaterFavorite>(
            r#"
            SELECT f.fav_id, f.w_id, f.default_volume, f.display_order,
                   w.w_name AS drink_name, w.image_path, w.true_water
            FROM user_water_favorites f
            JOIN water w ON w.w_id = f.w_id
            WHERE f.user_id = $1
            ORDER BY f.display_order ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list water favorites")
    }

    async fn update_favorite(&self, swap: &FavoriteSwap) -> anyhow::Result<SwapOutcome> {
        let res = sqlx::query(
            r#"
            UPDATE user_water_favorites
            SET w_id = $1, default_volume = $2
            WHERE user_id = $3 AND w_id = $4
            "#,
        )
        .bind(swap.new_w_id)
        .bind(swap.new_volume)
        .bind(swap.user_id)
        .bind(swap.old_w_id)
        .execute(&self.db)
        .await;
        match res {
            Ok(done) if done.rows_affected() > 0 => Ok(SwapOutcome::Swapped),
            Ok(_) => Ok(SwapOutcome::MissingFavorite),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Ok(SwapOutcome::AlreadyFavorite)
            }
            Err(e) => Err(e).context("update water favorite"),
        }
    }
}
