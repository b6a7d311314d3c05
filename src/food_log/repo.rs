use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::Date;
use uuid::Uuid;

use super::slot::MealSlot;
use crate::foods::repo::{FoodItem, FOOD_COLUMNS};
use crate::ranking::ItemStats;

/// Natural key of a food log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoodLogKey {
    pub user_id: Uuid,
    pub food_id: i64,
    pub slot: MealSlot,
    pub log_date: Date,
}

/// Nutrition snapshot, either for one entry or summed over a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, FromRow)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carb: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodLogWrite {
    pub key: FoodLogKey,
    pub quantity: f64,
    pub nutrition: NutritionTotals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// One entry of a day, joined to its catalog dish.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct DailyLogEntry {
    pub log_id: i64,
    pub quantity: f64,
    #[serde(skip)]
    pub meal_slot: i16,
    pub log_calories: f64,
    pub log_protein: f64,
    pub log_carb: f64,
    pub log_fat: f64,
    pub food_id: i64,
    pub dish_name: String,
    pub image_path: Option<String>,
    pub unit: Option<String>,
    pub base_calories: f64,
    pub base_protein: f64,
    pub base_carb: f64,
    pub base_fat: f64,
}

#[async_trait]
pub trait FoodLogRepo: Send + Sync {
    async fn sum_for_day(&self, user_id: Uuid, day: Date) -> anyhow::Result<NutritionTotals>;
    /// Conflict-aware write keyed by [`FoodLogKey`]. `None` when the food is not in the
    /// catalog.
    async fn upsert_entry(&self, entry: &FoodLogWrite) -> anyhow::Result<Option<UpsertOutcome>>;
    /// Returns `false` when no entry had the key.
    async fn delete_entry(&self, key: &FoodLogKey) -> anyhow::Result<bool>;
    async fn list_for_day(&self, user_id: Uuid, day: Date) -> anyhow::Result<Vec<DailyLogEntry>>;
    /// History grouped per dish, restricted to `log_date >= since` when given.
    async fn item_stats(
        &self,
        user_id: Uuid,
        since: Option<Date>,
    ) -> anyhow::Result<Vec<ItemStats<FoodItem>>>;
}

#[derive(FromRow)]
struct FoodStatsRow {
    #[sqlx(flatten)]
    food: FoodItem,
    last_logged: Date,
    times_logged: i64,
}

#[derive(Clone)]
pub struct PgFoodLogRepo {
    db: PgPool,
}

impl PgFoodLogRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FoodLogRepo for PgFoodLogRepo {
    async fn sum_for_day(&self, user_id: Uuid, day: Date) -> anyhow::Result<NutritionTotals> {
        sqlx::query_as::<_, NutritionTotals>(
            r#"
            SELECT
                COALESCE(SUM(calories), 0)::float8 AS calories,
                COALESCE(SUM(protein), 0)::float8 AS protein,
                COALESCE(SUM(carb), 0)::float8 AS carb,
                COALESCE(SUM(fat), 0)::float8 AS fat
            FROM daily_food_log
            WHERE user_id = $1 AND log_date = $2
            "#,
        )
        .bind(user_id)
        .bind(day)
        .fetch_one(&self.db)
        .await
        .context("sum food log")
    }

    async fn upsert_entry(&self, entry: &FoodLogWrite) -> anyhow::Result<Option<UpsertOutcome>> {
        // xmax is 0 only for a freshly inserted tuple
        let inserted: Option<bool> = sqlx::query_scalar(
            r#"
            INSERT INTO daily_food_log
                (user_id, food_id, meal_slot, quantity, calories, protein, carb, fat, log_date)
            SELECT $1, f.food_id, $3, $4, $5, $6, $7, $8, $9
            FROM cooked_food f
            WHERE f.food_id = $2 AND f.deleted_at IS NULL
            ON CONFLICT (user_id, food_id, meal_slot, log_date) DO UPDATE SET
                quantity = EXCLUDED.quantity,
                calories = EXCLUDED.calories,
                protein = EXCLUDED.protein,
                carb = EXCLUDED.carb,
                fat = EXCLUDED.fat,
                updated_at = now()
            RETURNING (xmax = 0) AS inserted
            "#,
        )
        .bind(entry.key.user_id)
        .bind(entry.key.food_id)
        .bind(entry.key.slot.code())
        .bind(entry.quantity)
        .bind(entry.nutrition.calories)
        .bind(entry.nutrition.protein)
        .bind(entry.nutrition.carb)
        .bind(entry.nutrition.fat)
        .bind(entry.key.log_date)
        .fetch_optional(&self.db)
        .await
        .context("upsert food log entry")?;

        Ok(inserted.map(|inserted| {
            if inserted {
                UpsertOutcome::Inserted
            } else {
                UpsertOutcome::Updated
            }
        }))
    }

    async fn delete_entry(&self, key: &FoodLogKey) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            DELETE FROM daily_food_log
            WHERE user_id = $1 AND food_id = $2 AND meal_slot = $3 AND log_date = $4
            "#,
        )
        .bind(key.user_id)
        .bind(key.food_id)
        .bind(key.slot.code())
        .bind(key.log_date)
        .execute(&self.db)
        .await
        .context("delete food log entry")?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_for_day(&self, user_id: Uuid, day: Date) -> anyhow::Result<Vec<DailyLogEntry>> {
        sqlx::query_as::<_, DailyLogEntry>(
            r#"
            SELECT
                l.log_id, l.quantity, l.meal_slot,
                l.calories AS log_calories, l.protein AS log_protein,
                l.carb AS log_carb, l.fat AS log_fat,
                f.food_id, f.dish_name, f.image_path, f.unit,
                f.calories AS base_calories, f.protein AS base_protein,
                f.carb AS base_carb, f.fat AS base_fat
            FROM daily_food_log l
            JOIN cooked_food f ON f.food_id = l.food_id
            WHERE l.user_id = $1 AND l.log_date = $2
            ORDER BY l.meal_slot, l.log_id
            "#,
        )
        .bind(user_id)
        .bind(day)
        .fetch_all(&self.db)
        .await
        .context("list food log for day")
    }

    async fn item_stats(
        &self,
        user_id: Uuid,
        since: Option<Date>,
    ) -> anyhow::Result<Vec<ItemStats<FoodItem>>> {
        let sql = format!(
            r#"
            SELECT {FOOD_COLUMNS}, MAX(l.log_date) AS last_logged, COUNT(*) AS times_logged
            FROM daily_food_log l
            JOIN cooked_food f ON f.food_id = l.food_id
            WHERE l.user_id = $1 AND ($2::date IS NULL OR l.log_date >= $2)
            GROUP BY f.food_id
            "#
        );
        let rows = sqlx::query_as::<_, FoodStatsRow>(&sql)
            .bind(user_id)
            .bind(since)
            .fetch_all(&self.db)
            .await
            .context("food log stats")?;
        Ok(rows
            .into_iter()
            .map(|r| ItemStats {
                item: r.food,
                last_logged: r.last_logged,
                times_logged: r.times_logged,
            })
            .collect())
    }
}
