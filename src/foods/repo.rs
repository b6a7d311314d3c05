use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

pub const SEARCH_LIMIT: i64 = 50;

/// A catalog dish with its per-unit nutrition.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct FoodItem {
    pub food_id: i64,
    pub dish_name: String,
    pub category: Option<String>,
    pub image_path: Option<String>,
    pub unit: Option<String>,
    pub calories: f64,
    pub protein: f64,
    pub carb: f64,
    pub fat: f64,
}

#[async_trait]
pub trait FoodCatalogRepo: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<FoodItem>>;
    async fn by_category(&self, category: &str) -> anyhow::Result<Vec<FoodItem>>;
    /// Case-insensitive substring match on the dish name, at most `limit` rows.
    async fn search(&self, needle: &str, limit: i64) -> anyhow::Result<Vec<FoodItem>>;
}

pub(crate) const FOOD_COLUMNS: &str =
    "f.food_id, f.dish_name, f.category, f.image_path, f.unit, f.calories, f.protein, f.carb, f.fat";

#[derive(Clone)]
pub struct PgFoodCatalog {
    db: PgPool,
}

impl PgFoodCatalog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Escapes LIKE metacharacters so user input only ever matches literally.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl FoodCatalogRepo for PgFoodCatalog {
    async fn list(&self) -> anyhow::Result<Vec<FoodItem>> {
        let sql = format!(
            "SELECT {FOOD_COLUMNS} FROM cooked_food f WHERE f.deleted_at IS NULL ORDER BY f.food_id"
        );
        sqlx::query_as::<_, FoodItem>(&sql)
            .fetch_all(&self.db)
            .await
            .context("list foods")
    }

    async fn by_category(&self, category: &str) -> anyhow::Result<Vec<FoodItem>> {
        let sql = format!(
            "SELECT {FOOD_COLUMNS} FROM cooked_food f \
             WHERE f.category = $1 AND f.deleted_at IS NULL ORDER BY f.food_id"
        );
        sqlx::query_as::<_, FoodItem>(&sql)
            .bind(category)
            .fetch_all(&self.db)
            .await
            .context("list foods by category")
    }

    async fn search(&self, needle: &str, limit: i64) -> anyhow::Result<Vec<FoodItem>> {
        let sql = format!(
            "SELECT {FOOD_COLUMNS} FROM cooked_food f \
             WHERE f.dish_name ILIKE $1 AND f.deleted_at IS NULL ORDER BY f.dish_name LIMIT $2"
        );
        sqlx::query_as::<_, FoodItem>(&sql)
            .bind(like_pattern(needle))
            .bind(limit)
            .fetch_all(&self.db)
            .await
            .context("search foods")
    }
}
