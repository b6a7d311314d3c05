use anyhow::Context;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::Date;
use uuid::Uuid;

use crate::favorites::FavoriteToggle;
use crate::ranking::ItemStats;

/// One activity × level row of the catalog, flagged for the requesting user.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ActivityCatalogRow {
    pub activity_id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub level_id: Option<i64>,
    pub level_name: Option<String>,
    pub met_value: Option<f64>,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogFilter {
    All,
    FavoritesOnly,
    Category(String),
    Ids(Vec<i64>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewActivityLog {
    pub user_id: Uuid,
    pub level_id: i64,
    pub duration_minutes: i32,
    pub calories_burned: f64,
    pub log_date: Date,
}

#[async_trait]
pub trait ActivityRepo: FavoriteToggle {
    async fn sum_burned(&self, user_id: Uuid, day: Date) -> anyhow::Result<f64>;
    /// `None` when the intensity level does not exist.
    async fn insert_log(&self, log: &NewActivityLog) -> anyhow::Result<Option<i64>>;
    /// `user_id` only drives the `is_favorite` flag and the favorites filter.
    async fn catalog_rows(
        &self,
        user_id: Option<Uuid>,
        filter: &CatalogFilter,
    ) -> anyhow::Result<Vec<ActivityCatalogRow>>;
    /// History grouped per activity id.
    async fn item_stats(&self, user_id: Uuid) -> anyhow::Result<Vec<ItemStats<i64>>>;
}

#[derive(FromRow)]
struct ActivityStatsRow {
    activity_id: i64,
    last_logged: Date,
    times_logged: i64,
}

const CATALOG_SELECT: &str = r#"
    SELECT
        a.activity_id,
        a.activity_name AS name,
        a.image_path AS image_url,
        l.level_id,
        l.level_name,
        l.met_value,
        (fav.user_id IS NOT NULL) AS is_favorite
    FROM activities a
    LEFT JOIN activity_levels l ON l.activity_id = a.activity_id
    LEFT JOIN user_favorite_activities fav
        ON fav.activity_id = a.activity_id AND fav.user_id = $1
"#;

#[derive(Clone)]
pub struct PgActivityRepo {
    db: PgPool,
}

impl PgActivityRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FavoriteToggle for PgActivityRepo {
    async fn remove_favorite(&self, user_id: Uuid, activity_id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "DELETE FROM user_favorite_activities WHERE user_id = $1 AND activity_id = $2",
        )
        .bind(user_id)
        .bind(activity_id)
        .execute(&self.db)
        .await
        .context("remove favorite activity")?;
        Ok(res.rows_affected() > 0)
    }

    async fn add_favorite(&self, user_id: Uuid, activity_id: i64) -> anyhow::Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            WITH target AS (
                SELECT activity_id FROM activities WHERE activity_id = $2
            ), ins AS (
                INSERT INTO user_favorite_activities (user_id, activity_id)
                SELECT $1, activity_id FROM target
                ON CONFLICT (user_id, activity_id) DO NOTHING
            )
            SELECT EXISTS (SELECT 1 FROM target)
            "#,
        )
        .bind(user_id)
        .bind(activity_id)
        .fetch_one(&self.db)
        .await
        .context("add favorite activity")?;
        Ok(exists)
    }
}

#[async_trait]
impl ActivityRepo for PgActivityRepo {
    async fn sum_burned(&self, user_id: Uuid, day: Date) -> anyhow::Result<f64> {
        sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(calories_burned), 0)::float8
            FROM daily_activity_log
            WHERE user_id = $1 AND log_date = $2
            "#,
        )
        .bind(user_id)
        .bind(day)
        .fetch_one(&self.db)
        .await
        .context("sum activity log")
    }

    async fn insert_log(&self, log: &NewActivityLog) -> anyhow::Result<Option<i64>> {
        sqlx::query_scalar(
            r#"
            INSERT INTO daily_activity_log
                (user_id, level_id, duration_minutes, calories_burned, log_date)
            SELECT $1, level_id, $3, $4, $5 FROM activity_levels WHERE level_id = $2
            RETURNING log_id
            "#,
        )
        .bind(log.user_id)
        .bind(log.level_id)
        .bind(log.duration_minutes)
        .bind(log.calories_burned)
        .bind(log.log_date)
        .fetch_optional(&self.db)
        .await
        .context("insert activity log")
    }

    async fn catalog_rows(
        &self,
        user_id: Option<Uuid>,
        filter: &CatalogFilter,
    ) -> anyhow::Result<Vec<ActivityCatalogRow>> {
        const ORDER: &str = " ORDER BY a.activity_id, l.level_id";
        let rows = match filter {
            CatalogFilter::All => {
                let sql = format!("{CATALOG_SELECT}{ORDER}");
                sqlx::query_as::<_, ActivityCatalogRow>(&sql)
                    .bind(user_id)
                    .fetch_all(&self.db)
                    .await
            }
            CatalogFilter::FavoritesOnly => {
                let sql = format!("{CATALOG_SELECT} WHERE fav.user_id IS NOT NULL{ORDER}");
                sqlx::query_as::<_, ActivityCatalogRow>(&sql)
                    .bind(user_id)
                    .fetch_all(&self.db)
                    .await
            }
            CatalogFilter::Category(category) => {
                let sql = format!("{CATALOG_SELECT} WHERE a.category = $2{ORDER}");
                sqlx::query_as::<_, ActivityCatalogRow>(&sql)
                    .bind(user_id)
                    .bind(category)
                    .fetch_all(&self.db)
                    .await
            }
            CatalogFilter::Ids(ids) => {
                let sql = format!("{CATALOG_SELECT} WHERE a.activity_id = ANY($2){ORDER}");
                sqlx::query_as::<_, ActivityCatalogRow>(&sql)
                    .bind(user_id)
                    .bind(ids.as_slice())
                    .fetch_all(&self.db)
                    .await
            }
        };
        rows.context("list activity catalog")
    }

    async fn item_stats(&self, user_id: Uuid) -> anyhow::Result<Vec<ItemStats<i64>>> {
        let rows = sqlx::query_as::<_, ActivityStatsRow>(
            r#"
            SELECT l.activity_id, MAX(d.log_date) AS last_logged, COUNT(*) AS times_logged
            FROM daily_activity_log d
            JOIN activity_levels l ON l.level_id = d.level_id
            WHERE d.user_id = $1
            GROUP BY l.activity_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("activity log stats")?;
        Ok(rows
            .into_iter()
            .map(|r| ItemStats {
                item: r.activity_id,
                last_logged: r.last_logged,
                times_logged: r.times_logged,
            })
            .collect())
    }
}
