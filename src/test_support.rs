//! In-memory stand-ins for the storage and AI collaborators.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use async_trait::async_trait;
use bytes::Bytes;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

use crate::activities::repo::{ActivityCatalogRow, ActivityRepo, CatalogFilter, NewActivityLog};
use crate::ai::assistant::{Assistant, Dish, ProfileContext, Recommendation};
use crate::ai::detector::IngredientDetector;
use crate::favorites::FavoriteToggle;
use crate::food_log::repo::{
    DailyLogEntry, FoodLogKey, FoodLogRepo, FoodLogWrite, NutritionTotals, UpsertOutcome,
};
use crate::food_log::MealSlot;
use crate::foods::repo::{FoodCatalogRepo, FoodItem};
use crate::profile::dto::sample_onboarding;
use crate::profile::repo::ProfileRepo;
use crate::profile::repo_types::{NewProfile, ResetCounts, UserProfile};
use crate::ranking::ItemStats;
use crate::state::AppState;
use crate::water::repo::{
    Drink, FavoriteSwap, NewWaterLog, SwapOutcome, WaterFavorite, WaterLogView, WaterRepo,
    DEFAULT_FAVORITE_VOLUME_ML,
};
use crate::{dates, profile};

#[derive(Debug, Clone)]
pub struct FoodRow {
    pub log_id: i64,
    pub key: FoodLogKey,
    pub quantity: f64,
    pub nutrition: NutritionTotals,
}

struct ActivitySeed {
    id: i64,
    name: &'static str,
    category: &'static str,
    levels: Vec<(i64, &'static str, f64)>,
}

struct ActivityRow {
    user_id: Uuid,
    level_id: i64,
    calories_burned: f64,
    log_date: Date,
}

struct WaterRow {
    log_id: i64,
    user_id: Uuid,
    w_id: i64,
    volume_ml: i32,
    actual_water_ml: f64,
    log_time: PrimitiveDateTime,
}

struct FavoriteDrinkRow {
    fav_id: i64,
    user_id: Uuid,
    w_id: i64,
    default_volume: i32,
    display_order: i32,
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    profiles: Vec<UserProfile>,
    foods: Vec<FoodItem>,
    food_log: Vec<FoodRow>,
    activities: Vec<ActivitySeed>,
    activity_log: Vec<ActivityRow>,
    favorite_activities: HashSet<(Uuid, i64)>,
    drinks: Vec<Drink>,
    water_log: Vec<WaterRow>,
    water_favorites: Vec<FavoriteDrinkRow>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn activity_of_level(&self, level_id: i64) -> Option<i64> {
        self.activities
            .iter()
            .find(|a| a.levels.iter().any(|(id, _, _)| *id == level_id))
            .map(|a| a.id)
    }
}

type Shared = Arc<Mutex<Tables>>;

fn lock(tables: &Shared) -> MutexGuard<'_, Tables> {
    tables.lock().unwrap()
}

/// One in-memory database. Activities and water get their own views because both carry a
/// favorite relation.
#[derive(Clone)]
pub struct MemDb {
    tables: Shared,
    activities: MemActivities,
    water: MemWater,
}

#[derive(Clone)]
pub struct MemActivities(Shared);

#[derive(Clone)]
pub struct MemWater(Shared);

fn food(food_id: i64, dish_name: &str, category: &str, calories: f64) -> FoodItem {
    FoodItem {
        food_id,
        dish_name: dish_name.into(),
        category: Some(category.into()),
        image_path: None,
        unit: Some("phần".into()),
        calories,
        protein: 10.0,
        carb: 40.0,
        fat: 5.0,
    }
}

fn drink(w_id: i64, w_name: &str, true_water: f64) -> Drink {
    Drink {
        w_id,
        w_name: w_name.into(),
        image_path: None,
        true_water,
    }
}

impl Default for MemDb {
    fn default() -> Self {
        Self::from_tables(Tables::default())
    }
}

impl MemDb {
    fn from_tables(tables: Tables) -> Self {
        let shared = Arc::new(Mutex::new(tables));
        Self {
            tables: shared.clone(),
            activities: MemActivities(shared.clone()),
            water: MemWater(shared),
        }
    }

    /// A small catalog of foods, activities and drinks.
    pub fn seeded() -> Self {
        Self::from_tables(Tables {
            next_id: 1000,
            foods: vec![
                food(1, "Phở bò", "Món nước", 450.0),
                food(2, "Cơm trắng", "Ngũ cốc", 130.0),
                food(3, "Bánh mì", "Ngũ cốc", 265.0),
            ],
            activities: vec![
                ActivitySeed {
                    id: 1,
                    name: "Đi bộ",
                    category: "Ngoài trời",
                    levels: vec![(10, "Chậm", 2.8), (11, "Nhanh", 4.3)],
                },
                ActivitySeed {
                    id: 2,
                    name: "Yoga",
                    category: "Thể dục",
                    levels: vec![(20, "Cơ bản", 2.5)],
                },
                ActivitySeed {
                    id: 3,
                    name: "Bơi",
                    category: "Bơi lội",
                    levels: vec![(30, "Vừa", 5.8)],
                },
            ],
            drinks: vec![
                drink(1, "Nước lọc", 100.0),
                drink(2, "Trà xanh", 90.0),
                drink(3, "Cà phê", 80.0),
            ],
            ..Tables::default()
        })
    }

    pub fn activities(&self) -> &MemActivities {
        &self.activities
    }

    pub fn water(&self) -> &MemWater {
        &self.water
    }

    pub fn profile_count(&self) -> usize {
        lock(&self.tables).profiles.len()
    }

    pub fn food_entries(&self) -> Vec<FoodRow> {
        lock(&self.tables).food_log.clone()
    }

    pub fn insert_profile(
        &self,
        firebase_id: &str,
        daily_calorie: Option<f64>,
        daily_water_l: Option<f64>,
    ) -> Uuid {
        let now = OffsetDateTime::now_utc();
        let profile = UserProfile {
            id: Uuid::new_v4(),
            firebase_id: firebase_id.into(),
            email: format!("{firebase_id}@example.com"),
            nickname: "Nana".into(),
            character_id: None,
            goal_type: "maintain".into(),
            gender: "female".into(),
            date_of_birth: now.date(),
            height_cm: 160.0,
            weight_kg: 55.0,
            activity_level: 1.2,
            lifestyle_name: "sedentary".into(),
            target_weight_kg: 55.0,
            target_rate_kg_per_week: 0.0,
            bmi: 21.48,
            bmr: 1228.0,
            tdee: 1473.6,
            daily_calorie,
            daily_water_l,
            created_at: now,
            updated_at: now,
        };
        let id = profile.id;
        lock(&self.tables).profiles.push(profile);
        id
    }

    pub fn push_food(&self, user_id: Uuid, food_id: i64, log_date: Date, n: [f64; 4]) {
        let mut t = lock(&self.tables);
        let log_id = t.next_id();
        t.food_log.push(FoodRow {
            log_id,
            key: FoodLogKey {
                user_id,
                food_id,
                slot: MealSlot::Snack,
                log_date,
            },
            quantity: 1.0,
            nutrition: NutritionTotals {
                calories: n[0],
                protein: n[1],
                carb: n[2],
                fat: n[3],
            },
        });
    }

    pub fn push_activity(&self, user_id: Uuid, level_id: i64, log_date: Date, calories_burned: f64) {
        lock(&self.tables).activity_log.push(ActivityRow {
            user_id,
            level_id,
            calories_burned,
            log_date,
        });
    }

    pub fn push_water(&self, user_id: Uuid, w_id: i64, day: Date, actual_water_ml: f64) {
        let mut t = lock(&self.tables);
        let log_id = t.next_id();
        t.water_log.push(WaterRow {
            log_id,
            user_id,
            w_id,
            volume_ml: actual_water_ml as i32,
            actual_water_ml,
            log_time: PrimitiveDateTime::new(day, Time::MIDNIGHT),
        });
    }
}

#[async_trait]
impl ProfileRepo for MemDb {
    async fn find_by_firebase_id(&self, firebase_id: &str) -> anyhow::Result<Option<UserProfile>> {
        Ok(lock(&self.tables)
            .profiles
            .iter()
            .find(|p| p.firebase_id == firebase_id)
            .cloned())
    }

    async fn upsert(&self, p: &NewProfile) -> anyhow::Result<UserProfile> {
        let mut t = lock(&self.tables);
        let now = OffsetDateTime::now_utc();
        let existing = t.profiles.iter().position(|x| x.firebase_id == p.firebase_id);
        let (id, created_at) = match existing {
            Some(i) => (t.profiles[i].id, t.profiles[i].created_at),
            None => (Uuid::new_v4(), now),
        };
        let row = UserProfile {
            id,
            firebase_id: p.firebase_id.clone(),
            email: p.email.clone(),
            nickname: p.nickname.clone(),
            character_id: p.character_id.clone(),
            goal_type: p.goal_type.clone(),
            gender: p.gender.clone(),
            date_of_birth: p.date_of_birth,
            height_cm: p.height_cm,
            weight_kg: p.weight_kg,
            activity_level: p.activity_level,
            lifestyle_name: p.lifestyle_name.clone(),
            target_weight_kg: p.target_weight_kg,
            target_rate_kg_per_week: p.target_rate_kg_per_week,
            bmi: p.bmi,
            bmr: p.bmr,
            tdee: p.tdee,
            daily_calorie: Some(p.daily_calorie),
            daily_water_l: Some(p.daily_water_l),
            created_at,
            updated_at: now,
        };
        match existing {
            Some(i) => t.profiles[i] = row.clone(),
            None => t.profiles.push(row.clone()),
        }
        Ok(row)
    }

    async fn reset_progress(&self, user_id: Uuid) -> anyhow::Result<ResetCounts> {
        let mut t = lock(&self.tables);
        let before = (t.food_log.len(), t.activity_log.len(), t.water_log.len());
        t.food_log.retain(|r| r.key.user_id != user_id);
        t.activity_log.retain(|r| r.user_id != user_id);
        t.water_log.retain(|r| r.user_id != user_id);
        Ok(ResetCounts {
            food_logs: (before.0 - t.food_log.len()) as u64,
            activity_logs: (before.1 - t.activity_log.len()) as u64,
            water_logs: (before.2 - t.water_log.len()) as u64,
        })
    }
}

#[async_trait]
impl FoodCatalogRepo for MemDb {
    async fn list(&self) -> anyhow::Result<Vec<FoodItem>> {
        Ok(lock(&self.tables).foods.clone())
    }

    async fn by_category(&self, category: &str) -> anyhow::Result<Vec<FoodItem>> {
        Ok(lock(&self.tables)
            .foods
            .iter()
            .filter(|f| f.category.as_deref() == Some(category))
            .cloned()
            .collect())
    }

    async fn search(&self, needle: &str, limit: i64) -> anyhow::Result<Vec<FoodItem>> {
        let needle = needle.to_lowercase();
        Ok(lock(&self.tables)
            .foods
            .iter()
            .filter(|f| f.dish_name.to_lowercase().contains(&needle))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FoodLogRepo for MemDb {
    async fn sum_for_day(&self, user_id: Uuid, day: Date) -> anyhow::Result<NutritionTotals> {
        let t = lock(&self.tables);
        Ok(t.food_log
            .iter()
            .filter(|r| r.key.user_id == user_id && r.key.log_date == day)
            .fold(NutritionTotals::default(), |acc, r| NutritionTotals {
                calories: acc.calories + r.nutrition.calories,
                protein: acc.protein + r.nutrition.protein,
                carb: acc.carb + r.nutrition.carb,
                fat: acc.fat + r.nutrition.fat,
            }))
    }

    async fn upsert_entry(&self, entry: &FoodLogWrite) -> anyhow::Result<Option<UpsertOutcome>> {
        let mut t = lock(&self.tables);
        if !t.foods.iter().any(|f| f.food_id == entry.key.food_id) {
            return Ok(None);
        }
        if let Some(row) = t.food_log.iter_mut().find(|r| r.key == entry.key) {
            row.quantity = entry.quantity;
            row.nutrition = entry.nutrition;
            return Ok(Some(UpsertOutcome::Updated));
        }
        let log_id = t.next_id();
        t.food_log.push(FoodRow {
            log_id,
            key: entry.key,
            quantity: entry.quantity,
            nutrition: entry.nutrition,
        });
        Ok(Some(UpsertOutcome::Inserted))
    }

    async fn delete_entry(&self, key: &FoodLogKey) -> anyhow::Result<bool> {
        let mut t = lock(&self.tables);
        let before = t.food_log.len();
        t.food_log.retain(|r| r.key != *key);
        Ok(t.food_log.len() < before)
    }

    async fn list_for_day(&self, user_id: Uuid, day: Date) -> anyhow::Result<Vec<DailyLogEntry>> {
        let t = lock(&self.tables);
        let mut entries: Vec<DailyLogEntry> = t
            .food_log
            .iter()
            .filter(|r| r.key.user_id == user_id && r.key.log_date == day)
            .filter_map(|r| {
                let f = t.foods.iter().find(|f| f.food_id == r.key.food_id)?;
                Some(DailyLogEntry {
                    log_id: r.log_id,
                    quantity: r.quantity,
                    meal_slot: r.key.slot.code(),
                    log_calories: r.nutrition.calories,
                    log_protein: r.nutrition.protein,
                    log_carb: r.nutrition.carb,
                    log_fat: r.nutrition.fat,
                    food_id: f.food_id,
                    dish_name: f.dish_name.clone(),
                    image_path: f.image_path.clone(),
                    unit: f.unit.clone(),
                    base_calories: f.calories,
                    base_protein: f.protein,
                    base_carb: f.carb,
                    base_fat: f.fat,
                })
            })
            .collect();
        entries.sort_by_key(|e| (e.meal_slot, e.log_id));
        Ok(entries)
    }

    async fn item_stats(
        &self,
        user_id: Uuid,
        since: Option<Date>,
    ) -> anyhow::Result<Vec<ItemStats<FoodItem>>> {
        let t = lock(&self.tables);
        let mut stats: Vec<ItemStats<FoodItem>> = Vec::new();
        let rows = t.food_log.iter().filter(|r| {
            r.key.user_id == user_id && since.map_or(true, |s| r.key.log_date >= s)
        });
        for r in rows {
            if let Some(s) = stats.iter_mut().find(|s| s.item.food_id == r.key.food_id) {
                s.times_logged += 1;
                s.last_logged = s.last_logged.max(r.key.log_date);
                continue;
            }
            if let Some(f) = t.foods.iter().find(|f| f.food_id == r.key.food_id) {
                stats.push(ItemStats {
                    item: f.clone(),
                    last_logged: r.key.log_date,
                    times_logged: 1,
                });
            }
        }
        Ok(stats)
    }
}

#[async_trait]
impl FavoriteToggle for MemActivities {
    async fn remove_favorite(&self, user_id: Uuid, item_id: i64) -> anyhow::Result<bool> {
        Ok(lock(&self.0).favorite_activities.remove(&(user_id, item_id)))
    }

    async fn add_favorite(&self, user_id: Uuid, item_id: i64) -> anyhow::Result<bool> {
        let mut t = lock(&self.0);
        if !t.activities.iter().any(|a| a.id == item_id) {
            return Ok(false);
        }
        t.favorite_activities.insert((user_id, item_id));
        Ok(true)
    }
}

#[async_trait]
impl ActivityRepo for MemActivities {
    async fn sum_burned(&self, user_id: Uuid, day: Date) -> anyhow::Result<f64> {
        Ok(lock(&self.0)
            .activity_log
            .iter()
            .filter(|r| r.user_id == user_id && r.log_date == day)
            .map(|r| r.calories_burned)
            .sum())
    }

    async fn insert_log(&self, log: &NewActivityLog) -> anyhow::Result<Option<i64>> {
        let mut t = lock(&self.0);
        if t.activity_of_level(log.level_id).is_none() {
            return Ok(None);
        }
        let log_id = t.next_id();
        t.activity_log.push(ActivityRow {
            user_id: log.user_id,
            level_id: log.level_id,
            calories_burned: log.calories_burned,
            log_date: log.log_date,
        });
        Ok(Some(log_id))
    }

    async fn catalog_rows(
        &self,
        user_id: Option<Uuid>,
        filter: &CatalogFilter,
    ) -> anyhow::Result<Vec<ActivityCatalogRow>> {
        let t = lock(&self.0);
        let mut rows = Vec::new();
        for a in &t.activities {
            let is_favorite =
                user_id.map_or(false, |u| t.favorite_activities.contains(&(u, a.id)));
            let keep = match filter {
                CatalogFilter::All => true,
                CatalogFilter::FavoritesOnly => is_favorite,
                CatalogFilter::Category(c) => a.category == c.as_str(),
                CatalogFilter::Ids(ids) => ids.contains(&a.id),
            };
            if !keep {
                continue;
            }
            let base = ActivityCatalogRow {
                activity_id: a.id,
                name: a.name.into(),
                image_url: None,
                level_id: None,
                level_name: None,
                met_value: None,
                is_favorite,
            };
            if a.levels.is_empty() {
                rows.push(base);
                continue;
            }
            for (level_id, level_name, met) in &a.levels {
                rows.push(ActivityCatalogRow {
                    level_id: Some(*level_id),
                    level_name: Some((*level_name).into()),
                    met_value: Some(*met),
                    ..base.clone()
                });
            }
        }
        Ok(rows)
    }

    async fn item_stats(&self, user_id: Uuid) -> anyhow::Result<Vec<ItemStats<i64>>> {
        let t = lock(&self.0);
        let mut stats: Vec<ItemStats<i64>> = Vec::new();
        for r in t.activity_log.iter().filter(|r| r.user_id == user_id) {
            let Some(activity_id) = t.activity_of_level(r.level_id) else {
                continue;
            };
            match stats.iter_mut().find(|s| s.item == activity_id) {
                Some(s) => {
                    s.times_logged += 1;
                    s.last_logged = s.last_logged.max(r.log_date);
                }
                None => stats.push(ItemStats {
                    item: activity_id,
                    last_logged: r.log_date,
                    times_logged: 1,
                }),
            }
        }
        Ok(stats)
    }
}

#[async_trait]
impl FavoriteToggle for MemWater {
    async fn remove_favorite(&self, user_id: Uuid, item_id: i64) -> anyhow::Result<bool> {
        let mut t = lock(&self.0);
        let before = t.water_favorites.len();
        t.water_favorites
            .retain(|f| !(f.user_id == user_id && f.w_id == item_id));
        Ok(t.water_favorites.len() < before)
    }

    async fn add_favorite(&self, user_id: Uuid, item_id: i64) -> anyhow::Result<bool> {
        let mut t = lock(&self.0);
        if !t.drinks.iter().any(|d| d.w_id == item_id) {
            return Ok(false);
        }
        let mine = t.water_favorites.iter().filter(|f| f.user_id == user_id);
        if mine.clone().any(|f| f.w_id == item_id) {
            return Ok(true);
        }
        let display_order = mine.map(|f| f.display_order).max().unwrap_or(0) + 1;
        let fav_id = t.next_id();
        t.water_favorites.push(FavoriteDrinkRow {
            fav_id,
            user_id,
            w_id: item_id,
            default_volume: DEFAULT_FAVORITE_VOLUME_ML,
            display_order,
        });
        Ok(true)
    }
}

#[async_trait]
impl WaterRepo for MemWater {
    async fn sum_actual_ml(&self, user_id: Uuid, day: Date) -> anyhow::Result<f64> {
        Ok(lock(&self.0)
            .water_log
            .iter()
            .filter(|r| r.user_id == user_id && r.log_time.date() == day)
            .map(|r| r.actual_water_ml)
            .sum())
    }

    async fn find_drink(&self, w_id: i64) -> anyhow::Result<Option<Drink>> {
        Ok(lock(&self.0).drinks.iter().find(|d| d.w_id == w_id).cloned())
    }

    async fn list_drinks(&self) -> anyhow::Result<Vec<Drink>> {
        let mut drinks = lock(&self.0).drinks.clone();
        drinks.sort_by(|a, b| a.w_name.cmp(&b.w_name));
        Ok(drinks)
    }

    async fn insert_log(&self, log: &NewWaterLog) -> anyhow::Result<i64> {
        let mut t = lock(&self.0);
        let log_id = t.next_id();
        t.water_log.push(WaterRow {
            log_id,
            user_id: log.user_id,
            w_id: log.w_id,
            volume_ml: log.volume_ml,
            actual_water_ml: log.actual_water_ml,
            log_time: log.log_time,
        });
        Ok(log_id)
    }

    async fn list_logs_for_day(&self, user_id: Uuid, day: Date) -> anyhow::Result<Vec<WaterLogView>> {
        let t = lock(&self.0);
        let mut logs: Vec<WaterLogView> = t
            .water_log
            .iter()
            .filter(|r| r.user_id == user_id && r.log_time.date() == day)
            .filter_map(|r| {
                let d = t.drinks.iter().find(|d| d.w_id == r.w_id)?;
                Some(WaterLogView {
                    log_id: r.log_id,
                    w_id: r.w_id,
                    volume_ml: r.volume_ml,
                    actual_water_ml: r.actual_water_ml,
                    log_time: r.log_time,
                    drink_name: d.w_name.clone(),
                    image_path: d.image_path.clone(),
                })
            })
            .collect();
        logs.sort_by(|a, b| (b.log_time, b.log_id).cmp(&(a.log_time, a.log_id)));
        Ok(logs)
    }

    async fn delete_log(&self, log_id: i64) -> anyhow::Result<bool> {
        let mut t = lock(&self.0);
        let before = t.water_log.len();
        t.water_log.retain(|r| r.log_id != log_id);
        Ok(t.water_log.len() < before)
    }

    async fn list_favorites(&self, user_id: Uuid) -> anyhow::Result<Vec<WaterFavorite>> {
        let t = lock(&self.0);
        let mut favs: Vec<WaterFavorite> = t
            .water_favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| {
                let d = t.drinks.iter().find(|d| d.w_id == f.w_id)?;
                Some(WaterFavorite {
                    fav_id: f.fav_id,
                    w_id: f.w_id,
                    default_volume: f.default_volume,
                    display_order: f.display_order,
                    drink_name: d.w_name.clone(),
                    image_path: d.image_path.clone(),
                    true_water: d.true_water,
                })
            })
            .collect();
        favs.sort_by_key(|f| f.display_order);
        Ok(favs)
    }

    async fn update_favorite(&self, swap: &FavoriteSwap) -> anyhow::Result<SwapOutcome> {
        let mut t = lock(&self.0);
        let taken = swap.new_w_id != swap.old_w_id
            && t
                .water_favorites
                .iter()
                .any(|f| f.user_id == swap.user_id && f.w_id == swap.new_w_id);
        match t
            .water_favorites
            .iter_mut()
            .find(|f| f.user_id == swap.user_id && f.w_id == swap.old_w_id)
        {
            None => Ok(SwapOutcome::MissingFavorite),
            Some(_) if taken => Ok(SwapOutcome::AlreadyFavorite),
            Some(f) => {
                f.w_id = swap.new_w_id;
                f.default_volume = swap.new_volume;
                Ok(SwapOutcome::Swapped)
            }
        }
    }
}

/// Returns a fixed set of labels.
pub struct StaticDetector(pub Vec<String>);

#[async_trait]
impl IngredientDetector for StaticDetector {
    async fn detect(&self, _image: Bytes, _content_type: &str) -> anyhow::Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

pub struct FailingDetector;

#[async_trait]
impl IngredientDetector for FailingDetector {
    async fn detect(&self, _image: Bytes, _content_type: &str) -> anyhow::Result<Vec<String>> {
        Err(anyhow!("detector returned 503"))
    }
}

/// Answers deterministically from its inputs.
pub struct EchoAssistant;

#[async_trait]
impl Assistant for EchoAssistant {
    async fn suggest(
        &self,
        ctx: &ProfileContext,
        ingredients: &[String],
    ) -> anyhow::Result<Recommendation> {
        let first = ingredients.first().map(String::as_str).unwrap_or_default();
        Ok(Recommendation {
            dishes: vec![Dish {
                name: format!("Món {first} cho {} ({})", ctx.nickname, ctx.goal),
                description: String::new(),
                estimated_calories: ctx.daily_calorie_target.map(|kcal| kcal / 3.0),
            }],
            advice: "Uống đủ nước".into(),
        })
    }

    async fn chat(&self, message: &str) -> anyhow::Result<String> {
        Ok(format!("Nana nghe: {message}"))
    }
}

/// Onboards `firebase_id` with the sample answers (male, 70 kg, maintain).
pub async fn seed_user(state: &AppState, firebase_id: &str) -> UserProfile {
    let (profile, _) = profile::services::save_profile(
        state.profiles.as_ref(),
        &sample_onboarding(firebase_id),
        dates::today(),
    )
    .await
    .unwrap();
    profile
}
