use serde::Serialize;
use time::Date;
use tracing::{info, warn};
use uuid::Uuid;

use super::repo::{FoodLogKey, FoodLogRepo, FoodLogWrite, NutritionTotals, UpsertOutcome};
use super::slot::MealSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogAction {
    Inserted,
    Updated,
    Deleted,
}

/// An incoming food log event, already resolved to a stored user.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodLogEvent {
    pub user_id: Uuid,
    pub food_id: i64,
    pub meal_label: String,
    pub quantity: f64,
    pub log_date: Date,
    pub nutrition: NutritionTotals,
}

/// Upsert by natural key, with a non-positive quantity meaning "remove".
///
/// Deleting a missing entry still reports [`LogAction::Deleted`]. Replaying the same
/// positive write leaves a single entry carrying the replayed values. A positive write for a
/// food missing from the catalog yields `None`.
pub async fn reconcile(
    repo: &dyn FoodLogRepo,
    event: &FoodLogEvent,
) -> anyhow::Result<Option<LogAction>> {
    let key = FoodLogKey {
        user_id: event.user_id,
        food_id: event.food_id,
        slot: MealSlot::from_label(&event.meal_label),
        log_date: event.log_date,
    };

    // NaN quantities are treated like zero
    if !(event.quantity > 0.0) {
        let existed = repo.delete_entry(&key).await?;
        info!(food_id = key.food_id, slot = ?key.slot, existed, "food log entry removed");
        return Ok(Some(LogAction::Deleted));
    }

    let Some(outcome) = repo
        .upsert_entry(&FoodLogWrite {
            key,
            quantity: event.quantity,
            nutrition: event.nutrition,
        })
        .await?
    else {
        warn!(food_id = key.food_id, "food not in catalog");
        return Ok(None);
    };
    let action = match outcome {
        UpsertOutcome::Inserted => LogAction::Inserted,
        UpsertOutcome::Updated => LogAction::Updated,
    };
    info!(food_id = key.food_id, slot = ?key.slot, ?action, "food log entry written");
    Ok(Some(action))
}
