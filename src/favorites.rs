use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

/// A user ↔ catalog item presence relation.
#[async_trait]
pub trait FavoriteToggle: Send + Sync {
    /// Returns `true` when a relation existed and was removed.
    async fn remove_favorite(&self, user_id: Uuid, item_id: i64) -> anyhow::Result<bool>;
    /// Creates the relation, ignoring a concurrent duplicate. Returns `false` when the item
    /// does not exist in the catalog.
    async fn add_favorite(&self, user_id: Uuid, item_id: i64) -> anyhow::Result<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Added,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    pub action: ToggleAction,
    pub favorited: bool,
}

/// Flips the relation. Removal is attempted first so the decision never depends on a
/// separate lookup. `None` means the item is unknown.
pub async fn toggle<R>(repo: &R, user_id: Uuid, item_id: i64) -> anyhow::Result<Option<ToggleOutcome>>
where
    R: FavoriteToggle + ?Sized,
{
    if repo.remove_favorite(user_id, item_id).await? {
        return Ok(Some(ToggleOutcome {
            action: ToggleAction::Removed,
            favorited: false,
        }));
    }
    if !repo.add_favorite(user_id, item_id).await? {
        return Ok(None);
    }
    Ok(Some(ToggleOutcome {
        action: ToggleAction::Added,
        favorited: true,
    }))
}
