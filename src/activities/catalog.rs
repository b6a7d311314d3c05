use serde::Serialize;

use super::repo::ActivityCatalogRow;

/// Selector of the activity picker. Every label maps to some listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityListing {
    Popular,
    Favorites,
    Recent,
    Category(String),
}

impl ActivityListing {
    pub fn from_label(raw: Option<&str>) -> Self {
        let label = raw.map(str::trim).unwrap_or_default();
        match label {
            "" | "Phổ biến" => Self::Popular,
            "Yêu thích" => Self::Favorites,
            "Gần đây" => Self::Recent,
            other => match other.to_ascii_lowercase().as_str() {
                "popular" => Self::Popular,
                "favorites" => Self::Favorites,
                "recent" => Self::Recent,
                _ => Self::Category(other.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityLevel {
    pub level_id: i64,
    pub level_name: String,
    pub met_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityGroup {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub is_favorite: bool,
    pub levels: Vec<ActivityLevel>,
}

/// Folds joined rows into one entry per activity, keeping first-seen order.
pub fn group_activities(rows: Vec<ActivityCatalogRow>) -> Vec<ActivityGroup> {
    let mut groups: Vec<ActivityGroup> = Vec::new();
    for row in rows {
        let idx = match groups.iter().position(|g| g.id == row.activity_id) {
            Some(idx) => idx,
            None => {
                groups.push(ActivityGroup {
                    id: row.activity_id,
                    name: row.name,
                    image_url: row.image_url,
                    is_favorite: row.is_favorite,
                    levels: Vec::new(),
                });
                groups.len() - 1
            }
        };
        if let (Some(level_id), Some(level_name)) = (row.level_id, row.level_name) {
            groups[idx].levels.push(ActivityLevel {
                level_id,
                level_name,
                met_value: row.met_value.unwrap_or_default(),
            });
        }
    }
    groups
}

/// Reorders groups to follow `ranked_ids`; ids missing from the ranking go last.
pub fn order_by_ids(mut groups: Vec<ActivityGroup>, ranked_ids: &[i64]) -> Vec<ActivityGroup> {
    groups.sort_by_key(|g| {
        ranked_ids
            .iter()
            .position(|id| *id == g.id)
            .unwrap_or(usize::MAX)
    });
    groups
}
