use serde::{Deserialize, Serialize};

/// The five fixed slots a food log entry can belong to. Stored as `SMALLINT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Activity,
}

impl MealSlot {
    /// Total normalization of a free-text label such as "Bữa sáng"; unknown labels are `Snack`.
    pub fn from_label(raw: &str) -> Self {
        let trimmed = raw.trim();
        let base = strip_prefix_ci(trimmed, "bữa ").unwrap_or(trimmed).trim();
        match base.to_lowercase().as_str() {
            "sáng" | "breakfast" => MealSlot::Breakfast,
            "trưa" | "lunch" => MealSlot::Lunch,
            "tối" | "dinner" => MealSlot::Dinner,
            "phụ" | "snack" => MealSlot::Snack,
            "vận động" | "activity" => MealSlot::Activity,
            _ => MealSlot::Snack,
        }
    }

    pub fn code(self) -> i16 {
        match self {
            MealSlot::Breakfast => 1,
            MealSlot::Lunch => 2,
            MealSlot::Dinner => 3,
            MealSlot::Snack => 4,
            MealSlot::Activity => 5,
        }
    }

    /// Unknown codes read back as `Snack`.
    pub fn from_code(code: i16) -> Self {
        match code {
            1 => MealSlot::Breakfast,
            2 => MealSlot::Lunch,
            3 => MealSlot::Dinner,
            5 => MealSlot::Activity,
            _ => MealSlot::Snack,
        }
    }

    /// Label shown by the mobile client.
    pub fn display_label(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Sáng",
            MealSlot::Lunch => "Trưa",
            MealSlot::Dinner => "Tối",
            MealSlot::Snack => "Phụ",
            MealSlot::Activity => "Vận động",
        }
    }
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.to_lowercase() == prefix {
        s.get(prefix.len()..)
    } else {
        None
    }
}
