use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Category of a generated checklist line; downstream rendering groups by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ItemType {
    Workout,
    Protein,
    Fiber,
    Water,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChecklistItem {
    pub id: i64,
    pub user_id: i64,
    pub entry_date: NaiveDate,
    pub item_label: String,
    pub item_type: ItemType,
    pub is_checked: bool,
}

/// A generated checklist line before it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedItem {
    pub label: String,
    pub item_type: ItemType,
}

impl GeneratedItem {
    pub fn new(label: impl Into<String>, item_type: ItemType) -> Self {
        GeneratedItem {
            label: label.into(),
            item_type,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ToggleChecklistRequest {
    pub id: i64,
    pub checked: bool,
}
