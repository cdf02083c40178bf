use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Denormalized per-day summary row. Everything except `day_note` is a
/// derived projection and can be recomputed from the item tables.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyActivity {
    pub id: i64,
    pub user_id: i64,
    pub entry_date: NaiveDate,
    pub physical_completion_pct: i64,
    pub profession_completion_pct: i64,
    pub physical_points: i64,
    pub profession_points: i64,
    pub total_points: i64,
    pub physical_total_count: i64,
    pub profession_total_count: i64,
    pub day_note: Option<String>,
}

/// Result of one recalculation pass, returned to the caller so the freshly
/// computed numbers can be used without re-reading the summary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyStats {
    pub phys_pct: i64,
    pub prof_pct: i64,
    pub phys_done: i64,
    pub phys_total: i64,
    pub prof_done: i64,
    pub prof_total: i64,
    pub combined: i64,
}

/// One cell of the month calendar view.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CalendarDay {
    pub physical_completion_pct: i64,
    pub profession_completion_pct: i64,
    pub total_points: i64,
    pub overall_score: i64,
    pub has_goals: bool,
    pub has_reminders: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDayNoteRequest {
    pub date: NaiveDate,
    pub note: String,
}

/// Whether a date may still be edited; past days are frozen.
#[derive(Debug, Serialize)]
pub struct EditPolicy {
    pub can_edit: bool,
    pub can_add: bool,
    pub is_past: bool,
    pub is_today: bool,
    pub is_future: bool,
}

impl EditPolicy {
    pub fn for_date(date: NaiveDate, today: NaiveDate) -> Self {
        EditPolicy {
            can_edit: date >= today,
            can_add: date >= today,
            is_past: date < today,
            is_today: date == today,
            is_future: date > today,
        }
    }
}
