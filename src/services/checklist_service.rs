use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use crate::models::{ChecklistItem, DailyStats, GeneratedItem, ItemType, NutritionTargets};
use crate::services::activity_service::recalculate_daily_activity;

const WORKOUT_ROUTINES: [&str; 6] = [
    "Cardio & Core: 30 mins running/cycling + plank & crunches",
    "Leg Day: Squats, Lunges, Calf raises, Glute bridges",
    "Chest & Triceps: Push-ups, Dips, Tricep extensions",
    "Back & Biceps: Pull-ups, Rows, Bicep curls",
    "Full Body HIIT: Burpees, Jumping jacks, Mountain climbers",
    "Active Recovery: 45 mins brisk walking or yoga stretch",
];

const BREAKFAST_PROTEIN: [&str; 8] = [
    "eggs",
    "Greek yogurt",
    "paneer",
    "protein smoothie",
    "tofu scramble",
    "cottage cheese",
    "moong dal chilla",
    "sprouted moong",
];

const LUNCH_PROTEIN: [&str; 8] = [
    "chicken breast",
    "dal (lentils)",
    "tofu",
    "tempeh",
    "legumes (chickpeas, kidney beans)",
    "soy chunks",
    "grilled fish",
    "lean beef",
];

const DINNER_PROTEIN: [&str; 8] = [
    "fish (salmon, tuna)",
    "beans",
    "cottage cheese",
    "quinoa",
    "turkey",
    "mushrooms with peas",
    "edamame",
    "lentil soup",
];

const VEGETABLES: [&str; 9] = [
    "broccoli",
    "spinach",
    "carrots",
    "cauliflower",
    "bell peppers",
    "brussels sprouts",
    "sweet potatoes",
    "kale",
    "green beans",
];

const GRAINS: [&str; 8] = [
    "oats",
    "brown rice",
    "roti (whole wheat)",
    "quinoa",
    "barley",
    "buckwheat",
    "millet",
    "whole grain bread",
];

const FRUITS: [&str; 8] = [
    "apple", "guava", "banana", "pear", "orange", "berries", "papaya", "pomegranate",
];

/// Seed derived from a stable hash of the ISO date string, so the same date
/// always produces the same generator sequence.
fn seed_from_date(date: NaiveDate) -> u64 {
    let digest = md5::compute(date.format("%Y-%m-%d").to_string());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest.0[..8]);
    u64::from_be_bytes(bytes)
}

fn draw<'a>(rng: &mut StdRng, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

/// Build the full day checklist: 4 workout items, then (when targets are
/// known) 4 protein, 4 fiber and 5 water items, in that order.
///
/// With a seed date the output is fully deterministic; the draw order is
/// fixed (breakfast, lunch, dinner, veg1, veg2, grain, fruit) so the
/// generator sequence is reproducible. Without one the menu is random.
pub fn build_checklist(
    targets: Option<&NutritionTargets>,
    seed_date: Option<NaiveDate>,
) -> Vec<GeneratedItem> {
    let mut rng = match seed_date {
        Some(date) => StdRng::seed_from_u64(seed_from_date(date)),
        None => StdRng::from_entropy(),
    };

    // Workout routine rotates by ordinal day number, one full cycle per
    // WORKOUT_ROUTINES.len() days.
    let day_index = match seed_date {
        Some(date) => date.num_days_from_ce() as usize,
        None => rng.gen_range(0..=1000),
    };
    let routine = WORKOUT_ROUTINES[day_index % WORKOUT_ROUTINES.len()];

    let mut checklist = vec![
        GeneratedItem::new("Warm-up: 5-10 mins dynamic stretching", ItemType::Workout),
        GeneratedItem::new(routine, ItemType::Workout),
        GeneratedItem::new("Cool-down: 5 mins static stretching", ItemType::Workout),
        GeneratedItem::new("Log your completion and effort", ItemType::Workout),
    ];

    let targets = match targets {
        Some(t) => t,
        None => return checklist,
    };

    let per_meal = (targets.protein_g as f64 / 3.0).round() as i64;

    let breakfast = draw(&mut rng, &BREAKFAST_PROTEIN);
    let lunch = draw(&mut rng, &LUNCH_PROTEIN);
    let dinner = draw(&mut rng, &DINNER_PROTEIN);

    // Two distinct vegetables: the first pick leaves the candidate set.
    let mut veg_pool: Vec<&str> = VEGETABLES.to_vec();
    let veg1 = veg_pool.remove(rng.gen_range(0..veg_pool.len()));
    let veg2 = veg_pool.remove(rng.gen_range(0..veg_pool.len()));

    let grain = draw(&mut rng, &GRAINS);
    let fruit = draw(&mut rng, &FRUITS);

    checklist.extend([
        GeneratedItem::new(
            format!("Breakfast protein (~{per_meal}g) — {breakfast}"),
            ItemType::Protein,
        ),
        GeneratedItem::new(
            format!("Lunch protein (~{per_meal}g) — {lunch}"),
            ItemType::Protein,
        ),
        GeneratedItem::new(
            format!("Dinner protein (~{per_meal}g) — {dinner}"),
            ItemType::Protein,
        ),
        GeneratedItem::new(
            format!("Daily protein target: {}g total", targets.protein_g),
            ItemType::Protein,
        ),
        GeneratedItem::new(
            format!(
                "Vegetable servings ({veg1}, {veg2}) — towards {}g fiber goal",
                targets.fiber_g
            ),
            ItemType::Fiber,
        ),
        GeneratedItem::new(
            format!("Whole grains for at least one meal — {grain}"),
            ItemType::Fiber,
        ),
        GeneratedItem::new(format!("One serving of fruit — {fruit}"), ItemType::Fiber),
        GeneratedItem::new(
            format!("Daily fiber target: {}g total", targets.fiber_g),
            ItemType::Fiber,
        ),
        GeneratedItem::new("Morning: 500ml within 30 min of waking", ItemType::Water),
        GeneratedItem::new("Pre-lunch: 300ml before your meal", ItemType::Water),
        GeneratedItem::new("Afternoon: 500ml between 2–4 PM", ItemType::Water),
        GeneratedItem::new("Evening: 300ml post-workout or with snack", ItemType::Water),
        GeneratedItem::new(
            format!("Daily water target: {}L (based on your weight)", targets.water_l),
            ItemType::Water,
        ),
    ]);

    checklist
}

#[derive(Clone)]
pub struct ChecklistService {
    db: SqlitePool,
}

impl ChecklistService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_for_date(&self, user_id: i64, date: NaiveDate) -> Result<Vec<ChecklistItem>> {
        let items = sqlx::query_as::<_, ChecklistItem>(
            "SELECT * FROM nutrition_checklist WHERE user_id = ? AND entry_date = ? ORDER BY id",
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        Ok(items)
    }

    /// Return the checklist for (user, date), generating it on first access.
    ///
    /// Checklists persisted before workout items existed get the workout
    /// block appended once; otherwise existing rows are never regenerated.
    pub async fn ensure_for_date(
        &self,
        user_id: i64,
        date: NaiveDate,
        targets: Option<&NutritionTargets>,
    ) -> Result<Vec<ChecklistItem>> {
        let existing = self.list_for_date(user_id, date).await?;

        if existing.is_empty() {
            let generated = build_checklist(targets, Some(date));
            let mut tx = self.db.begin().await?;
            insert_items(&mut tx, user_id, date, &generated).await?;
            recalculate_daily_activity(&mut tx, user_id, date).await?;
            tx.commit().await?;
            info!(user_id, %date, count = generated.len(), "generated nutrition checklist");
        } else if !existing.iter().any(|i| i.item_type == ItemType::Workout) {
            let workout_items: Vec<GeneratedItem> = build_checklist(targets, Some(date))
                .into_iter()
                .filter(|i| i.item_type == ItemType::Workout)
                .collect();
            let mut tx = self.db.begin().await?;
            insert_items(&mut tx, user_id, date, &workout_items).await?;
            recalculate_daily_activity(&mut tx, user_id, date).await?;
            tx.commit().await?;
            info!(user_id, %date, "backfilled workout items onto existing checklist");
        } else {
            return Ok(existing);
        }

        self.list_for_date(user_id, date).await
    }

    /// Check or uncheck one item, recomputing that item's day.
    pub async fn toggle_item(
        &self,
        user_id: i64,
        item_id: i64,
        checked: bool,
    ) -> Result<Option<DailyStats>> {
        let entry_date: Option<NaiveDate> = sqlx::query_scalar(
            "SELECT entry_date FROM nutrition_checklist WHERE id = ? AND user_id = ?",
        )
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        let date = match entry_date {
            Some(date) => date,
            None => return Ok(None),
        };

        let mut tx = self.db.begin().await?;
        sqlx::query("UPDATE nutrition_checklist SET is_checked = ? WHERE id = ? AND user_id = ?")
            .bind(checked)
            .bind(item_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        let stats = recalculate_daily_activity(&mut tx, user_id, date).await?;
        tx.commit().await?;

        Ok(Some(stats))
    }

    /// Drop the checklist for a date so the next access regenerates it with
    /// fresh targets. Used when height/weight changes.
    pub async fn invalidate_for_date(&self, user_id: i64, date: NaiveDate) -> Result<()> {
        let mut tx = self.db.begin().await?;
        sqlx::query("DELETE FROM nutrition_checklist WHERE user_id = ? AND entry_date = ?")
            .bind(user_id)
            .bind(date)
            .execute(&mut *tx)
            .await?;
        recalculate_daily_activity(&mut tx, user_id, date).await?;
        tx.commit().await?;

        Ok(())
    }
}

async fn insert_items(
    conn: &mut SqliteConnection,
    user_id: i64,
    date: NaiveDate,
    items: &[GeneratedItem],
) -> Result<()> {
    for item in items {
        sqlx::query(
            "INSERT INTO nutrition_checklist (user_id, entry_date, item_label, item_type)
             VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(date)
        .bind(&item.label)
        .bind(item.item_type)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> NutritionTargets {
        NutritionTargets {
            bmi: 22.5,
            protein_g: 104,
            fiber_g: 25,
            water_l: 2.3,
        }
    }

    #[test]
    fn same_seed_date_is_reproducible() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let a = build_checklist(Some(&targets()), Some(date));
        let b = build_checklist(Some(&targets()), Some(date));
        assert_eq!(a, b);
    }

    #[test]
    fn emission_order_is_grouped_by_type() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let items = build_checklist(Some(&targets()), Some(date));
        assert_eq!(items.len(), 17);

        let types: Vec<ItemType> = items.iter().map(|i| i.item_type).collect();
        let expected: Vec<ItemType> = std::iter::repeat(ItemType::Workout)
            .take(4)
            .chain(std::iter::repeat(ItemType::Protein).take(4))
            .chain(std::iter::repeat(ItemType::Fiber).take(4))
            .chain(std::iter::repeat(ItemType::Water).take(5))
            .collect();
        assert_eq!(types, expected);
    }

    #[test]
    fn absent_targets_degrade_to_workout_only() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let items = build_checklist(None, Some(date));
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|i| i.item_type == ItemType::Workout));
    }

    #[test]
    fn workout_rotates_daily_and_cycles() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let today = build_checklist(None, Some(date));
        let tomorrow = build_checklist(None, Some(date.succ_opt().unwrap()));
        assert_ne!(today[1], tomorrow[1]);

        // Full cycle: six days later the same routine comes back around.
        let next_cycle =
            build_checklist(None, Some(date + chrono::Duration::days(WORKOUT_ROUTINES.len() as i64)));
        assert_eq!(today[1], next_cycle[1]);
    }

    #[test]
    fn vegetables_are_distinct() {
        for day in 1..=28 {
            let date = NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
            let items = build_checklist(Some(&targets()), Some(date));
            let veg_line = &items[8].label;
            let inside = veg_line
                .split_once('(')
                .and_then(|(_, rest)| rest.split_once(')'))
                .map(|(picks, _)| picks)
                .unwrap();
            let picks: Vec<&str> = inside.split(", ").collect();
            assert_eq!(picks.len(), 2, "two vegetables on the line: {veg_line}");
            assert_ne!(picks[0], picks[1], "distinct picks: {veg_line}");
        }
    }

    #[test]
    fn target_lines_quote_the_profile_numbers() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let items = build_checklist(Some(&targets()), Some(date));
        assert!(items[7].label.contains("104g"));
        assert!(items[11].label.contains("25g"));
        assert!(items[16].label.contains("2.3L"));
        // Per-meal share is a third of the daily target.
        assert!(items[4].label.contains("~35g"));
    }
}
