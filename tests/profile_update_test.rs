mod common;

use chrono::Local;
use daytrack::models::{CreateUser, UpdateProfileRequest};
use daytrack::services::{ChecklistService, UserService};
use pretty_assertions::assert_eq;

use common::test_pool;

#[tokio::test]
async fn signup_login_roundtrip_and_duplicate_username() {
    let pool = test_pool().await;
    let users = UserService::new(pool.clone());

    let created = users
        .create_user(CreateUser {
            username: "kira".into(),
            password: "hunter2sequel".into(),
        })
        .await
        .unwrap()
        .expect("fresh username");
    assert_eq!(created.username, "kira");

    // The profession rollup row is seeded with the account.
    let rollup: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profession_stats WHERE user_id = ?")
        .bind(created.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rollup, 1);

    assert!(users
        .verify_credentials("kira", "hunter2sequel")
        .await
        .unwrap()
        .is_some());
    assert!(users
        .verify_credentials("kira", "wrong")
        .await
        .unwrap()
        .is_none());

    // Username collision reports cleanly instead of erroring.
    let duplicate = users
        .create_user(CreateUser {
            username: "kira".into(),
            password: "another".into(),
        })
        .await
        .unwrap();
    assert!(duplicate.is_none());
}

#[tokio::test]
async fn profile_update_recomputes_bmi() {
    let pool = test_pool().await;
    let users = UserService::new(pool.clone());
    let user = users
        .create_user(CreateUser {
            username: "kira".into(),
            password: "hunter2sequel".into(),
        })
        .await
        .unwrap()
        .unwrap();

    let outcome = users
        .update_profile(
            user.id,
            UpdateProfileRequest {
                height: Some(170.0),
                weight: Some(65.0),
                blood_group: Some("O+".into()),
            },
        )
        .await
        .unwrap()
        .expect("user exists");

    assert_eq!(outcome.bmi, Some(22.5));
    assert_eq!(outcome.bmi_status.unwrap().status, "Normal");

    let stored = users.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(stored.bmi, Some(22.5));
    assert_eq!(stored.blood_group.as_deref(), Some("O+"));

    // Without both measurements there is no BMI.
    let outcome = users
        .update_profile(
            user.id,
            UpdateProfileRequest {
                height: Some(170.0),
                weight: None,
                blood_group: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(outcome.bmi, None);
    assert!(outcome.bmi_status.is_none());
}

#[tokio::test]
async fn measurement_change_regenerates_todays_checklist() {
    let pool = test_pool().await;
    let users = UserService::new(pool.clone());
    let checklists = ChecklistService::new(pool.clone());
    let today = Local::now().date_naive();

    let user = users
        .create_user(CreateUser {
            username: "kira".into(),
            password: "hunter2sequel".into(),
        })
        .await
        .unwrap()
        .unwrap();

    users
        .update_profile(
            user.id,
            UpdateProfileRequest {
                height: Some(170.0),
                weight: Some(65.0),
                blood_group: None,
            },
        )
        .await
        .unwrap();

    let stored = users.get_user(user.id).await.unwrap().unwrap();
    let targets =
        daytrack::models::NutritionTargets::from_profile(stored.height, stored.weight).unwrap();
    let before = checklists
        .ensure_for_date(user.id, today, Some(&targets))
        .await
        .unwrap();
    assert!(before.iter().any(|i| i.item_label.contains("104g")));

    // New measurements invalidate today's checklist...
    users
        .update_profile(
            user.id,
            UpdateProfileRequest {
                height: Some(180.0),
                weight: Some(82.0),
                blood_group: None,
            },
        )
        .await
        .unwrap();

    let remaining: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM nutrition_checklist WHERE user_id = ? AND entry_date = ?",
    )
    .bind(user.id)
    .bind(today)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(remaining, 0);

    // ...so the next access regenerates against the new targets.
    let stored = users.get_user(user.id).await.unwrap().unwrap();
    let new_targets =
        daytrack::models::NutritionTargets::from_profile(stored.height, stored.weight).unwrap();
    let after = checklists
        .ensure_for_date(user.id, today, Some(&new_targets))
        .await
        .unwrap();

    assert_eq!(after.len(), 17);
    assert!(after.iter().any(|i| i.item_label.contains("131g")));
    assert!(after.iter().all(|i| !i.is_checked));
    // Entirely new rows, not recycled ones.
    assert!(before.iter().all(|b| after.iter().all(|a| a.id != b.id)));
}
