use anyhow::Result;
use chrono::{Local, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::auth::password::{hash_password, verify_password};
use crate::models::{compute_bmi, BmiStatus, CreateUser, UpdateProfileRequest, User, UserResponse};
use crate::services::checklist_service::ChecklistService;

/// Result of a profile update, echoed to the client so it can refresh the
/// BMI badge without re-fetching the user.
#[derive(Debug, serde::Serialize)]
pub struct ProfileUpdateOutcome {
    pub bmi: Option<f64>,
    pub bmi_status: Option<BmiStatus>,
}

#[derive(Clone)]
pub struct UserService {
    db: SqlitePool,
}

impl UserService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Create an account with its profession_stats row. `None` when the
    /// username is already taken.
    pub async fn create_user(&self, user_data: CreateUser) -> Result<Option<UserResponse>> {
        let password_hash = hash_password(&user_data.password)?;

        let mut tx = self.db.begin().await?;
        let insert = sqlx::query(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)",
        )
        .bind(&user_data.username)
        .bind(&password_hash)
        .bind(Utc::now().naive_utc())
        .execute(&mut *tx)
        .await;

        let user_id = match insert {
            Ok(result) => result.last_insert_rowid(),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        sqlx::query("INSERT INTO profession_stats (user_id) VALUES (?)")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(user_id, username = %user_data.username, "user created");

        Ok(Some(UserResponse {
            id: user_id,
            username: user_data.username,
            height: None,
            weight: None,
            blood_group: None,
            bmi: None,
        }))
    }

    /// `None` on unknown username or wrong password.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserResponse>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.db)
            .await?;

        let user = match user {
            Some(user) => user,
            None => return Ok(None),
        };

        if verify_password(password, &user.password_hash)? {
            Ok(Some(user.into()))
        } else {
            Ok(None)
        }
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// Update height/weight/blood group, recompute BMI, and throw away
    /// today's checklist when both measurements are supplied so the next
    /// physical-page visit regenerates it against the new targets.
    pub async fn update_profile(
        &self,
        user_id: i64,
        request: UpdateProfileRequest,
    ) -> Result<Option<ProfileUpdateOutcome>> {
        let bmi = compute_bmi(request.height, request.weight);

        let result = sqlx::query(
            "UPDATE users SET height = ?, weight = ?, blood_group = ?, bmi = ? WHERE id = ?",
        )
        .bind(request.height)
        .bind(request.weight)
        .bind(&request.blood_group)
        .bind(bmi)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        if request.height.is_some() && request.weight.is_some() {
            let today = Local::now().date_naive();
            ChecklistService::new(self.db.clone())
                .invalidate_for_date(user_id, today)
                .await?;
            info!(user_id, "profile measurements changed, checklist invalidated");
        }

        Ok(Some(ProfileUpdateOutcome {
            bmi,
            bmi_status: bmi.map(BmiStatus::classify),
        }))
    }
}
