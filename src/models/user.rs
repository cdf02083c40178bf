use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub blood_group: Option<String>,
    pub bmi: Option<f64>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub blood_group: Option<String>,
    pub bmi: Option<f64>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            height: user.height,
            weight: user.weight,
            blood_group: user.blood_group,
            bmi: user.bmi,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub blood_group: Option<String>,
}

/// BMI band with a display color and a one-line recommendation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BmiStatus {
    pub status: &'static str,
    pub color: &'static str,
    pub recommendation: &'static str,
}

impl BmiStatus {
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiStatus {
                status: "Underweight",
                color: "#3b82f6",
                recommendation: "Increase caloric intake",
            }
        } else if bmi < 25.0 {
            BmiStatus {
                status: "Normal",
                color: "#10b981",
                recommendation: "Maintain current diet and exercise",
            }
        } else if bmi < 30.0 {
            BmiStatus {
                status: "Overweight",
                color: "#f59e0b",
                recommendation: "Reduce caloric intake, increase exercise",
            }
        } else {
            BmiStatus {
                status: "Obese",
                color: "#ef4444",
                recommendation: "Consult healthcare provider",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_covers_all_bands() {
        assert_eq!(BmiStatus::classify(17.0).status, "Underweight");
        assert_eq!(BmiStatus::classify(22.5).status, "Normal");
        assert_eq!(BmiStatus::classify(27.0).status, "Overweight");
        assert_eq!(BmiStatus::classify(33.0).status, "Obese");
    }

    #[test]
    fn band_edges() {
        assert_eq!(BmiStatus::classify(18.5).status, "Normal");
        assert_eq!(BmiStatus::classify(25.0).status, "Overweight");
        assert_eq!(BmiStatus::classify(30.0).status, "Obese");
    }
}
