//! Admin account models and auth DTOs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Admin account row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub user_id: String,
    pub password_hash: String,
    pub last_password_changed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    /// Whether the password is older than the allowed max age
    pub fn password_expired(&self, max_age_days: i64) -> bool {
        Utc::now() - self.last_password_changed_at > Duration::days(max_age_days)
    }
}

/// Login request body
///
/// Fields are optional so missing values produce a 400 with a clear
/// message instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: Option<String>,
    pub password: Option<String>,
}

/// Payload returned on successful login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user_id: String,
    pub password_expired: bool,
    pub redirect_to: &'static str,
}

/// Change password request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_new_password: Option<String>,
}

/// Payload returned on successful password change
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordData {
    pub redirect_to: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_with_password_age(days: i64) -> Admin {
        let changed = Utc::now() - Duration::days(days);
        Admin {
            id: Uuid::new_v4(),
            user_id: "admin".to_string(),
            password_hash: "hash".to_string(),
            last_password_changed_at: changed,
            created_at: changed,
            updated_at: changed,
        }
    }

    #[test]
    fn test_password_expiry_boundary() {
        assert!(!admin_with_password_age(0).password_expired(30));
        assert!(!admin_with_password_age(29).password_expired(30));
        assert!(admin_with_password_age(31).password_expired(30));
    }
}
