//! Audit log models

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Actions recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Login,
    Logout,
    PasswordChange,
    DeleteCallback,
    DeleteAllCallbacks,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Login => "login",
            AuditAction::Logout => "logout",
            AuditAction::PasswordChange => "password_change",
            AuditAction::DeleteCallback => "delete_callback",
            AuditAction::DeleteAllCallbacks => "delete_all_callbacks",
        }
    }
}

/// Audit log row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminLog {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub user_id: String,
    pub action: String,
    pub details: Option<String>,
    pub ip_address: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
}
