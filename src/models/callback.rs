//! Callback request models

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Accepts digits, spaces and dashes with an optional leading plus,
/// at least 10 characters total
pub static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+]?[\d\s-]{10,}$").expect("invalid phone regex"));

/// Callback request row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Callback {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub message: Option<String>,
    pub product: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Processing status of a callback request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackStatus {
    Pending,
    Contacted,
    Completed,
}

impl CallbackStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(CallbackStatus::Pending),
            "contacted" => Some(CallbackStatus::Contacted),
            "completed" => Some(CallbackStatus::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallbackStatus::Pending => "pending",
            CallbackStatus::Contacted => "contacted",
            CallbackStatus::Completed => "completed",
        }
    }
}

/// Public callback submission body
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCallbackRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub message: Option<String>,
    #[validate(length(max = 200, message = "Product must be at most 200 characters"))]
    pub product: Option<String>,
}

/// Validated and trimmed callback submission
#[derive(Debug, Clone)]
pub struct NewCallback {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub message: Option<String>,
    pub product: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl CreateCallbackRequest {
    /// Validate required fields, phone format and length limits,
    /// trimming all values. Empty optional strings are dropped.
    pub fn validated(&self) -> Result<NewCallback, String> {
        let name = non_empty(&self.name).ok_or_else(|| "Name and phone are required".to_string())?;
        let phone =
            non_empty(&self.phone).ok_or_else(|| "Name and phone are required".to_string())?;

        if !PHONE_RE.is_match(&phone) {
            return Err("Invalid phone number format".to_string());
        }

        let normalized = CreateCallbackRequest {
            name: Some(name.clone()),
            phone: Some(phone.clone()),
            email: non_empty(&self.email).map(|e| e.to_lowercase()),
            message: non_empty(&self.message),
            product: non_empty(&self.product),
        };

        if let Err(errors) = normalized.validate() {
            return Err(validation_message(&errors));
        }

        Ok(NewCallback {
            name,
            phone,
            email: normalized.email,
            message: normalized.message,
            product: normalized.product,
        })
    }
}

/// Flatten validation errors into a single message
pub fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(msg) => messages.push(msg.to_string()),
                None => messages.push(format!("Invalid value for {field}")),
            }
        }
    }
    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join(". ")
    }
}

/// Query parameters for listing callbacks
#[derive(Debug, Deserialize)]
pub struct ListCallbacksQuery {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Body for updating a callback status
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub id: Option<String>,
    pub status: Option<String>,
}

/// Query parameters for deleting callbacks
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCallbacksQuery {
    pub id: Option<String>,
    pub delete_all: Option<String>,
}
