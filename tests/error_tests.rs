//! 错误处理单元测试
//!
//! 测试应用错误类型的各种行为

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use skyhigh_site::error::AppError;

// ==================== 错误状态码测试 ====================

#[test]
fn test_error_status_codes() {
    assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        AppError::Authentication("Invalid credentials".to_string()).status_code(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(AppError::PasswordExpired.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(
        AppError::NotFound("resource".to_string()).status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        AppError::BadRequest("invalid".to_string()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::Validation("error".to_string()).status_code(),
        StatusCode::BAD_REQUEST
    );
}

#[test]
fn test_server_error_status_codes() {
    assert_eq!(
        AppError::Database(sqlx::Error::RowNotFound).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        AppError::Config("Invalid config".to_string()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        AppError::Internal("Something went wrong".to_string()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

// ==================== 用户消息测试 ====================

#[test]
fn test_user_messages_no_sensitive_info() {
    // 数据库错误不应该暴露技术细节
    let db_error = AppError::Database(sqlx::Error::RowNotFound);
    let message = db_error.user_message();
    assert_eq!(message, "Database error occurred");
    assert!(!message.to_lowercase().contains("sqlx"));
    assert!(!message.to_lowercase().contains("row"));
}

#[test]
fn test_user_messages_passthrough() {
    assert_eq!(
        AppError::BadRequest("All fields are required".to_string()).user_message(),
        "All fields are required"
    );
    assert_eq!(
        AppError::Authentication("Invalid credentials".to_string()).user_message(),
        "Invalid credentials"
    );
    assert_eq!(AppError::Unauthorized.user_message(), "Unauthorized");
}

// ==================== 响应体序列化测试 ====================

#[tokio::test]
async fn test_error_response_body_shape() {
    let response = AppError::Unauthorized.into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Unauthorized");
    assert_eq!(json["redirectTo"], "/admin/login");
}

#[tokio::test]
async fn test_password_expired_response_redirects() {
    let response = AppError::PasswordExpired.into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["redirectTo"], "/admin/change-password");
}

#[tokio::test]
async fn test_bad_request_omits_redirect() {
    let response = AppError::BadRequest("New passwords do not match".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["error"], "New passwords do not match");
    assert!(json.get("redirectTo").is_none());
}
