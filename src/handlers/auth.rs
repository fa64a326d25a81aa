//! 认证相关的 HTTP 处理器
//! 登录、登出、会话校验、改密

use crate::{
    auth::{self, policy},
    error::AppError,
    middleware::{AdminContext, AppState},
    models::{
        admin::{ChangePasswordRequest, LoginRequest},
        audit::AuditAction,
    },
    response::ApiResponse,
    services::audit_service::AuditEntry,
};
use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// 获取客户端 IP
/// 优先 X-Forwarded-For 的第一个地址，其次 X-Real-IP
pub fn get_client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// 获取 User-Agent
pub fn get_user_agent(headers: &HeaderMap) -> String {
    headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let client_ip = get_client_ip(&headers);
    let user_agent = get_user_agent(&headers);

    let outcome = state
        .auth_service
        .login(req, &client_ip, &user_agent)
        .await?;

    let cookie = auth::set_cookie(
        &outcome.token,
        state.config.security.secure_cookies,
        state.token_service.token_exp_secs(),
    )
    .map_err(|e| AppError::Internal(format!("Failed to build session cookie: {}", e)))?;

    let mut response = Json(ApiResponse::with_message_and_data(
        "Login successful",
        outcome.data,
    ))
    .into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);

    Ok(response)
}

/// POST /api/admin/logout
///
/// 无论会话是否有效都清除 Cookie 并返回 200。
/// 有效会话才写登出审计。
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let token = auth::extract_token(&headers);

    if let policy::AuthStatus::Authenticated(claims) =
        policy::verify_auth(&state.token_service, token.as_deref())
    {
        if let Ok(admin_id) = claims.admin_id() {
            let client_ip = get_client_ip(&headers);
            let user_agent = get_user_agent(&headers);
            state
                .audit_service
                .record(AuditEntry {
                    admin_id,
                    user_id: &claims.user_id,
                    action: AuditAction::Logout,
                    details: Some("User logged out".to_string()),
                    ip_address: &client_ip,
                    user_agent: &user_agent,
                })
                .await;
        }
    }

    let mut response = Json(ApiResponse::message("Logout successful")).into_response();
    if let Ok(cookie) = auth::clear_cookie(state.config.security.secure_cookies) {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }

    response
}

/// GET /api/admin/verify
///
/// 会话校验，返回 authenticated 标记。未认证返回 401。
pub async fn verify(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let token = auth::extract_token(&headers);

    match policy::verify_auth(&state.token_service, token.as_deref()) {
        policy::AuthStatus::Authenticated(claims) => Json(json!({
            "success": true,
            "authenticated": true,
            "data": {
                "userId": claims.user_id,
                "passwordExpired": claims.password_expired,
            },
        }))
        .into_response(),
        policy::AuthStatus::Unauthenticated => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "success": false,
                "authenticated": false,
                "error": "Not authenticated",
            })),
        )
            .into_response(),
    }
}

/// POST /api/admin/change-password
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    headers: HeaderMap,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Response, AppError> {
    let client_ip = get_client_ip(&headers);
    let user_agent = get_user_agent(&headers);

    let (data, token) = state
        .auth_service
        .change_password(&ctx, &req, &client_ip, &user_agent)
        .await?;

    let cookie = auth::set_cookie(
        &token,
        state.config.security.secure_cookies,
        state.token_service.token_exp_secs(),
    )
    .map_err(|e| AppError::Internal(format!("Failed to build session cookie: {}", e)))?;

    let mut response = Json(ApiResponse::with_message_and_data(
        "Password changed successfully",
        data,
    ))
    .into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);

    Ok(response)
}
