//! 后台页面守卫与会话路由测试
//!
//! 守卫逻辑不触达数据库，使用惰性连接池即可。

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

mod common;

fn test_app() -> (axum::Router, std::sync::Arc<skyhigh_site::middleware::AppState>) {
    let state = common::create_test_state(common::lazy_pool());
    (skyhigh_site::routes::create_router(state.clone()), state)
}

fn get_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, format!("admin_token={cookie}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn location(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[tokio::test]
async fn test_dashboard_without_session_redirects_to_login() {
    let (app, _) = test_app();

    let response = app
        .oneshot(get_with_cookie("/admin/dashboard", None))
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(location(&response).as_deref(), Some("/admin/login"));
}

#[tokio::test]
async fn test_dashboard_with_expired_password_redirects_to_change_password() {
    let (app, state) = test_app();
    let token = state
        .token_service
        .issue(&Uuid::new_v4(), "admin", true)
        .unwrap();

    let response = app
        .oneshot(get_with_cookie("/admin/dashboard", Some(&token)))
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(
        location(&response).as_deref(),
        Some("/admin/change-password")
    );
}

#[tokio::test]
async fn test_change_password_page_allows_expired_password_session() {
    let (app, state) = test_app();
    let token = state
        .token_service
        .issue(&Uuid::new_v4(), "admin", true)
        .unwrap();

    let response = app
        .oneshot(get_with_cookie("/admin/change-password", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_page_with_valid_session_redirects_to_dashboard() {
    let (app, state) = test_app();
    let token = state
        .token_service
        .issue(&Uuid::new_v4(), "admin", false)
        .unwrap();

    let response = app
        .oneshot(get_with_cookie("/admin/login", Some(&token)))
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(location(&response).as_deref(), Some("/admin/dashboard"));
}

#[tokio::test]
async fn test_login_page_without_session_renders() {
    let (app, _) = test_app();

    let response = app
        .oneshot(get_with_cookie("/admin/login", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_cookie_is_cleared_on_redirect() {
    let (app, _) = test_app();

    let response = app
        .oneshot(get_with_cookie("/admin/dashboard", Some("garbage-token")))
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(location(&response).as_deref(), Some("/admin/login"));

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("expected clearing Set-Cookie header");
    assert!(set_cookie.starts_with("admin_token=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_admin_root_redirects_to_login() {
    let (app, _) = test_app();

    let response = app.oneshot(get_with_cookie("/admin", None)).await.unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(location(&response).as_deref(), Some("/admin/login"));
}

#[tokio::test]
async fn test_logout_without_session_still_succeeds() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("expected clearing Set-Cookie header");
    assert!(set_cookie.contains("Max-Age=0"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Logout successful");
}

#[tokio::test]
async fn test_verify_without_session_returns_401() {
    let (app, _) = test_app();

    let response = app
        .oneshot(get_with_cookie("/api/admin/verify", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["authenticated"], false);
}

#[tokio::test]
async fn test_verify_with_session_returns_claims() {
    let (app, state) = test_app();
    let token = state
        .token_service
        .issue(&Uuid::new_v4(), "admin", false)
        .unwrap();

    let response = app
        .oneshot(get_with_cookie("/api/admin/verify", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["authenticated"], true);
    assert_eq!(json["data"]["userId"], "admin");
    assert_eq!(json["data"]["passwordExpired"], false);
}

#[tokio::test]
async fn test_admin_api_without_session_returns_401() {
    let (app, _) = test_app();

    let response = app
        .oneshot(get_with_cookie("/api/admin/callbacks", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["redirectTo"], "/admin/login");
}

#[tokio::test]
async fn test_admin_api_with_expired_password_returns_403() {
    let (app, state) = test_app();
    let token = state
        .token_service
        .issue(&Uuid::new_v4(), "admin", true)
        .unwrap();

    let response = app
        .oneshot(get_with_cookie("/api/admin/stats", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["redirectTo"], "/admin/change-password");
}
