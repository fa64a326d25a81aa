//! 产品目录 API 测试
//!
//! 目录是静态数据，使用惰性连接池即可。

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

mod common;

fn test_app() -> axum::Router {
    skyhigh_site::routes::create_router(common::create_test_state(common::lazy_pool()))
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_all_products() {
    let (status, json) = get_json(test_app(), "/api/products").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 30);
    assert_eq!(json["data"].as_array().unwrap().len(), 30);
    assert_eq!(json["categories"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_titles_only() {
    let (status, json) = get_json(test_app(), "/api/products?titles=true").await;

    assert_eq!(status, StatusCode::OK);
    let titles = json["data"].as_array().unwrap();
    assert_eq!(titles.len(), 30);
    assert!(titles.iter().all(|t| t.is_string()));
    assert!(titles.contains(&serde_json::json!("Cuplock Scaffolding System")));
}

#[tokio::test]
async fn test_category_filter() {
    let (status, json) = get_json(test_app(), "/api/products?category=fittings").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 3);
    assert_eq!(json["category"]["id"], "fittings");
    assert!(json["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["category"] == "fittings"));
}

#[tokio::test]
async fn test_unknown_category_returns_404() {
    let (status, json) = get_json(test_app(), "/api/products?category=does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Category not found");
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, json) = get_json(test_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}
