//! 路由注册
//! 创建所有 API 路由和后台页面路由并应用中间件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

use crate::{handlers, middleware::AppState};

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查、产品目录、回拨提交）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/api/products", get(handlers::products::get_products))
        .route("/api/callback", post(handlers::callback::create_callback));

    // 认证路由（无需已有会话）
    let auth_routes = Router::new()
        .route("/api/admin/login", post(handlers::auth::login))
        .route("/api/admin/logout", post(handlers::auth::logout))
        .route("/api/admin/verify", get(handlers::auth::verify));

    // 需要有效会话的后台 API
    let admin_api_routes = Router::new()
        .route(
            "/api/admin/change-password",
            post(handlers::auth::change_password),
        )
        .route(
            "/api/admin/callbacks",
            get(handlers::callback::list_callbacks)
                .patch(handlers::callback::update_callback_status)
                .delete(handlers::callback::delete_callbacks),
        )
        .route("/api/admin/stats", get(handlers::stats::get_stats))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::admin_auth_middleware,
        ));

    // 后台页面，由页面守卫决定放行或跳转
    let page_routes = Router::new()
        .route("/admin", get(handlers::pages::admin_root))
        .route("/admin/login", get(handlers::pages::login_page))
        .route("/admin/dashboard", get(handlers::pages::dashboard_page))
        .route("/admin/callbacks", get(handlers::pages::callbacks_page))
        .route(
            "/admin/change-password",
            get(handlers::pages::change_password_page),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::admin_page_guard,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(admin_api_routes)
        .merge(page_routes)
        .layer(CompressionLayer::new())
        .layer(axum::middleware::from_fn(
            crate::middleware::request_tracking_middleware,
        ))
        .with_state(state)
}
