//! 后台页面处理器
//! 页面本身是前端渲染的占位，访问控制由页面守卫完成

use axum::response::{Html, IntoResponse, Redirect};

/// GET /admin
/// 根路径直接跳转到登录页，守卫再按会话状态二次跳转
pub async fn admin_root() -> impl IntoResponse {
    Redirect::temporary("/admin/login")
}

/// GET /admin/login
pub async fn login_page() -> Html<&'static str> {
    Html("<!DOCTYPE html><title>Admin Login</title><h1>Admin Login</h1>")
}

/// GET /admin/dashboard
pub async fn dashboard_page() -> Html<&'static str> {
    Html("<!DOCTYPE html><title>Dashboard</title><h1>Dashboard</h1>")
}

/// GET /admin/callbacks
pub async fn callbacks_page() -> Html<&'static str> {
    Html("<!DOCTYPE html><title>Callbacks</title><h1>Callback Requests</h1>")
}

/// GET /admin/change-password
pub async fn change_password_page() -> Html<&'static str> {
    Html("<!DOCTYPE html><title>Change Password</title><h1>Change Password</h1>")
}
