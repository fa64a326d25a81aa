//! HTTP 中间件
//! 请求追踪、会话认证、后台页面访问守卫

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::SET_COOKIE, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::auth::{self, policy, TokenService};
use crate::error::AppError;

/// 应用状态
///
/// 服务使用 Arc 包装，多个请求共享同一实例，Clone 成本低廉
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::AppConfig,
    pub db: sqlx::PgPool,
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<crate::services::AuthService>,
    pub audit_service: Arc<crate::services::AuditService>,
}

/// 认证上下文（附加到请求扩展）
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub admin_id: Uuid,
    pub user_id: String,
    /// 签发令牌时密码是否已过期（快照，不会重新计算）
    pub password_expired: bool,
}

// 实现 FromRequestParts 以便在 handler 中直接提取 AdminContext
impl<S> FromRequestParts<S> for AdminContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// 请求追踪中间件
/// 为每个请求生成 trace_id 和 request_id，并记录指标
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let uri = req.uri().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    async move {
        let start = Instant::now();

        let response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        metrics::counter!("http_requests_total").increment(1);
        metrics::histogram!("http_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::info!(
            method = %method,
            uri = %uri,
            status = status,
            elapsed_ms = elapsed.as_millis(),
            "Request completed"
        );

        let mut response = response;
        if let Ok(value) = trace_id.parse() {
            response.headers_mut().insert("x-trace-id", value);
        }
        if let Ok(value) = request_id.parse() {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

/// 从请求头中提取或生成 trace_id
fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// 会话认证中间件 - 后台 API 必须认证
///
/// 从会话 Cookie 中提取令牌，验证后将 AdminContext 附加到请求扩展。
/// 任何验证失败统一返回 401。
pub async fn admin_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = auth::extract_token(req.headers()).ok_or(AppError::Unauthorized)?;

    let claims = state.token_service.verify(&token)?;

    let context = AdminContext {
        admin_id: claims.admin_id()?,
        user_id: claims.user_id,
        password_expired: claims.password_expired,
    };

    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

/// 后台页面分类
enum AdminPage {
    Login,
    ChangePassword,
    Protected,
    Other,
}

fn classify_admin_page(path: &str) -> AdminPage {
    match path {
        "/admin/login" => AdminPage::Login,
        "/admin/change-password" => AdminPage::ChangePassword,
        p if p.starts_with("/admin/dashboard") || p.starts_with("/admin/callbacks") => {
            AdminPage::Protected
        }
        _ => AdminPage::Other,
    }
}

/// 后台页面访问守卫
///
/// 根据会话状态决定放行或跳转：
/// - 登录页：已登录跳转到后台首页，密码过期跳转到改密页
/// - 改密页：有有效会话即放行（无论密码是否过期）
/// - 受保护页：未登录跳转登录页，密码过期跳转改密页
///
/// 无效令牌一律连同清除 Cookie 的响应头一起跳转回登录页。
pub async fn admin_page_guard(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let token = auth::extract_token(req.headers());
    let status = policy::verify_auth(&state.token_service, token.as_deref());
    let secure = state.config.security.secure_cookies;
    let had_cookie = token.is_some();

    match classify_admin_page(req.uri().path()) {
        AdminPage::Login => match status {
            policy::AuthStatus::Authenticated(claims) if claims.password_expired => {
                Redirect::temporary("/admin/change-password").into_response()
            }
            policy::AuthStatus::Authenticated(_) => {
                Redirect::temporary("/admin/dashboard").into_response()
            }
            policy::AuthStatus::Unauthenticated => next.run(req).await,
        },
        AdminPage::ChangePassword => match status {
            policy::AuthStatus::Authenticated(_) => next.run(req).await,
            policy::AuthStatus::Unauthenticated if had_cookie => {
                redirect_clearing_session("/admin/login", secure)
            }
            policy::AuthStatus::Unauthenticated => {
                Redirect::temporary("/admin/login").into_response()
            }
        },
        AdminPage::Protected => match status {
            policy::AuthStatus::Authenticated(claims) if claims.password_expired => {
                Redirect::temporary("/admin/change-password").into_response()
            }
            policy::AuthStatus::Authenticated(_) => next.run(req).await,
            policy::AuthStatus::Unauthenticated if had_cookie => {
                redirect_clearing_session("/admin/login", secure)
            }
            policy::AuthStatus::Unauthenticated => {
                Redirect::temporary("/admin/login").into_response()
            }
        },
        AdminPage::Other => next.run(req).await,
    }
}

/// 跳转并清除会话 Cookie
fn redirect_clearing_session(target: &str, secure: bool) -> Response {
    let mut response = Redirect::temporary(target).into_response();
    if let Ok(value) = auth::clear_cookie(secure) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}
