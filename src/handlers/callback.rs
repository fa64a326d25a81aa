//! 回拨请求的 HTTP 处理器
//! 公共提交端点 + 后台管理端点

use crate::{
    auth::ensure_dashboard_access,
    error::AppError,
    middleware::{AdminContext, AppState},
    models::{
        audit::AuditAction,
        callback::{
            CallbackStatus, CreateCallbackRequest, DeleteCallbacksQuery, ListCallbacksQuery,
            UpdateStatusRequest,
        },
    },
    repository::CallbackRepository,
    response::{ApiResponse, Paginated},
    services::audit_service::AuditEntry,
};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::auth::{get_client_ip, get_user_agent};

/// POST /api/callback（公共端点）
pub async fn create_callback(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCallbackRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_callback = req.validated().map_err(AppError::Validation)?;

    let repo = CallbackRepository::new(state.db.clone());
    let callback = repo.create(&new_callback).await?;

    metrics::counter!("callbacks_submitted_total").increment(1);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message_and_data(
            "Callback request submitted successfully",
            callback,
        )),
    ))
}

/// GET /api/admin/callbacks
pub async fn list_callbacks(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Query(query): Query<ListCallbacksQuery>,
) -> Result<impl IntoResponse, AppError> {
    ensure_dashboard_access(ctx.password_expired)?;

    // 非法状态值按无过滤处理
    let status = query
        .status
        .as_deref()
        .and_then(CallbackStatus::parse)
        .map(|s| s.as_str());

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(100).clamp(1, 500);
    let offset = (page - 1) * limit;

    let repo = CallbackRepository::new(state.db.clone());
    let callbacks = repo.list(status, limit, offset).await?;
    let total = repo.count(status).await?;

    Ok(Json(Paginated::new(callbacks, total, page, limit)))
}

/// PATCH /api/admin/callbacks
pub async fn update_callback_status(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    ensure_dashboard_access(ctx.password_expired)?;

    let (id, status) = match (req.id.as_deref(), req.status.as_deref()) {
        (Some(id), Some(status)) if !id.is_empty() && !status.is_empty() => (id, status),
        _ => {
            return Err(AppError::BadRequest(
                "ID and status are required".to_string(),
            ))
        }
    };

    let status = CallbackStatus::parse(status).ok_or_else(|| {
        AppError::BadRequest("Invalid status. Use: pending, contacted, or completed".to_string())
    })?;

    let id = Uuid::parse_str(id)
        .map_err(|_| AppError::NotFound("Callback request not found".to_string()))?;

    let repo = CallbackRepository::new(state.db.clone());
    let callback = repo
        .update_status(id, status.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound("Callback request not found".to_string()))?;

    Ok(Json(ApiResponse::with_message_and_data(
        "Callback status updated successfully",
        callback,
    )))
}

/// 批量删除响应
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteAllResponse {
    success: bool,
    message: String,
    deleted_count: u64,
}

/// DELETE /api/admin/callbacks
///
/// `?deleteAll=true` 删除全部，否则按 `?id=` 删除单条。
pub async fn delete_callbacks(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
    headers: HeaderMap,
    Query(query): Query<DeleteCallbacksQuery>,
) -> Result<axum::response::Response, AppError> {
    ensure_dashboard_access(ctx.password_expired)?;

    let client_ip = get_client_ip(&headers);
    let user_agent = get_user_agent(&headers);
    let repo = CallbackRepository::new(state.db.clone());

    if query.delete_all.as_deref() == Some("true") {
        let deleted_count = repo.delete_all().await?;

        state
            .audit_service
            .record(AuditEntry {
                admin_id: ctx.admin_id,
                user_id: &ctx.user_id,
                action: AuditAction::DeleteAllCallbacks,
                details: Some(format!("Deleted {} callback records", deleted_count)),
                ip_address: &client_ip,
                user_agent: &user_agent,
            })
            .await;

        return Ok(Json(DeleteAllResponse {
            success: true,
            message: format!("Successfully deleted {} callback records", deleted_count),
            deleted_count,
        })
        .into_response());
    }

    let id = query
        .id
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Callback ID is required".to_string()))?;

    let id = Uuid::parse_str(id)
        .map_err(|_| AppError::NotFound("Callback not found".to_string()))?;

    let callback = repo
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Callback not found".to_string()))?;

    state
        .audit_service
        .record(AuditEntry {
            admin_id: ctx.admin_id,
            user_id: &ctx.user_id,
            action: AuditAction::DeleteCallback,
            details: Some(format!(
                "Deleted callback from {} ({})",
                callback.name, callback.phone
            )),
            ip_address: &client_ip,
            user_agent: &user_agent,
        })
        .await;

    Ok(Json(ApiResponse::message("Callback deleted successfully")).into_response())
}
