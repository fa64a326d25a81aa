//! 后台统计面板处理器

use crate::{
    auth::ensure_dashboard_access,
    error::AppError,
    middleware::{AdminContext, AppState},
    models::callback::Callback,
    repository::CallbackRepository,
    response::ApiResponse,
};
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct CallbackStats {
    pub total: i64,
    pub pending: i64,
    pub contacted: i64,
    pub completed: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminInfo {
    pub user_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    pub stats: CallbackStats,
    pub recent_callbacks: Vec<Callback>,
    pub admin: AdminInfo,
}

/// GET /api/admin/stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    ctx: AdminContext,
) -> Result<impl IntoResponse, AppError> {
    ensure_dashboard_access(ctx.password_expired)?;

    let repo = CallbackRepository::new(state.db.clone());
    let (pending, contacted, completed) = repo.status_counts().await?;
    let recent_callbacks = repo.recent(5).await?;

    Ok(Json(ApiResponse::with_data(StatsData {
        stats: CallbackStats {
            total: pending + contacted + completed,
            pending,
            contacted,
            completed,
        },
        recent_callbacks,
        admin: AdminInfo {
            user_id: ctx.user_id,
        },
    })))
}
