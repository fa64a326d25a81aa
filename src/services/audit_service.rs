//! 审计日志服务
//! 记录管理员操作到 admin_logs 表，写入失败不影响主流程

use crate::{
    models::audit::{AdminLog, AuditAction},
    repository::AuditRepository,
};
use sqlx::PgPool;
use uuid::Uuid;

/// 审计记录参数
#[derive(Debug, Clone)]
pub struct AuditEntry<'a> {
    pub admin_id: Uuid,
    pub user_id: &'a str,
    pub action: AuditAction,
    pub details: Option<String>,
    pub ip_address: &'a str,
    pub user_agent: &'a str,
}

pub struct AuditService {
    db: PgPool,
}

impl AuditService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 记录一条审计日志
    ///
    /// 写入失败只记录警告日志，调用方的操作永远不会因此失败。
    pub async fn record(&self, entry: AuditEntry<'_>) {
        let log = AdminLog {
            id: Uuid::new_v4(),
            admin_id: entry.admin_id,
            user_id: entry.user_id.to_string(),
            action: entry.action.as_str().to_string(),
            details: entry.details,
            ip_address: entry.ip_address.to_string(),
            user_agent: entry.user_agent.to_string(),
            created_at: chrono::Utc::now(),
        };

        let repo = AuditRepository::new(self.db.clone());
        if let Err(e) = repo.insert_log(&log).await {
            tracing::warn!(
                action = log.action,
                admin_id = %log.admin_id,
                error = %e,
                "Failed to write audit log"
            );
        }
    }
}
