//! Audit repository (审计数据访问)

use crate::{error::AppError, models::audit::AdminLog};
use sqlx::PgPool;

pub struct AuditRepository {
    db: PgPool,
}

impl AuditRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 插入审计日志
    pub async fn insert_log(&self, log: &AdminLog) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO admin_logs (
                id, admin_id, user_id, action, details, ip_address, user_agent, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(log.id)
        .bind(log.admin_id)
        .bind(&log.user_id)
        .bind(&log.action)
        .bind(&log.details)
        .bind(&log.ip_address)
        .bind(&log.user_agent)
        .bind(log.created_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}
