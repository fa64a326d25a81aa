//! Callback repository (回拨请求数据访问)

use crate::{
    error::AppError,
    models::callback::{Callback, NewCallback},
};
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub struct CallbackRepository {
    db: PgPool,
}

impl CallbackRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 创建回拨请求，初始状态为 pending
    pub async fn create(&self, new: &NewCallback) -> Result<Callback, AppError> {
        let callback = sqlx::query_as::<_, Callback>(
            r#"
            INSERT INTO callbacks (name, phone, email, message, product)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(&new.message)
        .bind(&new.product)
        .fetch_one(&self.db)
        .await?;

        Ok(callback)
    }

    /// 分页查询，可按状态过滤，按创建时间倒序
    pub async fn list(
        &self,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Callback>, AppError> {
        let callbacks = sqlx::query_as::<_, Callback>(
            r#"
            SELECT * FROM callbacks
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(callbacks)
    }

    /// 统计数量，可按状态过滤
    pub async fn count(&self, status: Option<&str>) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query("SELECT COUNT(*) FROM callbacks WHERE ($1::text IS NULL OR status = $1)")
                .bind(status)
                .fetch_one(&self.db)
                .await?
                .get(0);

        Ok(count)
    }

    /// 更新状态，返回更新后的记录
    pub async fn update_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<Option<Callback>, AppError> {
        let callback = sqlx::query_as::<_, Callback>(
            r#"
            UPDATE callbacks
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.db)
        .await?;

        Ok(callback)
    }

    /// 删除单条记录，返回被删除的记录用于审计
    pub async fn delete(&self, id: Uuid) -> Result<Option<Callback>, AppError> {
        let callback = sqlx::query_as::<_, Callback>(
            "DELETE FROM callbacks WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(callback)
    }

    /// 删除全部记录，返回删除数量
    pub async fn delete_all(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM callbacks").execute(&self.db).await?;
        Ok(result.rows_affected())
    }

    /// 按状态统计（pending / contacted / completed）
    pub async fn status_counts(&self) -> Result<(i64, i64, i64), AppError> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'contacted') AS contacted,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed
            FROM callbacks
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        Ok((row.get("pending"), row.get("contacted"), row.get("completed")))
    }

    /// 最近提交的记录
    pub async fn recent(&self, limit: i64) -> Result<Vec<Callback>, AppError> {
        let callbacks = sqlx::query_as::<_, Callback>(
            "SELECT * FROM callbacks ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(callbacks)
    }
}
