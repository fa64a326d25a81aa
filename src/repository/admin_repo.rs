//! Admin repository (数据库访问层)

use crate::{error::AppError, models::admin::Admin};
use sqlx::PgPool;
use uuid::Uuid;

pub struct AdminRepository {
    db: PgPool,
}

impl AdminRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 根据登录 ID 查找管理员（忽略大小写）
    pub async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT * FROM admins WHERE LOWER(user_id) = LOWER($1)"
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(admin)
    }

    /// 根据 ID 查找管理员
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT * FROM admins WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(admin)
    }

    /// 更新密码，同时刷新改密时间戳
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE admins
            SET
                password_hash = $2,
                last_password_changed_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            "#
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
