//! 认证服务：登录、改密

use crate::{
    auth::jwt::TokenService,
    auth::password::{self, PasswordHasher},
    config::AppConfig,
    error::AppError,
    middleware::AdminContext,
    models::{
        admin::{Admin, ChangePasswordData, ChangePasswordRequest, LoginData, LoginRequest},
        audit::AuditAction,
    },
    repository::AdminRepository,
    services::audit_service::{AuditEntry, AuditService},
};
use sqlx::PgPool;
use std::sync::Arc;

/// 登录成功结果：响应数据和要写入 Cookie 的令牌
pub struct LoginOutcome {
    pub data: LoginData,
    pub token: String,
}

pub struct AuthService {
    db: PgPool,
    token_service: Arc<TokenService>,
    config: Arc<AppConfig>,
    audit_service: Arc<AuditService>,
}

impl AuthService {
    pub fn new(
        db: PgPool,
        token_service: Arc<TokenService>,
        config: Arc<AppConfig>,
        audit_service: Arc<AuditService>,
    ) -> Self {
        Self {
            db,
            token_service,
            config,
            audit_service,
        }
    }

    /// 管理员登录
    ///
    /// 用户不存在和密码错误返回完全相同的 401，避免账号枚举。
    pub async fn login(
        &self,
        req: LoginRequest,
        client_ip: &str,
        user_agent: &str,
    ) -> Result<LoginOutcome, AppError> {
        let user_id = req
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let password = req.password.as_deref().filter(|s| !s.is_empty());

        let (user_id, password) = match (user_id, password) {
            (Some(u), Some(p)) => (u.to_lowercase(), p),
            _ => {
                return Err(AppError::BadRequest(
                    "User ID and password are required".to_string(),
                ))
            }
        };

        let repo = AdminRepository::new(self.db.clone());

        let admin: Admin = repo
            .find_by_user_id(&user_id)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid credentials".to_string()))?;

        let hasher = PasswordHasher::new();
        hasher
            .verify(password, &admin.password_hash)
            .map_err(|_| AppError::Authentication("Invalid credentials".to_string()))?;

        let password_expired = admin.password_expired(self.config.security.password_max_age_days);

        let token = self
            .token_service
            .issue(&admin.id, &admin.user_id, password_expired)?;

        let details = if password_expired {
            "Password expired - redirect to change password"
        } else {
            "Successful login"
        };
        self.audit_service
            .record(AuditEntry {
                admin_id: admin.id,
                user_id: &admin.user_id,
                action: AuditAction::Login,
                details: Some(details.to_string()),
                ip_address: client_ip,
                user_agent,
            })
            .await;

        let redirect_to = if password_expired {
            "/admin/change-password"
        } else {
            "/admin/dashboard"
        };

        Ok(LoginOutcome {
            data: LoginData {
                user_id: admin.user_id,
                password_expired,
                redirect_to,
            },
            token,
        })
    }

    /// 修改密码并重新签发会话令牌
    pub async fn change_password(
        &self,
        ctx: &AdminContext,
        req: &ChangePasswordRequest,
        client_ip: &str,
        user_agent: &str,
    ) -> Result<(ChangePasswordData, String), AppError> {
        let (current, new, confirm) = match (
            req.current_password.as_deref().filter(|s| !s.is_empty()),
            req.new_password.as_deref().filter(|s| !s.is_empty()),
            req.confirm_new_password.as_deref().filter(|s| !s.is_empty()),
        ) {
            (Some(c), Some(n), Some(f)) => (c, n, f),
            _ => return Err(AppError::BadRequest("All fields are required".to_string())),
        };

        if new != confirm {
            return Err(AppError::BadRequest(
                "New passwords do not match".to_string(),
            ));
        }

        let violations = password::policy_violations(new, &self.config.security);
        if !violations.is_empty() {
            return Err(AppError::BadRequest(violations.join(". ")));
        }

        let repo = AdminRepository::new(self.db.clone());

        let admin = repo
            .find_by_id(&ctx.admin_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))?;

        let hasher = PasswordHasher::new();
        hasher
            .verify(current, &admin.password_hash)
            .map_err(|_| AppError::BadRequest("Current password is incorrect".to_string()))?;

        // 新旧密码相同时拒绝
        if hasher.verify(new, &admin.password_hash).is_ok() {
            return Err(AppError::BadRequest(
                "New password must be different from current password".to_string(),
            ));
        }

        let new_hash = hasher.hash(new)?;
        repo.update_password(admin.id, &new_hash).await?;

        // 改密后签发新令牌，密码过期标记清零
        let token = self.token_service.issue(&admin.id, &admin.user_id, false)?;

        self.audit_service
            .record(AuditEntry {
                admin_id: admin.id,
                user_id: &admin.user_id,
                action: AuditAction::PasswordChange,
                details: Some("Password changed successfully".to_string()),
                ip_address: client_ip,
                user_agent,
            })
            .await;

        Ok((
            ChangePasswordData {
                redirect_to: "/admin/dashboard",
            },
            token,
        ))
    }
}
