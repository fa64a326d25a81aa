//! Access policy for the admin area
//! Pure decision functions shared by the page guard and API middleware

use crate::auth::jwt::{Claims, TokenService};
use crate::error::AppError;

/// Outcome of verifying a session token
#[derive(Debug, Clone)]
pub enum AuthStatus {
    /// No token, or the token failed verification
    Unauthenticated,
    /// Token verified; claims are a snapshot from issue time
    Authenticated(Claims),
}

/// Outcome of a dashboard access check
#[derive(Debug, Clone)]
pub enum AccessDecision {
    Allowed(Claims),
    Denied { redirect_to: &'static str },
}

/// Verify an optional session token into an auth status.
///
/// Never errors: verification failure is simply Unauthenticated.
pub fn verify_auth(token_service: &TokenService, token: Option<&str>) -> AuthStatus {
    match token {
        Some(token) => match token_service.verify(token) {
            Ok(claims) => AuthStatus::Authenticated(claims),
            Err(_) => AuthStatus::Unauthenticated,
        },
        None => AuthStatus::Unauthenticated,
    }
}

/// Decide whether a session may reach dashboard pages.
///
/// A session whose password was already expired at issue time is pushed
/// to the change-password page instead.
pub fn can_access_dashboard(token_service: &TokenService, token: Option<&str>) -> AccessDecision {
    match verify_auth(token_service, token) {
        AuthStatus::Unauthenticated => AccessDecision::Denied {
            redirect_to: "/admin/login",
        },
        AuthStatus::Authenticated(claims) if claims.password_expired => AccessDecision::Denied {
            redirect_to: "/admin/change-password",
        },
        AuthStatus::Authenticated(claims) => AccessDecision::Allowed(claims),
    }
}

/// API-side equivalent of the dashboard check, for handlers that already
/// hold verified claims.
pub fn ensure_dashboard_access(password_expired: bool) -> Result<(), AppError> {
    if password_expired {
        return Err(AppError::PasswordExpired);
    }
    Ok(())
}
