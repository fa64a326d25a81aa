//! Authentication and session module

pub mod jwt;
pub mod password;
pub mod policy;
pub mod session;

pub use jwt::{Claims, TokenService};
pub use password::PasswordHasher;
pub use policy::{can_access_dashboard, ensure_dashboard_access, verify_auth, AccessDecision, AuthStatus};
pub use session::{clear_cookie, extract_token, set_cookie, SESSION_COOKIE};
