//! Business logic services layer

pub mod audit_service;
pub mod auth_service;

pub use audit_service::AuditService;
pub use auth_service::AuthService;
