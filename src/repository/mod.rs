//! 数据访问层

pub mod admin_repo;
pub mod audit_repo;
pub mod callback_repo;

pub use admin_repo::AdminRepository;
pub use audit_repo::AuditRepository;
pub use callback_repo::CallbackRepository;
