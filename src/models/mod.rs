//! 数据模型模块

pub mod admin;
pub mod audit;
pub mod callback;
pub mod product;
