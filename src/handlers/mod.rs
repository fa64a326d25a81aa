//! HTTP 处理器模块

pub mod auth;
pub mod callback;
pub mod health;
pub mod pages;
pub mod products;
pub mod stats;
