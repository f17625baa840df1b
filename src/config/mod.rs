//! 配置模块
//!
//! 监听地址与常量

pub mod server;

pub use server::{RuntimeConfig, ServerConfig};
