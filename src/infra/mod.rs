//! 基础设施模块
//!
//! 封装外部依赖（操作系统指标查询）

pub mod metrics;

pub use metrics::{MetricsError, MetricsSource, SysinfoSource};
