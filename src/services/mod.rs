//! 业务服务模块

pub mod stats;

pub use stats::StatsCollector;
