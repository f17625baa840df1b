//! 领域模型模块
//!
//! 纯数据结构，不依赖 axum/tokio

pub mod stats;

pub use stats::{NetIoCounters, SensorGroup, SensorReading, StatsSnapshot};
