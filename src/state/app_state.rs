//! 应用状态

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::server::ServerConfig;
use crate::infra::metrics::{MetricsSource, SysinfoSource};
use crate::services::stats::StatsCollector;

/// 应用状态
///
/// 只保存不可变数据，请求之间不共享可变状态。
pub struct AppState {
    /// 监听配置
    pub config: ServerConfig,
    /// 指标数据源
    pub source: Arc<dyn MetricsSource>,
    /// 快照采集器
    pub collector: StatsCollector,
    /// 服务启动时间
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// 使用 sysinfo 数据源创建状态
    pub fn new(config: ServerConfig) -> Self {
        Self::with_source(config, Arc::new(SysinfoSource::new()), StatsCollector::default())
    }

    /// 指定数据源与采集器（测试中注入固定读数）
    pub fn with_source(
        config: ServerConfig,
        source: Arc<dyn MetricsSource>,
        collector: StatsCollector,
    ) -> Self {
        Self {
            config,
            source,
            collector,
            started_at: Utc::now(),
        }
    }

    /// 运行时长（秒）
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds().max(0)
    }
}
