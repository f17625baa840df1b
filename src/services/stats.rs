//! 状态快照采集
//!
//! 将数据源的原始读数整理为 `StatsSnapshot`：
//! - 温度：第一组的第一个传感器，无则回退 40.0
//! - 网络：`(发送 + 接收) mod 100` 的派生指标，并非真实吞吐

use std::time::Duration;
use tracing::debug;

use crate::config::server::constants::{
    CPU_SAMPLE_INTERVAL, FALLBACK_TEMPERATURE_C, LOGIC_PLACEHOLDER,
};
use crate::domain::stats::{NetIoCounters, SensorGroup, StatsSnapshot};
use crate::infra::metrics::{MetricsError, MetricsSource};

/// 快照采集器
#[derive(Debug, Clone, Copy)]
pub struct StatsCollector {
    cpu_interval: Duration,
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new(CPU_SAMPLE_INTERVAL)
    }
}

impl StatsCollector {
    pub fn new(cpu_interval: Duration) -> Self {
        Self { cpu_interval }
    }

    /// 采集一次完整快照
    ///
    /// CPU 采样会等待 `cpu_interval`。只有温度读取失败会被吞掉，
    /// 其余指标失败直接返回错误。
    pub async fn collect(&self, source: &dyn MetricsSource) -> Result<StatsSnapshot, MetricsError> {
        let cpu = source.cpu_percent(self.cpu_interval).await?;
        let memory = source.memory_percent()?;

        let temp = read_temperature(source).await.unwrap_or_else(|| {
            debug!(
                "No temperature sensor available, falling back to {}",
                FALLBACK_TEMPERATURE_C
            );
            FALLBACK_TEMPERATURE_C
        });

        let network = network_activity(source.net_io_counters().await?);

        let snapshot = StatsSnapshot {
            cpu,
            memory,
            temp,
            network,
            logic: LOGIC_PLACEHOLDER,
        };
        debug!(?snapshot, "Stats snapshot collected");

        Ok(snapshot)
    }
}

/// 读取温度，任何失败都归为 `None`
async fn read_temperature(source: &dyn MetricsSource) -> Option<f64> {
    match source.temperature_groups().await {
        Ok(groups) => first_temperature(&groups),
        Err(e) => {
            debug!("Temperature sensors unavailable: {}", e);
            None
        }
    }
}

/// 第一组的第一个传感器读数
///
/// "第一" 取决于操作系统返回的顺序，不做排序，也不代表一定是 CPU 温度。
pub fn first_temperature(groups: &[SensorGroup]) -> Option<f64> {
    groups
        .first()
        .and_then(|group| group.readings.first())
        .map(|reading| reading.current)
}

/// 网络活跃度：`min((sent + recv) mod 100, 100)`
///
/// 这是由累计字节数派生的伪指标，不是瞬时带宽。取模后不超过 99，
/// 上限 100 是冗余约束。
pub fn network_activity(counters: NetIoCounters) -> u8 {
    let total = counters.bytes_sent as u128 + counters.bytes_recv as u128;
    (total % 100).min(100) as u8
}
