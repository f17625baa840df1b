//! 系统指标数据源
//!
//! `MetricsSource` 抽象操作系统指标查询，生产环境使用 `SysinfoSource`，
//! 测试中可注入固定读数的实现。

use async_trait::async_trait;
use std::time::Duration;
use sysinfo::{
    Components, CpuRefreshKind, MemoryRefreshKind, Networks, RefreshKind, System,
    MINIMUM_CPU_UPDATE_INTERVAL,
};
use thiserror::Error;

use crate::domain::stats::{NetIoCounters, SensorGroup, SensorReading};

/// 指标采集错误
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("{0} metrics are not supported on this host")]
    Unsupported(&'static str),

    #[error("failed to read {metric} metrics: {reason}")]
    Unavailable { metric: &'static str, reason: String },
}

impl MetricsError {
    pub fn unavailable(metric: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            metric,
            reason: reason.into(),
        }
    }
}

/// 系统指标数据源
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// 在 `interval` 窗口内采样 CPU 使用率 (0-100)
    async fn cpu_percent(&self, interval: Duration) -> Result<f64, MetricsError>;

    /// 内存使用率 (0-100)
    fn memory_percent(&self) -> Result<f64, MetricsError>;

    /// 温度传感器分组，顺序即操作系统返回顺序
    async fn temperature_groups(&self) -> Result<Vec<SensorGroup>, MetricsError>;

    /// 累计网络收发字节
    async fn net_io_counters(&self) -> Result<NetIoCounters, MetricsError>;
}

/// 基于 sysinfo 的数据源
///
/// 每次调用都新建 sysinfo 句柄，不保留跨请求状态。
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoSource;

impl SysinfoSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetricsSource for SysinfoSource {
    async fn cpu_percent(&self, interval: Duration) -> Result<f64, MetricsError> {
        let mut sys = System::new_with_specifics(
            RefreshKind::new().with_cpu(CpuRefreshKind::new().with_cpu_usage()),
        );

        // 两次刷新之间的差值才是使用率
        sys.refresh_cpu_all();
        tokio::time::sleep(interval.max(MINIMUM_CPU_UPDATE_INTERVAL)).await;
        sys.refresh_cpu_all();

        let cpus = sys.cpus();
        if cpus.is_empty() {
            return Err(MetricsError::Unsupported("cpu"));
        }

        let avg = cpus.iter().map(|c| c.cpu_usage() as f64).sum::<f64>() / cpus.len() as f64;
        Ok(clamp_percent(avg))
    }

    fn memory_percent(&self) -> Result<f64, MetricsError> {
        let mut sys = System::new_with_specifics(
            RefreshKind::new().with_memory(MemoryRefreshKind::new().with_ram()),
        );
        sys.refresh_memory();

        let total = sys.total_memory();
        if total == 0 {
            return Err(MetricsError::Unsupported("memory"));
        }

        Ok(clamp_percent(sys.used_memory() as f64 / total as f64 * 100.0))
    }

    // sysfs 读取是阻塞 IO，放到 blocking 线程池
    async fn temperature_groups(&self) -> Result<Vec<SensorGroup>, MetricsError> {
        tokio::task::spawn_blocking(|| {
            let components = Components::new_with_refreshed_list();
            let readings = components
                .list()
                .iter()
                .map(|c| (c.label().to_string(), celsius_from_sensor(c.temperature())));

            group_by_chip(readings)
        })
        .await
        .map_err(|e| MetricsError::unavailable("temperature", e.to_string()))
    }

    async fn net_io_counters(&self) -> Result<NetIoCounters, MetricsError> {
        tokio::task::spawn_blocking(|| {
            let networks = Networks::new_with_refreshed_list();

            networks
                .list()
                .values()
                .fold(NetIoCounters::default(), |acc, data| NetIoCounters {
                    bytes_sent: acc.bytes_sent.saturating_add(data.total_transmitted()),
                    bytes_recv: acc.bytes_recv.saturating_add(data.total_received()),
                })
        })
        .await
        .map_err(|e| MetricsError::unavailable("network", e.to_string()))
    }
}

/// sysinfo 以 `f32` 给出 `毫度 / 1000`，直接转 f64 会带出 `55.29999923706055`，
/// 这里按毫度精度还原为 `55.3`。非有限值原样保留，由分组时丢弃。
fn celsius_from_sensor(raw: f32) -> f64 {
    let value = f64::from(raw);
    if !value.is_finite() {
        return value;
    }
    (value * 1000.0).round() / 1000.0
}

/// 将百分比限制在 [0, 100]，NaN 视为 0
fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// 按标签首个单词（芯片名）分组，保持首次出现的顺序
///
/// sysinfo 的标签形如 `coretemp Package id 0`、`acpitz temp1`。
/// 非有限值（读取失败的传感器）被丢弃，丢弃后为空的分组不保留。
fn group_by_chip(readings: impl IntoIterator<Item = (String, f64)>) -> Vec<SensorGroup> {
    let mut groups: Vec<SensorGroup> = Vec::new();

    for (label, current) in readings {
        if !current.is_finite() {
            continue;
        }

        let chip = label.split_whitespace().next().unwrap_or_default().to_string();
        let reading = SensorReading { label, current };

        match groups.iter_mut().find(|g| g.name == chip) {
            Some(group) => group.readings.push(reading),
            None => groups.push(SensorGroup {
                name: chip,
                readings: vec![reading],
            }),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_chip_keeps_os_order() {
        let groups = group_by_chip(vec![
            ("nvme Composite".to_string(), 38.9),
            ("coretemp Package id 0".to_string(), 55.0),
            ("nvme Sensor 1".to_string(), 37.0),
            ("coretemp Core 0".to_string(), 52.0),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "nvme");
        assert_eq!(groups[0].readings.len(), 2);
        assert_eq!(groups[0].readings[0].current, 38.9);
        assert_eq!(groups[1].name, "coretemp");
        assert_eq!(groups[1].readings[1].label, "coretemp Core 0");
    }

    #[test]
    fn test_group_by_chip_drops_unreadable_sensors() {
        let groups = group_by_chip(vec![
            ("acpitz temp1".to_string(), f64::NAN),
            ("k10temp Tctl".to_string(), 61.25),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "k10temp");
    }

    #[test]
    fn test_group_by_chip_empty() {
        assert!(group_by_chip(Vec::new()).is_empty());
    }

    #[test]
    fn test_celsius_from_sensor_keeps_millidegree_reading() {
        let raw: f32 = 55_300_f32 / 1000.0;
        assert_ne!(raw as f64, 55.3);
        assert_eq!(celsius_from_sensor(raw), 55.3);
        assert_eq!(celsius_from_sensor(61_250_f32 / 1000.0), 61.25);
        assert_eq!(celsius_from_sensor(-5_125_f32 / 1000.0), -5.125);
        assert!(celsius_from_sensor(f32::NAN).is_nan());
    }

    #[test]
    fn test_celsius_from_sensor_serializes_cleanly() {
        let snapshot_temp = celsius_from_sensor(55_300_f32 / 1000.0);
        let json = serde_json::json!({ "temp": snapshot_temp }).to_string();
        assert_eq!(json, r#"{"temp":55.3}"#);
    }

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(-1.0), 0.0);
        assert_eq!(clamp_percent(100.4), 100.0);
        assert_eq!(clamp_percent(f64::NAN), 0.0);
        assert_eq!(clamp_percent(42.5), 42.5);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            MetricsError::Unsupported("cpu").to_string(),
            "cpu metrics are not supported on this host"
        );
        assert_eq!(
            MetricsError::unavailable("network", "permission denied").to_string(),
            "failed to read network metrics: permission denied"
        );
    }

    #[tokio::test]
    async fn test_sysinfo_source_percentages_in_range() {
        let source = SysinfoSource::new();

        if let Ok(cpu) = source.cpu_percent(Duration::ZERO).await {
            assert!((0.0..=100.0).contains(&cpu));
        }
        if let Ok(memory) = source.memory_percent() {
            assert!((0.0..=100.0).contains(&memory));
        }
        assert!(source.temperature_groups().await.is_ok());
        assert!(source.net_io_counters().await.is_ok());
    }
}
