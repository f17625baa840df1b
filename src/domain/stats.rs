//! 状态快照领域模型

use serde::Serialize;

/// 单次请求的本机状态快照
///
/// 每个请求新建，序列化后即丢弃，不做任何存储或历史对比。
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatsSnapshot {
    /// CPU 使用率 (0-100)，1 秒采样窗口
    pub cpu: f64,
    /// 内存使用率 (0-100)
    pub memory: f64,
    /// 第一个温度传感器读数 (°C)，无传感器时为回退值
    pub temp: f64,
    /// 网络活跃度指标 (0-100)，由字节计数派生，并非真实带宽
    pub network: u8,
    /// 固定占位值，供前端展示
    pub logic: u8,
}

/// 温度传感器分组（通常对应一个芯片）
#[derive(Clone, Debug, PartialEq)]
pub struct SensorGroup {
    pub name: String,
    pub readings: Vec<SensorReading>,
}

/// 单个温度传感器读数
#[derive(Clone, Debug, PartialEq)]
pub struct SensorReading {
    pub label: String,
    /// 当前温度 (°C)
    pub current: f64,
}

impl SensorGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            readings: Vec::new(),
        }
    }

    pub fn with_reading(mut self, label: impl Into<String>, current: f64) -> Self {
        self.readings.push(SensorReading {
            label: label.into(),
            current,
        });
        self
    }
}

/// 累计网络字节计数（所有网卡之和）
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetIoCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

impl NetIoCounters {
    pub fn new(bytes_sent: u64, bytes_recv: u64) -> Self {
        Self {
            bytes_sent,
            bytes_recv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_field_names() {
        let snapshot = StatsSnapshot {
            cpu: 12.5,
            memory: 47.2,
            temp: 40.0,
            network: 40,
            logic: 98,
        };

        let value = serde_json::to_value(&snapshot).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["cpu", "logic", "memory", "network", "temp"]);
        assert!(value["network"].is_u64());
        assert!(value["temp"].is_f64());
    }

    #[test]
    fn test_sensor_group_builder() {
        let group = SensorGroup::new("coretemp")
            .with_reading("Package id 0", 55.3)
            .with_reading("Core 0", 52.0);
        assert_eq!(group.readings.len(), 2);
        assert_eq!(group.readings[0].current, 55.3);
    }
}
