//! 服务配置
//!
//! 不读取配置文件或环境变量，只接受命令行覆盖

use std::fmt;

use self::constants::{DEFAULT_HOST, DEFAULT_PORT};

/// 命令行覆盖项
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// 覆盖监听地址
    pub host_override: Option<String>,
    /// 覆盖监听端口
    pub port_override: Option<u16>,
}

/// 服务监听配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// 默认配置叠加命令行覆盖
    pub fn from_runtime(runtime: &RuntimeConfig) -> Self {
        let defaults = Self::default();
        Self {
            host: runtime.host_override.clone().unwrap_or(defaults.host),
            port: runtime.port_override.unwrap_or(defaults.port),
        }
    }

    /// 监听地址，形如 `0.0.0.0:5000`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "http://{}", self.bind_addr())
    }
}

/// 常量
pub mod constants {
    use std::time::Duration;

    /// 默认监听所有网卡
    pub const DEFAULT_HOST: &str = "0.0.0.0";

    /// 默认端口（前端固定请求 5000）
    pub const DEFAULT_PORT: u16 = 5000;

    /// CPU 采样窗口
    pub const CPU_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

    /// 无温度传感器时的回退值 (°C)
    pub const FALLBACK_TEMPERATURE_C: f64 = 40.0;

    /// `logic` 字段固定值
    pub const LOGIC_PLACEHOLDER: u8 = 98;

    /// 服务名
    pub const SERVICE_NAME: &str = "jarvis-stats-agent";

    /// 版本号
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
