//! J.A.R.V.I.S. Stats Agent - 本机状态代理
//!
//! Usage:
//! - Normal mode: `jarvis-stats-agent` (listens on 0.0.0.0:5000)
//! - With custom port: `jarvis-stats-agent --port 5001`
//! - Local only: `jarvis-stats-agent --host 127.0.0.1`

use jarvis_stats_agent::RuntimeConfig;

/// 解析命令行参数
fn parse_args(args: &[String]) -> RuntimeConfig {
    let mut config = RuntimeConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" if i + 1 < args.len() => {
                config.port_override = args[i + 1].parse().ok();
                i += 2;
            }
            "--host" if i + 1 < args.len() => {
                config.host_override = Some(args[i + 1].clone());
                i += 2;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                i += 1;
            }
        }
    }

    config
}

fn print_help() {
    println!("J.A.R.V.I.S. Stats Agent - 本机状态代理");
    println!();
    println!("USAGE:");
    println!("    jarvis-stats-agent [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --port <PORT>    Override the listening port (default 5000)");
    println!("    --host <HOST>    Override the bind address (default 0.0.0.0)");
    println!("    -h, --help       Print help information");
    println!();
    println!("ENDPOINTS:");
    println!("    GET /api/stats   Current CPU/memory/temperature/network snapshot");
    println!("    GET /health      Liveness probe");
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let config = parse_args(&args);

    let rt = tokio::runtime::Runtime::new().expect("Failed to create runtime");
    let result = rt.block_on(jarvis_stats_agent::init_and_run_agent_with_config(config));

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_defaults() {
        assert_eq!(parse_args(&args(&["jarvis-stats-agent"])), RuntimeConfig::default());
    }

    #[test]
    fn test_parse_args_overrides() {
        let config = parse_args(&args(&[
            "jarvis-stats-agent",
            "--port",
            "5001",
            "--host",
            "127.0.0.1",
        ]));
        assert_eq!(config.port_override, Some(5001));
        assert_eq!(config.host_override.as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn test_parse_args_invalid_port_ignored() {
        let config = parse_args(&args(&["jarvis-stats-agent", "--port", "not-a-port"]));
        assert_eq!(config.port_override, None);
    }
}
