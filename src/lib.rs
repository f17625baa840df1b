//! J.A.R.V.I.S. Stats Agent - 本机状态代理
//!
//! 对外只提供 `GET /api/stats`，返回 CPU、内存、温度、网络活跃度的即时快照

pub mod error;
pub mod infra;
pub mod domain;
pub mod config;
pub mod state;
pub mod api;
pub mod services;

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::{RuntimeConfig, ServerConfig};
pub use state::AppState;

/// 初始化日志，`RUST_LOG` 可覆盖默认级别
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));

    // 重复初始化（如测试中）直接忽略
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 按命令行覆盖项启动服务
pub async fn init_and_run_agent_with_config(runtime: RuntimeConfig) -> anyhow::Result<()> {
    init_tracing();
    run_server(ServerConfig::from_runtime(&runtime)).await
}

/// 绑定端口并提供服务，直到收到 Ctrl-C
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config.clone()));
    let app = api::router(state);

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;

    println!("🟢 J.A.R.V.I.S. system online at {}. Waiting for the interface...", config);
    info!("Stats agent listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Stats agent stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
