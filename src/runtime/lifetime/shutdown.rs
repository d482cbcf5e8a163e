use tokio::signal;
use tracing::warn;

/// 等待 Ctrl+C，后台导入任务随运行时一起结束
pub async fn listen_for_shutdown() {
    signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
    warn!("Shutdown signal received, stopping classroom server...");
}
