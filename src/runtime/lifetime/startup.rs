use crate::cache::ObjectCache;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 准备服务器启动的上下文
/// 包括存储（含迁移）与会话缓存
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let cache = crate::cache::create_cache();
    debug!("Session cache ready");
    warn!("Cache backend initialized");

    StartupContext { storage, cache }
}
