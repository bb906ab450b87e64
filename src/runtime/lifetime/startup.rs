use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::storage::{MEMORY_STORAGE_URL, Storage, create_storage};
use crate::utils::{JwtVerifier, TokenVerifier};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub verifier: Arc<dyn TokenVerifier>,
}

/// 准备服务器启动的上下文
/// 包括认证、存储连接与迁移
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    // 已安装时返回 Err，可忽略
    let _ = rustls::crypto::ring::default_provider().install_default();

    // 先校验密钥，避免连接数据库后才发现配置缺失
    let verifier: Arc<dyn TokenVerifier> = Arc::new(JwtVerifier::new(&config.jwt)?);
    debug!("JWT verifier initialized (leeway: {}s)", config.jwt.leeway);

    if config.database.url == MEMORY_STORAGE_URL {
        warn!("Using in-memory storage, data will be lost on shutdown");
    }

    let storage = create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    Ok(StartupContext { storage, verifier })
}
