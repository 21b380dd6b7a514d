//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (file storage, HTTP client, clock) / 创建 infra 层具体实现
//! - ✅ Group them into `SessionDeps` / 将所有依赖打包为 `SessionDeps`
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! - Do not decide "what to do if no session exists"
//! - 不判断"如果没有会话就怎样"
//!
//! ❌ **No configuration validation / 禁止做配置验证**
//! - Config already resolved in config.rs
//! - 配置已在 config.rs 解析
//!
//! ## Architecture Principle / 架构原则
//!
//! > **This is the only place allowed to depend on intake-infra + intake-app simultaneously.**
//! > **这是唯一允许同时依赖 intake-infra 和 intake-app 的地方。**

use std::sync::Arc;
use std::time::Duration;

use intake_app::{AppPaths, SessionDeps};
use intake_core::config::AppConfig;
use intake_infra::{FileLocalStorage, HttpIntakeClient, SystemClock};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Local storage initialization failed: {0}")]
    StorageInit(String),

    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),
}

/// Wire all session dependencies from configuration
/// 根据配置装配所有会话依赖
///
/// # Errors / 错误
///
/// - `StorageInit` if the storage directory cannot be created / 存储目录无法创建
/// - `HttpClientInit` if the HTTP client cannot be built / HTTP 客户端无法构建
pub fn wire_dependencies(config: &AppConfig, paths: &AppPaths) -> WiringResult<SessionDeps> {
    std::fs::create_dir_all(&paths.storage_dir).map_err(|e| {
        WiringError::StorageInit(format!(
            "Failed to create {}: {}",
            paths.storage_dir.display(),
            e
        ))
    })?;

    let http = Arc::new(
        HttpIntakeClient::new(
            config.api_base_url.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
        .map_err(|e| WiringError::HttpClientInit(e.to_string()))?,
    );

    Ok(SessionDeps {
        local_storage: Arc::new(FileLocalStorage::new(paths.storage_dir.clone())),
        auth_api: http.clone(),
        intake_api: http,
        clock: Arc::new(SystemClock),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_wire_dependencies_creates_storage_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = AppConfig::with_system_defaults(temp_dir.path().to_path_buf());
        let paths = AppPaths::from_data_root(&config.data_dir);

        let deps = wire_dependencies(&config, &paths).unwrap();

        assert!(paths.storage_dir.is_dir());
        deps.local_storage.set_item("probe", "{}").await.unwrap();
        assert_eq!(
            deps.local_storage.get_item("probe").await.unwrap().as_deref(),
            Some("{}")
        );
    }

    #[test]
    fn test_wire_dependencies_reports_storage_failure() {
        let temp_file = tempfile::NamedTempFile::new().unwrap();
        // A regular file cannot hold the storage directory.
        let config = AppConfig::with_system_defaults(temp_file.path().to_path_buf());
        let paths = AppPaths::from_data_root(&config.data_dir);

        let result = wire_dependencies(&config, &paths);

        assert!(matches!(result, Err(WiringError::StorageInit(_))));
    }
}
