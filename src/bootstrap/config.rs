//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Parse TOML into AppConfig DTO / 将 TOML 解析为 AppConfig DTO
//! - ✅ Layer environment overrides and platform directories on top / 叠加环境变量与平台目录
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No business rules / 禁止业务规则**
//!
//! Resolution order: `--config` file, else the platform config file when it exists,
//! else built-in defaults; then `INTAKE_API_BASE_URL` / `INTAKE_DATA_DIR`; then the
//! platform data directory when `data_dir` is still empty.

use anyhow::Context;
use intake_core::config::AppConfig;
use std::path::PathBuf;

const APP_DIR_NAME: &str = "audit-intake";
const CONFIG_FILE_NAME: &str = "config.toml";

pub const ENV_API_BASE_URL: &str = "INTAKE_API_BASE_URL";
pub const ENV_DATA_DIR: &str = "INTAKE_DATA_DIR";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
/// 在以下情况下返回错误：
/// - 无法读取文件（I/O 错误）
/// - 内容不是有效的 TOML（解析错误）
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// `<config dir>/audit-intake/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// `<local data dir>/audit-intake`
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .context("Platform data directory is unavailable; set INTAKE_DATA_DIR")
}

/// Resolve the effective configuration for this launch.
/// 解析本次启动的最终配置。
pub fn resolve_config(explicit: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match explicit {
        Some(path) => load_config(path)?,
        None => match default_config_path().filter(|path| path.is_file()) {
            Some(path) => load_config(path)?,
            None => AppConfig::with_system_defaults(PathBuf::new()),
        },
    };

    let mut config = apply_env_overrides(config, |key| std::env::var(key).ok());
    if config.data_dir.as_os_str().is_empty() {
        config.data_dir = default_data_dir()?;
    }
    Ok(config)
}

fn apply_env_overrides(
    mut config: AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> AppConfig {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(base_url) = non_empty(ENV_API_BASE_URL) {
        config.api_base_url = base_url;
    }
    if let Some(data_dir) = non_empty(ENV_DATA_DIR) {
        config.data_dir = PathBuf::from(data_dir);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::config::{DEFAULT_API_BASE_URL, DEFAULT_SYNC_DEBOUNCE_MS};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Test that valid TOML is parsed correctly
    /// 测试有效 TOML 被正确解析
    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [api]
            base_url = "https://agency.example/api"
            request_timeout_secs = 15

            [storage]
            data_dir = "/path/to/data"

            [sync]
            storage_debounce_ms = 100
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.api_base_url, "https://agency.example/api");
        assert_eq!(config.request_timeout_secs, Some(15));
        assert_eq!(config.data_dir, PathBuf::from("/path/to/data"));
        assert_eq!(config.storage_debounce_ms, 100);
        assert_eq!(config.sync_debounce_ms, DEFAULT_SYNC_DEBOUNCE_MS);
    }

    /// Test that non-existent files return IO error
    /// 测试不存在的文件返回 IO 错误
    #[test]
    fn test_load_config_returns_io_error_on_file_not_found() {
        let err = load_config(PathBuf::from("/this/path/does/not/exist/config.toml")).unwrap_err();
        assert!(
            err.to_string().contains("Failed to read config file"),
            "Expected IO error message, got: {}",
            err
        );
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[api\nbase_url = ").unwrap();

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_env_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = [
            (ENV_API_BASE_URL, "https://staging.example/api"),
            (ENV_DATA_DIR, "/srv/intake"),
        ]
        .into_iter()
        .collect();

        let config = apply_env_overrides(
            AppConfig::with_system_defaults(PathBuf::from("/home/u/.local/share/audit-intake")),
            |key| env.get(key).map(|v| v.to_string()),
        );

        assert_eq!(config.api_base_url, "https://staging.example/api");
        assert_eq!(config.data_dir, PathBuf::from("/srv/intake"));
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let config = apply_env_overrides(
            AppConfig::with_system_defaults(PathBuf::from("/data")),
            |_| Some("  ".to_string()),
        );

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.data_dir, PathBuf::from("/data"));
    }

    #[test]
    fn test_resolve_config_with_explicit_file_keeps_its_data_dir() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndata_dir = \"/explicit/data\"\n")
            .unwrap();

        let config = resolve_config(Some(temp_file.path().to_path_buf())).unwrap();

        // INTAKE_DATA_DIR may be set in the developer's shell
        if std::env::var(ENV_DATA_DIR).map_or(true, |v| v.trim().is_empty()) {
            assert_eq!(config.data_dir, PathBuf::from("/explicit/data"));
        }
        assert!(!config.data_dir.as_os_str().is_empty());
    }
}
