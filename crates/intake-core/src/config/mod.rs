//! # Pure Data Module / 纯数据模块
//!
//! Configuration DTO and its TOML mapping. Missing keys fall back to the
//! documented defaults; no other policy lives here.
//!
//! 配置 DTO 及其 TOML 映射，缺失字段使用默认值。

use std::path::PathBuf;

/// Default backend base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
/// Quiet period before the snapshot is written to local storage.
pub const DEFAULT_STORAGE_DEBOUNCE_MS: u64 = 350;
/// Quiet period before a sync cycle runs.
pub const DEFAULT_SYNC_DEBOUNCE_MS: u64 = 600;

/// Application configuration DTO
/// 应用配置 DTO
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend base URL; adapters append endpoint paths to it.
    pub api_base_url: String,

    /// Optional per-request timeout. `None` means no client-side timeout.
    /// 可选的请求超时，`None` 表示不设置。
    pub request_timeout_secs: Option<u64>,

    /// Local storage directory (path info only, no existence check).
    /// 本地存储目录（仅路径信息，不检查是否存在）。
    pub data_dir: PathBuf,

    pub storage_debounce_ms: u64,

    pub sync_debounce_ms: u64,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// An empty `data_dir` is a valid fact; the caller substitutes the platform
    /// default.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let section = |name: &str, key: &str| toml_value.get(name).and_then(|s| s.get(key));
        let millis = |key: &str, default: u64| {
            section("sync", key)
                .and_then(|v| v.as_integer())
                .and_then(|v| u64::try_from(v).ok())
                .unwrap_or(default)
        };

        Ok(Self {
            api_base_url: section("api", "base_url")
                .and_then(|v| v.as_str())
                .unwrap_or(DEFAULT_API_BASE_URL)
                .to_string(),
            request_timeout_secs: section("api", "request_timeout_secs")
                .and_then(|v| v.as_integer())
                .and_then(|v| u64::try_from(v).ok())
                .filter(|secs| *secs > 0),
            data_dir: PathBuf::from(
                section("storage", "data_dir")
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            storage_debounce_ms: millis("storage_debounce_ms", DEFAULT_STORAGE_DEBOUNCE_MS),
            sync_debounce_ms: millis("sync_debounce_ms", DEFAULT_SYNC_DEBOUNCE_MS),
        })
    }

    /// Defaults rooted at `data_dir`
    /// 以 `data_dir` 为根的默认配置
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: None,
            data_dir,
            storage_debounce_ms: DEFAULT_STORAGE_DEBOUNCE_MS,
            sync_debounce_ms: DEFAULT_SYNC_DEBOUNCE_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_uses_defaults_when_missing() {
        let toml_value: Value = toml::from_str("").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout_secs, None);
        assert_eq!(config.data_dir, PathBuf::new());
        assert_eq!(config.storage_debounce_ms, 350);
        assert_eq!(config.sync_debounce_ms, 600);
    }

    #[test]
    fn test_from_toml_reads_every_section() {
        let toml_str = r#"
            [api]
            base_url = "https://agency.example/api"
            request_timeout_secs = 15

            [storage]
            data_dir = "/var/lib/intake"

            [sync]
            storage_debounce_ms = 100
            sync_debounce_ms = 1000
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.api_base_url, "https://agency.example/api");
        assert_eq!(config.request_timeout_secs, Some(15));
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/intake"));
        assert_eq!(config.storage_debounce_ms, 100);
        assert_eq!(config.sync_debounce_ms, 1000);
    }

    #[test]
    fn test_from_toml_ignores_negative_and_zero_values() {
        let toml_str = r#"
            [api]
            request_timeout_secs = 0

            [sync]
            sync_debounce_ms = -5
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.request_timeout_secs, None);
        assert_eq!(config.sync_debounce_ms, DEFAULT_SYNC_DEBOUNCE_MS);
    }

    #[test]
    fn test_with_system_defaults_keeps_data_dir() {
        let config = AppConfig::with_system_defaults(PathBuf::from("/tmp/intake"));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/intake"));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }
}
