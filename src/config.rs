//! 配置 - `~/.config/chat-push-notify/config.json`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 默认日志过滤
pub const DEFAULT_LOG_FILTER: &str = "chat_push_notify=info,cpn=info";

/// 渲染输出方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// 每条通知输出一行 JSON 到 stdout
    #[default]
    Json,
    /// 只写日志
    Log,
}

/// 推送配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// 站点名称缓存文件（默认与配置文件同目录的 hosts.json）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_labels_path: Option<PathBuf>,
    /// 直接配置的站点名称，优先于缓存文件
    pub host_labels: HashMap<String, String>,
    /// tracing 过滤表达式，RUST_LOG 优先
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    pub renderer: RendererKind,
}

/// 配置目录
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("chat-push-notify")
}

impl PushConfig {
    /// 默认配置文件路径
    pub fn default_path() -> PathBuf {
        config_dir().join("config.json")
    }

    /// 读取默认位置的配置，文件不存在时使用默认值
    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_path())
    }

    /// 读取指定配置文件，文件不存在时使用默认值
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    /// 站点名称缓存文件路径
    pub fn host_labels_path(&self) -> PathBuf {
        self.host_labels_path
            .clone()
            .unwrap_or_else(crate::notification::HostLabelCache::default_path)
    }

    /// 日志过滤表达式
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = PushConfig::load(&dir.path().join("config.json")).unwrap();

        assert_eq!(config.renderer, RendererKind::Json);
        assert!(config.host_labels.is_empty());
        assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
        assert!(config.host_labels_path().ends_with("hosts.json"));
    }

    #[test]
    fn test_load_partial_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"renderer": "log", "host_labels": {"https://a.io": "Alpha"}, "log_filter": "debug"}"#,
        )
        .unwrap();

        let config = PushConfig::load(&path).unwrap();
        assert_eq!(config.renderer, RendererKind::Log);
        assert_eq!(config.host_labels["https://a.io"], "Alpha");
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ nope").unwrap();

        let err = PushConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("config.json"));
    }
}
