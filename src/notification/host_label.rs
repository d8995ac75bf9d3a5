//! 站点名称查询 - 通知副标题显示服务器名称
//!
//! 两种实现：
//! - `StaticHostLabels`：内存表，来自配置文件
//! - `HostLabelCache`：本地 JSON 文件（`{"https://chat.example.com": "Example"}`），
//!   读写都带文件锁，可被其他进程更新

use anyhow::{Context, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 站点名称查询
pub trait HostLabelLookup: Send + Sync {
    /// 返回站点名称，未知时返回空字符串
    fn host_label(&self, host: &str) -> String;
}

/// 内存中的站点名称表
#[derive(Debug, Clone, Default)]
pub struct StaticHostLabels {
    labels: HashMap<String, String>,
}

impl StaticHostLabels {
    pub fn new(labels: HashMap<String, String>) -> Self {
        Self { labels }
    }

    pub fn with_label(mut self, host: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(host.into(), label.into());
        self
    }
}

impl HostLabelLookup for StaticHostLabels {
    fn host_label(&self, host: &str) -> String {
        self.labels.get(host).cloned().unwrap_or_default()
    }
}

/// 基于本地文件的站点名称缓存
#[derive(Debug, Clone)]
pub struct HostLabelCache {
    path: PathBuf,
    /// 优先于文件内容
    overrides: StaticHostLabels,
}

impl HostLabelCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            overrides: StaticHostLabels::default(),
        }
    }

    /// 设置优先使用的站点名称
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.overrides = StaticHostLabels::new(overrides);
        self
    }

    /// 默认文件路径
    pub fn default_path() -> PathBuf {
        crate::config::config_dir().join("hosts.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取全部站点名称（共享锁）
    pub fn load(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let mut file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        file.lock_shared()?;
        let mut content = String::new();
        let read = file.read_to_string(&mut content);
        file.unlock()?;
        read?;

        parse_labels(&content)
            .with_context(|| format!("Invalid host label file {}", self.path.display()))
    }

    /// 写入一个站点名称（独占锁）
    pub fn set_label(&self, host: &str, label: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        file.lock_exclusive()?;
        let result = Self::rewrite(&mut file, host, label);
        file.unlock()?;
        result
    }

    fn rewrite(file: &mut File, host: &str, label: &str) -> Result<()> {
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        let mut labels = parse_labels(&content)?;
        labels.insert(host.to_string(), label.to_string());

        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(serde_json::to_string_pretty(&labels)?.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }
}

impl HostLabelLookup for HostLabelCache {
    fn host_label(&self, host: &str) -> String {
        let label = self.overrides.host_label(host);
        if !label.is_empty() {
            return label;
        }

        match self.load() {
            Ok(labels) => labels.get(host).cloned().unwrap_or_default(),
            Err(e) => {
                debug!(host = %host, error = %e, "Host label lookup failed");
                String::new()
            }
        }
    }
}

fn parse_labels(content: &str) -> Result<HashMap<String, String>> {
    if content.trim().is_empty() {
        return Ok(HashMap::new());
    }
    Ok(serde_json::from_str(content)?)
}
