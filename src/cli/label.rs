// src/cli/label.rs
//! Label 命令 - 维护站点名称缓存

use anyhow::Result;
use clap::Subcommand;

use crate::config::PushConfig;
use crate::notification::{HostLabelCache, HostLabelLookup};

/// Label 子命令
#[derive(Subcommand)]
pub enum LabelCommand {
    /// 设置站点名称
    Set {
        /// 服务器地址，例如 https://chat.example.com
        host: String,
        /// 显示名称
        label: String,
    },
    /// 查询站点名称
    Get {
        /// 服务器地址
        host: String,
    },
    /// 列出所有站点名称
    List,
}

/// 处理 label 命令，返回要打印的文本
pub fn handle_label(command: LabelCommand, config: &PushConfig) -> Result<String> {
    let cache = HostLabelCache::new(config.host_labels_path())
        .with_overrides(config.host_labels.clone());

    match command {
        LabelCommand::Set { host, label } => {
            cache.set_label(&host, &label)?;
            Ok(format!("{} -> {}", host, label))
        }
        LabelCommand::Get { host } => Ok(cache.host_label(&host)),
        LabelCommand::List => {
            let mut labels = cache.load()?;
            labels.extend(config.host_labels.clone());
            let mut labels: Vec<_> = labels.into_iter().collect();
            labels.sort();
            Ok(labels
                .into_iter()
                .map(|(host, label)| format!("{}\t{}", host, label))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}
