// src/cli/replay.rs
//! Replay 命令 - 按顺序回放推送 / 划掉事件
//!
//! 输入为 JSON Lines，每行一个事件：
//! ```text
//! {"kind":"push","title":"Bob","message":"Hi","ejson":"{...}","notId":"42","style":"inbox","summaryText":"%n% new messages","count":"1"}
//! {"kind":"dismiss","notId":"42"}
//! {"kind":"cancel","notId":"42"}
//! ```
//! 空行和 `#` 开头的行会被忽略。

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::config::{PushConfig, RendererKind};
use crate::notification::payload::string_or_number;
use crate::notification::{
    HostLabelCache, JsonLinesRenderer, LogRenderer, MessageStack, NotificationId,
    NotificationRenderer, PushEvent, PushManager,
};

/// Replay 命令参数
#[derive(Args)]
pub struct ReplayArgs {
    /// 事件文件（JSON Lines），省略时读取 stdin
    pub file: Option<PathBuf>,

    /// 渲染方式，默认取配置文件
    #[arg(long, value_enum)]
    pub renderer: Option<RendererKind>,
}

/// 回放输入的一行
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplayLine {
    Push(PushEvent),
    Dismiss {
        #[serde(rename = "notId", deserialize_with = "string_or_number")]
        not_id: String,
    },
    Cancel {
        #[serde(rename = "notId", deserialize_with = "string_or_number")]
        not_id: String,
    },
}

/// 回放统计
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    /// 成功生成通知的推送
    pub rendered: usize,
    /// 载荷格式错误被丢弃的推送
    pub dropped: usize,
    pub dismissed: usize,
    pub cancelled: usize,
    /// 无法解析的行
    pub invalid_lines: usize,
}

/// 处理 replay 命令
pub async fn handle_replay(args: ReplayArgs, config: &PushConfig) -> Result<ReplaySummary> {
    let renderer: Arc<dyn NotificationRenderer> = match args.renderer.unwrap_or(config.renderer) {
        RendererKind::Json => Arc::new(JsonLinesRenderer::stdout()),
        RendererKind::Log => Arc::new(LogRenderer::new()),
    };
    let labels = HostLabelCache::new(config.host_labels_path())
        .with_overrides(config.host_labels.clone());
    let manager = PushManager::new(Arc::new(MessageStack::new()), Arc::new(labels), renderer);

    match &args.file {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            replay_lines(&manager, BufReader::new(file)).await
        }
        None => replay_lines(&manager, BufReader::new(tokio::io::stdin())).await,
    }
}

/// 逐行回放事件
pub async fn replay_lines<R>(manager: &PushManager, reader: R) -> Result<ReplaySummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut summary = ReplaySummary::default();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match serde_json::from_str::<ReplayLine>(line) {
            Ok(event) => apply(manager, event, line_no, &mut summary),
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping unparseable replay line");
                summary.invalid_lines += 1;
            }
        }
    }

    info!(
        rendered = summary.rendered,
        dropped = summary.dropped,
        dismissed = summary.dismissed,
        cancelled = summary.cancelled,
        invalid_lines = summary.invalid_lines,
        "Replay finished"
    );
    Ok(summary)
}

fn apply(manager: &PushManager, event: ReplayLine, line_no: usize, summary: &mut ReplaySummary) {
    match event {
        ReplayLine::Push(push) => {
            if manager.handle(&push).is_some() {
                summary.rendered += 1;
            } else {
                summary.dropped += 1;
            }
        }
        ReplayLine::Dismiss { not_id } => match parse_id(&not_id, line_no) {
            Some(id) => {
                manager.on_dismiss(id);
                summary.dismissed += 1;
            }
            None => summary.invalid_lines += 1,
        },
        ReplayLine::Cancel { not_id } => match parse_id(&not_id, line_no) {
            Some(id) => {
                manager.cancel(id);
                summary.cancelled += 1;
            }
            None => summary.invalid_lines += 1,
        },
    }
}

fn parse_id(raw: &str, line_no: usize) -> Option<NotificationId> {
    match raw.trim().parse() {
        Ok(id) => Some(id),
        Err(e) => {
            warn!(line = line_no, not_id = %raw, error = %e, "Invalid notification id");
            None
        }
    }
}
