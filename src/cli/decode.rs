// src/cli/decode.rs
//! Decode 命令 - 检查一条推送载荷能否被解码

use anyhow::Result;
use clap::Args;

use super::output::format_output;
use crate::notification::{decode, PushEvent};

/// Decode 命令参数
#[derive(Args)]
pub struct DecodeArgs {
    /// ejson 元数据（JSON 字符串）
    pub ejson: String,

    /// 通知 ID
    #[arg(long, default_value = "0")]
    pub not_id: String,

    /// 通知标题
    #[arg(long, default_value = "")]
    pub title: String,

    /// 消息正文
    #[arg(long, default_value = "")]
    pub message: String,

    /// 展示样式（inbox 或其他）
    #[arg(long, default_value = "")]
    pub style: String,

    /// 单行输出
    #[arg(long)]
    pub compact: bool,
}

/// 处理 decode 命令，返回解码结果的 JSON
pub fn handle_decode(args: DecodeArgs) -> Result<String> {
    let event = PushEvent {
        title: args.title,
        message: args.message,
        ejson: args.ejson,
        not_id: args.not_id,
        style: args.style,
        ..Default::default()
    };

    let message = decode(&event)?;
    Ok(format_output(&message, args.compact))
}
