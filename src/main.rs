//! Chat Push Notify CLI
//!
//! 回放推送事件、检查载荷、维护站点名称

use anyhow::Result;
use chat_push_notify::cli::{
    format_output, handle_decode, handle_label, handle_replay, DecodeArgs, LabelCommand,
    ReplayArgs,
};
use chat_push_notify::PushConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "cpn")]
#[command(about = "Chat Push Notify - 把同一会话的推送消息堆叠成可折叠通知")]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认 ~/.config/chat-push-notify/config.json）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 回放 JSON Lines 推送 / 划掉事件，输出通知内容
    Replay(ReplayArgs),
    /// 解码一条 ejson 载荷
    Decode(DecodeArgs),
    /// 维护站点名称缓存
    Label {
        #[command(subcommand)]
        command: LabelCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PushConfig::load(path),
        None => PushConfig::load_default(),
    };

    // 初始化 tracing 日志系统
    // RUST_LOG 优先，其次配置文件的 log_filter
    // 例如: RUST_LOG=debug cpn replay events.jsonl
    let default_filter = config
        .as_ref()
        .map(|c| c.log_filter().to_string())
        .unwrap_or_else(|_| chat_push_notify::config::DEFAULT_LOG_FILTER.to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let config = config?;

    match cli.command {
        Commands::Replay(args) => {
            let summary = handle_replay(args, &config).await?;
            debug!(?summary, "Replay summary");
            eprintln!("{}", format_output(&summary, true));
        }
        Commands::Decode(args) => {
            println!("{}", handle_decode(args)?);
        }
        Commands::Label { command } => {
            let output = handle_label(command, &config)?;
            if !output.is_empty() {
                println!("{}", output);
            }
        }
    }

    Ok(())
}
