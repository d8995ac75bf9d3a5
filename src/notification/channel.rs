//! 通知渲染 trait 定义
//!
//! 渲染端负责把 `NotificationContent` 变成真正的系统通知。
//! 平台差异（通知渠道、展开样式是否可用）都在渲染端处理。

use anyhow::Result;

use super::content::NotificationContent;
use super::payload::NotificationId;

/// 渲染结果
#[derive(Debug, Clone, PartialEq)]
pub enum RenderResult {
    /// 已展示
    Rendered,
    /// 跳过
    Skipped(String),
    /// 展示失败
    Failed(String),
}

/// 通知渲染端
pub trait NotificationRenderer: Send + Sync {
    /// 渲染端名称（用于日志）
    fn name(&self) -> &str;

    /// 展示或更新通知（同一 ID 覆盖旧通知）
    fn render(&self, content: &NotificationContent) -> Result<RenderResult>;

    /// 撤下通知
    fn cancel(&self, id: NotificationId) -> Result<()>;
}
