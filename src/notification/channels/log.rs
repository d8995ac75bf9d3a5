//! 日志渲染端 - 把通知内容写入 tracing 日志

use anyhow::Result;
use tracing::info;

use crate::notification::channel::{NotificationRenderer, RenderResult};
use crate::notification::content::{ContentStyle, NotificationContent};
use crate::notification::payload::NotificationId;

/// 日志渲染端
pub struct LogRenderer;

impl LogRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationRenderer for LogRenderer {
    fn name(&self) -> &str {
        "log"
    }

    fn render(&self, content: &NotificationContent) -> Result<RenderResult> {
        let style = match &content.style {
            ContentStyle::Inbox { .. } => "inbox",
            ContentStyle::BigText { .. } => "big_text",
            ContentStyle::Plain => "plain",
        };
        let lines = content.expanded_lines().len();

        info!(
            notification_id = content.notification_id,
            title = %content.title,
            style,
            lines,
            badge = content.badge_count,
            sub_text = content.sub_text.as_deref().unwrap_or(""),
            "Notification rendered"
        );
        Ok(RenderResult::Rendered)
    }

    fn cancel(&self, id: NotificationId) -> Result<()> {
        info!(notification_id = id, "Notification cancelled");
        Ok(())
    }
}
