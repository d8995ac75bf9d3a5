//! 推送管理 - 解码、入栈、构建、渲染，以及处理通知被划掉
//!
//! 流程：
//! ```text
//! PushEvent → decode → MessageStack::append → ContentBuilder::build → renderer
//! dismiss(notId) → MessageStack::clear
//! ```

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::channel::{NotificationRenderer, RenderResult};
use super::content::{ContentBuilder, NotificationContent};
use super::decoder::decode;
use super::host_label::HostLabelLookup;
use super::payload::{NotificationId, PushEvent};
use super::store::MessageStack;

/// 推送管理器
pub struct PushManager {
    stack: Arc<MessageStack>,
    labels: Arc<dyn HostLabelLookup>,
    renderer: Arc<dyn NotificationRenderer>,
}

impl PushManager {
    pub fn new(
        stack: Arc<MessageStack>,
        labels: Arc<dyn HostLabelLookup>,
        renderer: Arc<dyn NotificationRenderer>,
    ) -> Self {
        Self {
            stack,
            labels,
            renderer,
        }
    }

    /// 处理一条推送
    ///
    /// 载荷格式错误时记录警告并丢弃，返回 `None`。
    /// 渲染失败不影响堆栈，内容照常返回。
    pub fn handle(&self, event: &PushEvent) -> Option<NotificationContent> {
        let message = match decode(event) {
            Ok(message) => message,
            Err(e) => {
                warn!(
                    not_id = %event.not_id,
                    field = e.field(),
                    error = %e,
                    "Dropping push event with malformed payload"
                );
                return None;
            }
        };

        debug!(
            notification_id = message.notification_id,
            room_id = %message.room_id,
            sender = %message.sender.username,
            style = %message.style,
            "Decoded push message"
        );

        let entry = self
            .stack
            .append_and_snapshot(message.notification_id, message.body.clone());
        let sub_text = self.labels.host_label(&message.host);
        let content =
            ContentBuilder::build(&message, Some(entry.as_slice()), Some(sub_text.as_str()));

        match self.renderer.render(&content) {
            Ok(RenderResult::Rendered) => {
                debug!(
                    notification_id = content.notification_id,
                    renderer = self.renderer.name(),
                    inbox = content.is_inbox(),
                    stacked = entry.len(),
                    "Notification rendered"
                );
            }
            Ok(RenderResult::Skipped(reason)) => {
                info!(
                    notification_id = content.notification_id,
                    renderer = self.renderer.name(),
                    reason = %reason,
                    "Notification skipped"
                );
            }
            Ok(RenderResult::Failed(reason)) => {
                warn!(
                    notification_id = content.notification_id,
                    renderer = self.renderer.name(),
                    error = %reason,
                    "Notification render failed"
                );
            }
            Err(e) => {
                warn!(
                    notification_id = content.notification_id,
                    renderer = self.renderer.name(),
                    error = %e,
                    "Notification render failed"
                );
            }
        }

        Some(content)
    }

    /// 通知被用户划掉或被系统回收
    pub fn on_dismiss(&self, id: NotificationId) {
        self.stack.clear(id);
        debug!(notification_id = id, "Notification dismissed, message stack cleared");
    }

    /// 主动撤下通知（例如用户已经打开了对应房间）
    pub fn cancel(&self, id: NotificationId) {
        self.stack.clear(id);
        if let Err(e) = self.renderer.cancel(id) {
            warn!(
                notification_id = id,
                renderer = self.renderer.name(),
                error = %e,
                "Notification cancel failed"
            );
        }
    }

    pub fn stack(&self) -> &Arc<MessageStack> {
        &self.stack
    }
}
