//! 通知内容构建 - 决定展开成收件箱列表还是只显示单条消息
//!
//! 规则：
//! 1. inbox 样式且堆栈里超过一条消息 → 收件箱列表（摘要里替换 `%n%`）
//! 2. inbox 样式但只有一条（或没有堆栈） → 大文本，显示当前消息
//! 3. 其他样式 → 单行文本，不读取堆栈
//!
//! 产出的 `NotificationContent` 不区分平台版本，由渲染端自行决定如何呈现。

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::decoder::DecodedMessage;
use super::markup::from_html;
use super::payload::{NotificationId, PresentationStyle, COUNT_PLACEHOLDER};

/// 通知展示描述
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationContent {
    pub notification_id: NotificationId,
    /// 折叠状态下的标题
    pub title: String,
    /// 折叠状态下的正文（当前这条消息）
    pub text: String,
    pub style: ContentStyle,
    /// 角标数字
    pub badge_count: u32,
    /// 站点名称
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub channel: ChannelHint,
    /// 点击通知时打开的目标
    pub open_target: OpenTarget,
    /// 用户划掉通知时需要回传的 ID
    pub dismiss_id: NotificationId,
}

/// 展开样式
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentStyle {
    /// 多行收件箱
    Inbox {
        title: String,
        summary: String,
        lines: Vec<String>,
    },
    /// 单条消息的大文本
    BigText { title: String, body: String },
    /// 单行，无展开
    Plain,
}

/// 渠道提示：同一房间的通知归到同一个渠道
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelHint {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenTarget {
    pub notification_id: NotificationId,
    pub host: String,
    pub room_id: String,
}

impl NotificationContent {
    /// 展开后显示的行
    pub fn expanded_lines(&self) -> Vec<&str> {
        match &self.style {
            ContentStyle::Inbox { lines, .. } => lines.iter().map(String::as_str).collect(),
            ContentStyle::BigText { body, .. } => vec![body.as_str()],
            ContentStyle::Plain => vec![self.text.as_str()],
        }
    }

    pub fn is_inbox(&self) -> bool {
        matches!(self.style, ContentStyle::Inbox { .. })
    }
}

/// 内容构建器
pub struct ContentBuilder;

impl ContentBuilder {
    /// 根据消息和当前堆栈构建通知内容
    ///
    /// `entry` 为该通知 ID 的消息堆栈（最新在前），`None` 视为空堆栈。
    /// `sub_text` 为站点名称，空字符串视为没有。
    pub fn build(
        message: &DecodedMessage,
        entry: Option<&[String]>,
        sub_text: Option<&str>,
    ) -> NotificationContent {
        let title = from_html(&message.title);
        let text = from_html(&message.body);

        let style = match message.style {
            PresentationStyle::Inbox => Self::inbox_style(message, entry, &title, &text),
            PresentationStyle::Plain => ContentStyle::Plain,
        };

        NotificationContent {
            notification_id: message.notification_id,
            title,
            text,
            style,
            badge_count: message.unread_count,
            sub_text: sub_text.filter(|s| !s.is_empty()).map(str::to_string),
            created_at: message.created_at,
            channel: ChannelHint {
                id: message.room_id.clone(),
                name: message.sender.username.clone(),
            },
            open_target: OpenTarget {
                notification_id: message.notification_id,
                host: message.host.clone(),
                room_id: message.room_id.clone(),
            },
            dismiss_id: message.notification_id,
        }
    }

    fn inbox_style(
        message: &DecodedMessage,
        entry: Option<&[String]>,
        title: &str,
        text: &str,
    ) -> ContentStyle {
        let lines = entry.unwrap_or_default();
        if lines.len() > 1 {
            ContentStyle::Inbox {
                title: title.to_string(),
                summary: Self::summary(&message.summary_template, lines.len()),
                lines: lines.iter().map(|line| from_html(line)).collect(),
            }
        } else {
            ContentStyle::BigText {
                title: title.to_string(),
                body: text.to_string(),
            }
        }
    }

    /// 替换摘要模板里的 `%n%`
    pub fn summary(template: &str, count: usize) -> String {
        from_html(&template.replace(COUNT_PLACEHOLDER, &count.to_string()))
    }
}
