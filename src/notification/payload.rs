//! 推送事件载荷 - 上游投递的键值包
//!
//! 投递方把所有字段都当作字符串发送（包括 `notId` 和 `count`），
//! 这里只负责把键值包收成一个有类型的结构，字段语义校验留给 decoder。

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// 通知槽位 ID（由上游投递系统分配）
pub type NotificationId = i32;

/// 折叠消息摘要里的未读数占位符
pub const COUNT_PLACEHOLDER: &str = "%n%";

/// 入站推送事件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushEvent {
    /// 通知标题
    #[serde(default)]
    pub title: String,
    /// 消息正文（可能带简单的 HTML 标记）
    #[serde(default)]
    pub message: String,
    /// 图片引用
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// 嵌入的元数据 JSON 字符串
    #[serde(default)]
    pub ejson: String,
    /// 通知 ID（字符串形式的整数）
    #[serde(default, deserialize_with = "string_or_number")]
    pub not_id: String,
    /// 展示样式："inbox" 或其他
    #[serde(default)]
    pub style: String,
    /// 折叠摘要模板，例如 "%n% new messages"
    #[serde(default)]
    pub summary_text: String,
    /// 未读数（字符串形式的整数）
    #[serde(default, deserialize_with = "string_or_number")]
    pub count: String,
}

impl PushEvent {
    /// 从原始键值包构造事件
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let get = |key: &str| fields.get(key).cloned().unwrap_or_default();
        Self {
            title: get("title"),
            message: get("message"),
            image: fields.get("image").filter(|s| !s.is_empty()).cloned(),
            ejson: get("ejson"),
            not_id: get("notId"),
            style: get("style"),
            summary_text: get("summaryText"),
            count: get("count"),
        }
    }

    /// 展示样式
    pub fn presentation_style(&self) -> PresentationStyle {
        PresentationStyle::from_wire(&self.style)
    }
}

/// 展示样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationStyle {
    /// 同一通知下多条消息折叠成收件箱列表
    Inbox,
    /// 单条消息，不参与折叠
    Plain,
}

impl PresentationStyle {
    pub fn from_wire(style: &str) -> Self {
        if style == "inbox" {
            PresentationStyle::Inbox
        } else {
            PresentationStyle::Plain
        }
    }
}

impl std::fmt::Display for PresentationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresentationStyle::Inbox => write!(f, "inbox"),
            PresentationStyle::Plain => write!(f, "plain"),
        }
    }
}

/// 接受 `"42"` 或 `42` 两种写法
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}
