//! 消息解码 - 把推送事件和嵌入的 ejson 元数据解析成 `DecodedMessage`
//!
//! ejson 结构：
//! ```text
//! {
//!   "host": "https://chat.example.com",
//!   "rid": "GENERAL",
//!   "type": "c",
//!   "name": "general",
//!   "sender": "{\"_id\":\"u1\",\"username\":\"bob\",\"name\":\"Bob\"}"
//! }
//! ```
//! `sender` 通常是再次编码的 JSON 字符串，也接受直接嵌入的对象。

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

use super::payload::{NotificationId, PresentationStyle, PushEvent};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed payload: field `{field}` {reason}")]
    MalformedPayload { field: &'static str, reason: String },

    #[error("malformed payload: ejson is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl DecodeError {
    fn missing(field: &'static str) -> Self {
        DecodeError::MalformedPayload {
            field,
            reason: "is missing".to_string(),
        }
    }

    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DecodeError::MalformedPayload {
            field,
            reason: reason.into(),
        }
    }

    /// 出错的字段名
    pub fn field(&self) -> &'static str {
        match self {
            DecodeError::MalformedPayload { field, .. } => field,
            DecodeError::InvalidJson(_) => "ejson",
        }
    }
}

/// 消息发送者
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sender {
    pub id: String,
    pub username: String,
    pub display_name: String,
}

/// 解码后的推送消息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedMessage {
    pub notification_id: NotificationId,
    pub title: String,
    pub body: String,
    pub image_ref: Option<String>,
    pub room_id: String,
    pub host: String,
    pub conversation_type: String,
    pub conversation_name: Option<String>,
    pub sender: Sender,
    /// 解码时刻（不取自载荷）
    pub created_at: DateTime<Utc>,
    pub unread_count: u32,
    pub summary_template: String,
    pub style: PresentationStyle,
}

/// 解码推送事件
pub fn decode(event: &PushEvent) -> Result<DecodedMessage, DecodeError> {
    let notification_id = parse_notification_id(&event.not_id)?;
    let unread_count = parse_count(&event.count)?;

    let ejson = parse_object(&event.ejson, "ejson")?;
    let host = required_str(&ejson, "host", "host")?;
    let room_id = required_str(&ejson, "rid", "rid")?;
    let conversation_type = required_str(&ejson, "type", "type")?;
    let conversation_name = optional_str(&ejson, "name");
    let sender = decode_sender(&ejson)?;

    Ok(DecodedMessage {
        notification_id,
        title: event.title.clone(),
        body: event.message.clone(),
        image_ref: event.image.clone().filter(|s| !s.is_empty()),
        room_id,
        host,
        conversation_type,
        conversation_name,
        sender,
        created_at: Utc::now(),
        unread_count,
        summary_template: event.summary_text.clone(),
        style: event.presentation_style(),
    })
}

/// 从原始键值包 + ejson 解码
pub fn decode_fields(
    raw: &HashMap<String, String>,
    ejson: &str,
) -> Result<DecodedMessage, DecodeError> {
    let mut event = PushEvent::from_fields(raw);
    event.ejson = ejson.to_string();
    decode(&event)
}

fn parse_notification_id(raw: &str) -> Result<NotificationId, DecodeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DecodeError::missing("notId"));
    }
    raw.parse()
        .map_err(|e| DecodeError::invalid("notId", format!("is not an integer: {e}")))
}

/// 未读数：空串视为 0，负数按 0 处理，超出范围取 `u32::MAX`
fn parse_count(raw: &str) -> Result<u32, DecodeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    let count: i64 = raw
        .parse()
        .map_err(|e| DecodeError::invalid("count", format!("is not an integer: {e}")))?;
    Ok(u32::try_from(count.max(0)).unwrap_or(u32::MAX))
}

fn parse_object(raw: &str, field: &'static str) -> Result<Map<String, Value>, DecodeError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| match field {
        "ejson" => DecodeError::InvalidJson(e),
        _ => DecodeError::invalid(field, format!("is not valid JSON: {e}")),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(DecodeError::invalid(field, "is not a JSON object")),
    }
}

fn decode_sender(ejson: &Map<String, Value>) -> Result<Sender, DecodeError> {
    let sender = match ejson.get("sender") {
        Some(Value::String(s)) => parse_object(s, "sender")?,
        Some(Value::Object(map)) => map.clone(),
        Some(Value::Null) | None => return Err(DecodeError::missing("sender")),
        Some(_) => return Err(DecodeError::invalid("sender", "is not a JSON object")),
    };

    Ok(Sender {
        id: required_str(&sender, "_id", "sender._id")?,
        username: required_str(&sender, "username", "sender.username")?,
        display_name: required_str(&sender, "name", "sender.name")?,
    })
}

/// 读取必填字段，数字按字符串处理
fn required_str(
    obj: &Map<String, Value>,
    key: &str,
    field: &'static str,
) -> Result<String, DecodeError> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(Value::Null) | None => Err(DecodeError::missing(field)),
        Some(_) => Err(DecodeError::invalid(field, "is not a string")),
    }
}

fn optional_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}
