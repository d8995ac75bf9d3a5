//! 推送通知 - 按通知 ID 堆叠消息并生成折叠通知
//!
//! # 组成
//! 1. `decoder`：解析推送事件和嵌入的 ejson 元数据
//! 2. `store::MessageStack`：按通知 ID 累积消息（进程内唯一共享状态）
//! 3. `content::ContentBuilder`：决定收件箱列表 / 大文本 / 单行
//! 4. `PushManager`：串起整个流程，并处理通知被划掉
//!
//! # 使用示例
//! ```ignore
//! use chat_push_notify::notification::{
//!     LogRenderer, MessageStack, PushEvent, PushManager, StaticHostLabels,
//! };
//! use std::sync::Arc;
//!
//! let manager = PushManager::new(
//!     Arc::new(MessageStack::new()),
//!     Arc::new(StaticHostLabels::default()),
//!     Arc::new(LogRenderer::new()),
//! );
//! let content = manager.handle(&event);
//! manager.on_dismiss(42);
//! ```

pub mod channel;
pub mod channels;
pub mod content;
pub mod decoder;
pub mod host_label;
pub mod manager;
pub mod markup;
pub mod payload;
pub mod store;

pub use channel::{NotificationRenderer, RenderResult};
pub use channels::{JsonLinesRenderer, LogRenderer};
pub use content::{ChannelHint, ContentBuilder, ContentStyle, NotificationContent, OpenTarget};
pub use decoder::{decode, decode_fields, DecodeError, DecodedMessage, Sender};
pub use host_label::{HostLabelCache, HostLabelLookup, StaticHostLabels};
pub use manager::PushManager;
pub use markup::from_html;
pub use payload::{NotificationId, PresentationStyle, PushEvent, COUNT_PLACEHOLDER};
pub use store::MessageStack;
