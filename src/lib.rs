//! Chat Push Notify - 把同一会话的推送消息堆叠成可折叠通知

pub mod cli;
pub mod config;
pub mod notification;

pub use config::{PushConfig, RendererKind};
pub use notification::{
    ContentBuilder, ContentStyle, DecodeError, DecodedMessage, HostLabelCache, HostLabelLookup,
    MessageStack, NotificationContent, NotificationId, NotificationRenderer, PresentationStyle,
    PushEvent, PushManager, RenderResult, StaticHostLabels,
};
