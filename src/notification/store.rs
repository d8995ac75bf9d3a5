//! 消息堆栈 - 按通知 ID 累积消息正文
//!
//! 同一个通知 ID 下的消息按"最新在前"的顺序保存，用于折叠成收件箱样式。
//! 推送分发路径（append）和系统回收路径（clear）可能在不同线程上并发触发，
//! 所有读改写都在同一把锁内完成，锁内不做 I/O。

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::payload::NotificationId;

/// 消息堆栈
#[derive(Debug, Default)]
pub struct MessageStack {
    /// notification_id -> 消息正文（index 0 为最新）
    entries: Mutex<HashMap<NotificationId, VecDeque<String>>>,
}

impl MessageStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// 压入一条消息正文，不存在则新建
    pub fn append(&self, id: NotificationId, body: impl Into<String>) {
        self.lock().entry(id).or_default().push_front(body.into());
    }

    /// 压入并返回压入后的快照（同一次加锁内完成）
    pub fn append_and_snapshot(&self, id: NotificationId, body: impl Into<String>) -> Vec<String> {
        let mut entries = self.lock();
        let entry = entries.entry(id).or_default();
        entry.push_front(body.into());
        entry.iter().cloned().collect()
    }

    /// 当前累积的消息（最新在前）
    pub fn get(&self, id: NotificationId) -> Option<Vec<String>> {
        self.lock()
            .get(&id)
            .map(|entry| entry.iter().cloned().collect())
    }

    /// 清除指定通知的消息，不存在时什么都不做
    pub fn clear(&self, id: NotificationId) {
        self.lock().remove(&id);
    }

    /// 当前有消息的通知数量
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // 锁内只有内存操作，中毒后的 map 仍然一致，直接接管
    fn lock(&self) -> MutexGuard<'_, HashMap<NotificationId, VecDeque<String>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
