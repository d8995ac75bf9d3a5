//! JSON Lines 渲染端 - 每条通知输出一行 JSON
//!
//! 给外部渲染进程（或测试）消费：
//! ```text
//! {"event":"render","content":{...}}
//! {"event":"cancel","notification_id":42}
//! ```

use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Mutex;

use crate::notification::channel::{NotificationRenderer, RenderResult};
use crate::notification::content::NotificationContent;
use crate::notification::payload::NotificationId;

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Line<'a> {
    Render { content: &'a NotificationContent },
    Cancel { notification_id: NotificationId },
}

/// JSON Lines 渲染端
pub struct JsonLinesRenderer {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonLinesRenderer {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// 输出到 stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    fn write_line(&self, line: &Line<'_>) -> Result<()> {
        let json = serde_json::to_string(line)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow::anyhow!("JSON lines writer lock poisoned"))?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;
        Ok(())
    }
}

impl NotificationRenderer for JsonLinesRenderer {
    fn name(&self) -> &str {
        "json_lines"
    }

    fn render(&self, content: &NotificationContent) -> Result<RenderResult> {
        match self.write_line(&Line::Render { content }) {
            Ok(()) => Ok(RenderResult::Rendered),
            Err(e) => Ok(RenderResult::Failed(e.to_string())),
        }
    }

    fn cancel(&self, id: NotificationId) -> Result<()> {
        self.write_line(&Line::Cancel {
            notification_id: id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::content::ContentBuilder;
    use crate::notification::decoder::{DecodedMessage, Sender};
    use crate::notification::payload::PresentationStyle;
    use chrono::Utc;
    use std::sync::Arc;

    /// 测试用的共享缓冲区
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn lines(&self) -> Vec<serde_json::Value> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|l| serde_json::from_str(l).unwrap())
                .collect()
        }
    }

    fn content() -> NotificationContent {
        let message = DecodedMessage {
            notification_id: 42,
            title: "Bob".to_string(),
            body: "Hi".to_string(),
            image_ref: None,
            room_id: "r1".to_string(),
            host: "h".to_string(),
            conversation_type: "d".to_string(),
            conversation_name: None,
            sender: Sender {
                id: "u1".to_string(),
                username: "bob".to_string(),
                display_name: "Bob".to_string(),
            },
            created_at: Utc::now(),
            unread_count: 1,
            summary_template: "%n% new messages".to_string(),
            style: PresentationStyle::Inbox,
        };
        ContentBuilder::build(&message, None, None)
    }

    #[test]
    fn test_render_writes_one_line() {
        let buf = SharedBuf::default();
        let renderer = JsonLinesRenderer::new(buf.clone());

        let result = renderer.render(&content()).unwrap();
        assert_eq!(result, RenderResult::Rendered);

        let lines = buf.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["event"], "render");
        assert_eq!(lines[0]["content"]["notification_id"], 42);
        assert_eq!(lines[0]["content"]["style"]["kind"], "big_text");
    }

    #[test]
    fn test_cancel_line() {
        let buf = SharedBuf::default();
        let renderer = JsonLinesRenderer::new(buf.clone());
        renderer.cancel(7).unwrap();

        let lines = buf.lines();
        assert_eq!(lines[0]["event"], "cancel");
        assert_eq!(lines[0]["notification_id"], 7);
    }
}
