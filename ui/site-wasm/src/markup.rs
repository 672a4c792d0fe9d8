//! HTML for the list widgets. Stored text is escaped here and nowhere else.

use crate::config;
use ys_list::render::escape_html;
use ys_list::{ListItem, LogEntry, Message};

pub const EMPTY_LOG: &str = r#"<div class="log-item"><div class="log-text" style="text-align: center; opacity: 0.7;">暂无日志记录</div></div>"#;
pub const EMPTY_MESSAGES: &str = r#"<div class="messages-empty">暂无留言，点击+按钮添加第一条留言</div>"#;

/// Local date and time for an epoch-millisecond timestamp.
pub fn format_time(epoch_ms: u64) -> String {
    let date = js_sys::Date::new(&(epoch_ms as f64).into());
    date.to_locale_string(config::TIME_LOCALE, &wasm_bindgen::JsValue::UNDEFINED)
        .into()
}

pub fn log_list(items: &[ListItem<LogEntry>], time: impl Fn(u64) -> String) -> String {
    if items.is_empty() {
        return EMPTY_LOG.to_owned();
    }
    items
        .iter()
        .map(|item| {
            format!(
                r#"<div class="log-item"><div class="log-time">{}</div><div class="log-text">{}</div><button class="delete-log" data-id="{}">删除</button></div>"#,
                escape_html(&time(item.created_at)),
                escape_html(&item.payload.text),
                item.id,
            )
        })
        .collect()
}

pub fn message_list(items: &[ListItem<Message>], time: impl Fn(u64) -> String) -> String {
    if items.is_empty() {
        return EMPTY_MESSAGES.to_owned();
    }
    items
        .iter()
        .map(|item| {
            format!(
                r#"<div class="message-item"><div class="message-content">{}</div><div class="message-time">{}</div></div>"#,
                escape_html(&item.payload.content),
                escape_html(&time(item.created_at)),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ys_list::ItemId;

    fn fixed_time(ms: u64) -> String {
        format!("t{ms}")
    }

    #[test]
    fn empty_lists_show_placeholders() {
        assert_eq!(log_list(&[], fixed_time), EMPTY_LOG);
        assert_eq!(message_list(&[], fixed_time), EMPTY_MESSAGES);
    }

    #[test]
    fn log_rows_escape_text_and_carry_ids() {
        let items = vec![ListItem {
            id: ItemId(12),
            created_at: 5,
            payload: LogEntry::new("<script>alert(1)</script>"),
        }];

        let html = log_list(&items, fixed_time);
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"data-id="12""#));
        assert!(html.contains(r#"<div class="log-time">t5</div>"#));
    }

    #[test]
    fn message_rows_keep_list_order() {
        let items = vec![
            ListItem { id: ItemId(2), created_at: 20, payload: Message::new("newer") },
            ListItem { id: ItemId(1), created_at: 10, payload: Message::new("older & wiser") },
        ];

        let html = message_list(&items, fixed_time);
        let newer = html.find("newer").unwrap_or(usize::MAX);
        let older = html.find("older &amp; wiser").unwrap_or(usize::MAX);
        assert!(newer < older);
    }
}
