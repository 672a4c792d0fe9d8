//! Versioned JSON encoding of a whole list.
//!
//! Version 1 is an envelope `{"version":1,"next_id":N,"items":[...]}`.
//! Version 0 is the bare array the site wrote before ids were counted; it is
//! migrated on decode. Encoding is compact `serde_json` output, so decoding
//! and re-encoding an unmodified value reproduces it byte for byte.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashSet;
use ys_types::{ItemId, ListItem};

use crate::error::CodecError;
use crate::payload::Payload;

pub const SCHEMA_VERSION: u64 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<P> {
    pub items: Vec<ListItem<P>>,
    pub next_id: ItemId,
    /// Schema version the value was stored with, when older than current.
    pub migrated_from: Option<u64>,
}

#[derive(Serialize)]
struct EnvelopeRef<'a, P> {
    version: u64,
    next_id: ItemId,
    items: &'a [ListItem<P>],
}

#[derive(Deserialize)]
struct Envelope<P> {
    next_id: ItemId,
    items: Vec<ListItem<P>>,
}

#[derive(Deserialize)]
struct LegacyRecord<P> {
    id: u64,
    #[serde(default)]
    timestamp: Option<Value>,
    #[serde(flatten)]
    payload: P,
}

pub fn encode<P: Payload>(items: &[ListItem<P>], next_id: ItemId) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EnvelopeRef {
        version: SCHEMA_VERSION,
        next_id,
        items,
    })
}

pub fn decode<P: Payload>(raw: &str) -> Result<Decoded<P>, CodecError> {
    let mut value: Value = serde_json::from_str(raw)?;
    let mut version = match &value {
        Value::Array(_) => 0,
        Value::Object(map) => map
            .get("version")
            .and_then(Value::as_u64)
            .ok_or(CodecError::MissingVersion)?,
        _ => return Err(CodecError::UnexpectedShape),
    };

    if version > SCHEMA_VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }

    let stored_version = version;
    while version < SCHEMA_VERSION {
        let target = version + 1;
        value = match target {
            1 => migrate_to_v1::<P>(value)?,
            _ => unreachable!("unsupported list schema migration: {target}"),
        };
        version = target;
    }

    let envelope: Envelope<P> = serde_json::from_value(value)?;
    let floor = match max_id(&envelope.items) {
        Some(max) => max.next().ok_or(CodecError::IdsExhausted)?,
        None => ItemId(1),
    };

    Ok(Decoded {
        next_id: envelope.next_id.max(floor),
        items: envelope.items,
        migrated_from: (stored_version < SCHEMA_VERSION).then_some(stored_version),
    })
}

fn max_id<P>(items: &[ListItem<P>]) -> Option<ItemId> {
    items.iter().map(|item| item.id).max()
}

/// Bare array → envelope. `created_at` comes from a numeric `timestamp` when
/// the record has one, otherwise from the id, which was a clock reading.
/// Records that share an id get fresh ids past the maximum.
fn migrate_to_v1<P: Payload>(value: Value) -> Result<Value, CodecError> {
    let records: Vec<LegacyRecord<P>> = serde_json::from_value(value)?;
    let mut next_id = match records.iter().map(|record| record.id).max() {
        Some(max) => ItemId(max).next().ok_or(CodecError::IdsExhausted)?,
        None => ItemId(1),
    };

    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(records.len());
    for record in records {
        let created_at = record
            .timestamp
            .as_ref()
            .and_then(Value::as_u64)
            .unwrap_or(record.id);
        let id = if seen.insert(record.id) {
            ItemId(record.id)
        } else {
            let fresh = next_id;
            next_id = next_id.next().ok_or(CodecError::IdsExhausted)?;
            fresh
        };
        items.push(ListItem {
            id,
            created_at,
            payload: record.payload,
        });
    }

    Ok(json!({
        "version": 1,
        "next_id": next_id,
        "items": items,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ys_types::{IconShortcut, LogEntry, Message};

    fn log(id: u64, created_at: u64, text: &str) -> ListItem<LogEntry> {
        ListItem {
            id: ItemId(id),
            created_at,
            payload: LogEntry::new(text),
        }
    }

    #[test]
    fn encode_then_decode_preserves_order_and_fields() {
        let items = vec![log(2, 20, "second"), log(1, 10, "first <b>")];
        let raw = encode(&items, ItemId(3)).unwrap();

        let decoded: Decoded<LogEntry> = decode(&raw).unwrap();
        assert_eq!(decoded.items, items);
        assert_eq!(decoded.next_id, ItemId(3));
        assert_eq!(decoded.migrated_from, None);

        assert_eq!(encode(&decoded.items, decoded.next_id).unwrap(), raw);
    }

    #[test]
    fn envelope_layout_is_stable() {
        let raw = encode(&[log(1, 5, "a")], ItemId(2)).unwrap();
        assert_eq!(
            raw,
            r#"{"version":1,"next_id":2,"items":[{"id":1,"created_at":5,"text":"a"}]}"#
        );
    }

    #[test]
    fn next_id_never_trails_stored_ids() {
        let raw = r#"{"version":1,"next_id":1,"items":[{"id":9,"created_at":5,"text":"a"}]}"#;
        let decoded: Decoded<LogEntry> = decode(raw).unwrap();
        assert_eq!(decoded.next_id, ItemId(10));
    }

    #[test]
    fn legacy_messages_use_numeric_timestamp() {
        let raw = r#"[
            {"id":1700000005000,"content":"newer","time":"2023/11/15 06:13:25","timestamp":1700000005123},
            {"id":1,"content":"欢迎留言！","time":"2023/11/15 06:13:20","timestamp":1700000000000}
        ]"#;

        let decoded: Decoded<Message> = decode(raw).unwrap();
        assert_eq!(decoded.migrated_from, Some(0));
        assert_eq!(decoded.items.len(), 2);
        assert_eq!(decoded.items[0].created_at, 1_700_000_005_123);
        assert_eq!(decoded.items[1].id, ItemId(1));
        assert_eq!(decoded.items[1].payload.content, "欢迎留言！");
        assert_eq!(decoded.next_id, ItemId(1_700_000_005_001));
    }

    #[test]
    fn legacy_logs_fall_back_to_id_for_creation_time() {
        let raw = r#"[{"id":1700000000000,"timestamp":"2023/11/15 06:13:20","text":"edited header"}]"#;
        let decoded: Decoded<LogEntry> = decode(raw).unwrap();
        assert_eq!(decoded.items[0].created_at, 1_700_000_000_000);
        assert_eq!(decoded.items[0].payload.text, "edited header");
    }

    #[test]
    fn legacy_icons_map_old_field_names() {
        let raw = r#"[{"id":42,"name":"Docs","url":"https://docs.rs","image":"https://docs.rs/i.png","timestamp":"2024-01-01T00:00:00.000Z"}]"#;
        let decoded: Decoded<IconShortcut> = decode(raw).unwrap();
        assert_eq!(
            decoded.items[0].payload,
            IconShortcut::new("Docs", "https://docs.rs", "https://docs.rs/i.png")
        );
        assert_eq!(decoded.items[0].created_at, 42);
    }

    #[test]
    fn legacy_duplicate_ids_are_reassigned() {
        let raw = r#"[{"id":7,"text":"a"},{"id":7,"text":"b"},{"id":3,"text":"c"}]"#;
        let decoded: Decoded<LogEntry> = decode(raw).unwrap();
        let ids: Vec<u64> = decoded.items.iter().map(|item| item.id.0).collect();
        assert_eq!(ids, vec![7, 8, 3]);
        assert_eq!(decoded.next_id, ItemId(9));
    }

    #[test]
    fn rejects_future_versions_and_odd_shapes() {
        let future = r#"{"version":2,"next_id":1,"items":[]}"#;
        assert!(matches!(
            decode::<LogEntry>(future),
            Err(CodecError::UnsupportedVersion(2))
        ));
        assert!(matches!(
            decode::<LogEntry>(r#"{"items":[]}"#),
            Err(CodecError::MissingVersion)
        ));
        assert!(matches!(decode::<LogEntry>("\"text\""), Err(CodecError::UnexpectedShape)));
        assert!(matches!(decode::<LogEntry>("[{"), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn top_of_range_id_is_rejected() {
        let raw = format!(
            r#"{{"version":1,"next_id":1,"items":[{{"id":{},"created_at":5,"text":"a"}}]}}"#,
            u64::MAX
        );
        assert!(matches!(decode::<LogEntry>(&raw), Err(CodecError::IdsExhausted)));

        let legacy = format!(r#"[{{"id":{},"text":"a"}}]"#, u64::MAX);
        assert!(matches!(decode::<LogEntry>(&legacy), Err(CodecError::IdsExhausted)));

        let near_top = format!(
            r#"{{"version":1,"next_id":1,"items":[{{"id":{},"created_at":5,"text":"a"}}]}}"#,
            u64::MAX - 1
        );
        let decoded: Decoded<LogEntry> = decode(&near_top).unwrap();
        assert_eq!(decoded.next_id, ItemId(u64::MAX));
    }
}
