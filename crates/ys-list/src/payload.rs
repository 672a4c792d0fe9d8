//! Per-kind behaviour of list payloads: ordering and validation.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use url::Url;
use ys_types::{IconShortcut, ItemOrdering, LogEntry, Message};

use crate::error::ValidationError;

pub trait Payload: Clone + PartialEq + Debug + Serialize + DeserializeOwned {
    /// Short name used in log output.
    const KIND: &'static str;
    const ORDERING: ItemOrdering;

    /// Fields that must be non-blank, in the order they are checked.
    fn required_fields(&self) -> Vec<(&'static str, &str)>;

    /// Fields that must parse as absolute URLs.
    fn url_fields(&self) -> Vec<(&'static str, &str)> {
        Vec::new()
    }
}

impl Payload for LogEntry {
    const KIND: &'static str = "log";
    const ORDERING: ItemOrdering = ItemOrdering::NewestFirst;

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("text", self.text.as_str())]
    }
}

impl Payload for Message {
    const KIND: &'static str = "message";
    const ORDERING: ItemOrdering = ItemOrdering::NewestFirst;

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("content", self.content.as_str())]
    }
}

impl Payload for IconShortcut {
    const KIND: &'static str = "icon";
    const ORDERING: ItemOrdering = ItemOrdering::Insertion;

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("name", self.name.as_str()),
            ("target_url", self.target_url.as_str()),
            ("image_url", self.image_url.as_str()),
        ]
    }

    fn url_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("target_url", self.target_url.as_str()),
            ("image_url", self.image_url.as_str()),
        ]
    }
}

/// Checks required fields first, then URL fields. Whitespace-only values count
/// as missing.
pub fn validate<P: Payload>(payload: &P) -> Result<(), ValidationError> {
    for (field, value) in payload.required_fields() {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field));
        }
    }

    for (field, value) in payload.url_fields() {
        if Url::parse(value.trim()).is_err() {
            return Err(ValidationError::InvalidUrl {
                field,
                value: value.to_owned(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_missing() {
        assert_eq!(
            validate(&LogEntry::new("   ")),
            Err(ValidationError::MissingField("text"))
        );
        assert_eq!(
            validate(&Message::new("")),
            Err(ValidationError::MissingField("content"))
        );
        assert_eq!(validate(&Message::new("hi")), Ok(()));
    }

    #[test]
    fn icon_reports_first_missing_field() {
        let icon = IconShortcut::new("", "http://x", "http://y");
        assert_eq!(validate(&icon), Err(ValidationError::MissingField("name")));

        let icon = IconShortcut::new("a", "http://x", "");
        assert_eq!(validate(&icon), Err(ValidationError::MissingField("image_url")));
    }

    #[test]
    fn icon_urls_must_be_absolute() {
        let icon = IconShortcut::new("a", "not-a-url", "http://y");
        assert_eq!(
            validate(&icon),
            Err(ValidationError::InvalidUrl {
                field: "target_url",
                value: "not-a-url".to_owned(),
            })
        );

        let icon = IconShortcut::new("a", "http://x", "/relative/img.png");
        assert!(matches!(
            validate(&icon),
            Err(ValidationError::InvalidUrl { field: "image_url", .. })
        ));

        assert_eq!(validate(&IconShortcut::new("a", "http://x", "http://y")), Ok(()));
    }
}
