//! Data models for the bookmark service
//!
//! This module defines the persisted bookmark record and the wire-level
//! request/response structures used by the handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookmark record stored in the database
///
/// `title` and `tag` are normalized to uppercase before storage; `link` is
/// stored verbatim. `id` and `timestamp` are always server-assigned --
/// `timestamp` is refreshed on every write and serialized as `lastUpdated`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Bookmark {
    /// Database-assigned primary key
    pub id: i32,

    /// Page title, uppercased (fetched from the page itself when the client
    /// omits it)
    pub title: String,

    /// The bookmarked URL, stored exactly as submitted
    pub link: String,

    /// Creation or last-modification instant, set to `now()` on every write
    #[serde(rename = "lastUpdated")]
    pub timestamp: DateTime<Utc>,

    /// Free-text label, uppercased; empty when not provided
    #[serde(default)]
    pub tag: String,
}

/// Request payload for creating or updating a bookmark
///
/// # Example
/// ```json
/// {
///   "title": "Example Domain",
///   "link": "https://example.com",
///   "tag": "reference"
/// }
/// ```
///
/// `link` is required (an empty link is rejected); `title` and `tag` may be
/// omitted. An omitted title triggers a live fetch of the page's `<title>`
/// element.
#[derive(Deserialize, Debug)]
pub struct BookmarkData {
    /// Bookmark title; fetched from the page when empty
    #[serde(default)]
    pub title: String,

    /// The URL to bookmark
    #[serde(default)]
    pub link: String,

    /// Free-text label
    #[serde(default)]
    pub tag: String,
}

/// Request payload for full-text search
///
/// # Example
/// ```json
/// { "data": "rust async" }
/// ```
#[derive(Deserialize, Debug)]
pub struct SearchQuery {
    /// Free-text query; tokens are matched as prefixes, OR-combined
    #[serde(default)]
    pub data: String,
}

/// Query parameters carrying the `page` value for list and search
///
/// The value is kept as a raw string so an unparsable page falls back to 0
/// instead of rejecting the request.
#[derive(Deserialize, Debug, Default)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    /// The effective page value: parsed when possible, 0 otherwise
    pub fn value(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(0)
    }
}

/// Fixed-shape message body used by error responses
///
/// The capitalized `Message` key matches the service's established wire
/// format.
#[derive(Serialize, Deserialize, Debug)]
pub struct ResponseMessage {
    #[serde(rename = "Message")]
    pub message: String,
}

impl ResponseMessage {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookmark_serializes_timestamp_as_last_updated() {
        let bookmark = Bookmark {
            id: 7,
            title: "EXAMPLE".to_string(),
            link: "https://example.com".to_string(),
            timestamp: Utc::now(),
            tag: String::new(),
        };
        let json = serde_json::to_value(&bookmark).unwrap();
        assert!(json.get("lastUpdated").is_some());
        assert!(json.get("timestamp").is_none());
        assert_eq!(json["tag"], "");
    }

    #[test]
    fn bookmark_data_defaults_missing_fields() {
        let data: BookmarkData =
            serde_json::from_str(r#"{"link":"https://example.com"}"#).unwrap();
        assert_eq!(data.link, "https://example.com");
        assert!(data.title.is_empty());
        assert!(data.tag.is_empty());
    }

    #[test]
    fn page_params_fall_back_to_zero() {
        let none = PageParams { page: None };
        let bad = PageParams {
            page: Some("abc".to_string()),
        };
        let ok = PageParams {
            page: Some("25".to_string()),
        };
        assert_eq!(none.value(), 0);
        assert_eq!(bad.value(), 0);
        assert_eq!(ok.value(), 25);
    }

    #[test]
    fn response_message_uses_capitalized_key() {
        let json = serde_json::to_value(ResponseMessage::new("Bad Request")).unwrap();
        assert_eq!(json["Message"], "Bad Request");
    }
}
