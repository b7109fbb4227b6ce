//! Media attachments.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::Queryable;
use crate::types::{FieldValue, ToFieldValue};

/// What kind of file a [`Media`] attachment is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Photo or illustration.
    Image,
    /// Sermon recording or hymn.
    Audio,
    /// Video recording.
    Video,
    /// Printable document.
    Pdf,
}

impl MediaKind {
    /// The lowercase name used on the wire and in filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
            MediaKind::Pdf => "pdf",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToFieldValue for MediaKind {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::from(self.as_str())
    }
}

impl From<MediaKind> for FieldValue {
    fn from(kind: MediaKind) -> Self {
        kind.to_field_value()
    }
}

/// A file attached to a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    /// Unique identifier.
    pub id: u64,
    /// The document the file is attached to.
    pub document_id: u64,
    /// Original file name.
    pub file_name: String,
    /// Optional caption.
    pub caption: Option<String>,
    /// File kind.
    pub kind: MediaKind,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Upload time.
    pub uploaded_at: DateTime<Utc>,
}

impl Media {
    /// Fields free-text search looks at.
    pub const SEARCHABLE_FIELDS: [&'static str; 2] = ["file_name", "caption"];
}

impl Queryable for Media {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => self.id.to_field_value(),
            "document_id" => self.document_id.to_field_value(),
            "file_name" => self.file_name.to_field_value(),
            "caption" => self.caption.to_field_value(),
            "kind" => self.kind.to_field_value(),
            "size_bytes" => self.size_bytes.to_field_value(),
            "uploaded_at" => self.uploaded_at.to_field_value(),
            _ => return None,
        };
        Some(value)
    }
}

filter_keys! {
    /// Filters offered by the media screen.
    pub enum MediaFilter {
        /// Attachments of one document.
        Document => "document_id",
        /// Attachments of one kind.
        Kind => "kind",
    }
}
