//! Translated versions of a document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::Queryable;
use crate::types::{FieldValue, ToFieldValue};

/// One language version of a [`Document`](super::Document).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    /// Unique identifier.
    pub id: u64,
    /// The document this version translates.
    pub document_id: u64,
    /// Language code, e.g. `en` or `pt-BR`.
    pub language: String,
    /// Translated title.
    pub title: String,
    /// Translated body text.
    pub body: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Version {
    /// Fields free-text search looks at.
    pub const SEARCHABLE_FIELDS: [&'static str; 2] = ["title", "body"];
}

impl Queryable for Version {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => self.id.to_field_value(),
            "document_id" => self.document_id.to_field_value(),
            "language" => self.language.to_field_value(),
            "title" => self.title.to_field_value(),
            "body" => self.body.to_field_value(),
            "created_at" => self.created_at.to_field_value(),
            _ => return None,
        };
        Some(value)
    }
}

filter_keys! {
    /// Filters offered by the versions screen.
    pub enum VersionFilter {
        /// Versions of one document.
        Document => "document_id",
        /// Versions in one language.
        Language => "language",
    }
}
