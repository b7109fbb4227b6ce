//! Published documents: sermons, articles, bulletins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::Queryable;
use crate::types::{FieldValue, ToFieldValue};

/// A document in the content library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Author or preacher.
    pub author: String,
    /// Short abstract shown in listings.
    pub summary: String,
    /// Content category, e.g. `sermon` or `article`.
    pub category: String,
    /// Whether the document is visible on the public site.
    pub published: bool,
    /// Tag names attached to the document.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Fields free-text search looks at.
    pub const SEARCHABLE_FIELDS: [&'static str; 3] = ["title", "author", "summary"];
}

impl Queryable for Document {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => self.id.to_field_value(),
            "title" => self.title.to_field_value(),
            "author" => self.author.to_field_value(),
            "summary" => self.summary.to_field_value(),
            "category" => self.category.to_field_value(),
            "published" => self.published.to_field_value(),
            "tags" => self.tags.to_field_value(),
            "created_at" => self.created_at.to_field_value(),
            "updated_at" => self.updated_at.to_field_value(),
            _ => return None,
        };
        Some(value)
    }
}

filter_keys! {
    /// Filters offered by the documents screen.
    pub enum DocumentFilter {
        /// Exact category.
        Category => "category",
        /// Published or draft.
        Published => "published",
        /// Exact author.
        Author => "author",
    }
}
