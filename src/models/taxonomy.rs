//! Tags and languages: small lookup lists without filters.

use serde::{Deserialize, Serialize};

use crate::engine::Queryable;
use crate::types::{FieldValue, ToFieldValue};

/// A tag documents can be labelled with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
}

impl Tag {
    /// Fields free-text search looks at.
    pub const SEARCHABLE_FIELDS: [&'static str; 1] = ["name"];
}

impl Queryable for Tag {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.to_field_value()),
            "name" => Some(self.name.to_field_value()),
            "slug" => Some(self.slug.to_field_value()),
            _ => None,
        }
    }
}

/// A language content can be translated into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Language code, e.g. `en` or `pt-BR`.
    pub code: String,
    /// English name.
    pub name: String,
    /// Whether the public site offers this language.
    pub enabled: bool,
}

impl Language {
    /// Fields free-text search looks at.
    pub const SEARCHABLE_FIELDS: [&'static str; 2] = ["code", "name"];
}

impl Queryable for Language {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "code" => Some(self.code.to_field_value()),
            "name" => Some(self.name.to_field_value()),
            "enabled" => Some(self.enabled.to_field_value()),
            _ => None,
        }
    }
}
