//! Field access for records the engine queries.

use serde_json::Value;

use crate::types::FieldValue;

/// A record whose fields can be read by name.
///
/// Returning `None` means the record has no such field; the engine treats
/// that the same as a null value (never matches a search or filter, sorts
/// last).
///
/// ## Example
///
/// ```rust
/// use pagequery::{FieldValue, Queryable};
///
/// struct Hymn {
///     title: String,
///     number: u32,
/// }
///
/// impl Queryable for Hymn {
///     fn field(&self, name: &str) -> Option<FieldValue> {
///         match name {
///             "title" => Some(self.title.as_str().into()),
///             "number" => Some(self.number.into()),
///             _ => None,
///         }
///     }
/// }
///
/// let hymn = Hymn { title: "Amazing Grace".into(), number: 378 };
/// assert_eq!(hymn.field("number"), Some(FieldValue::Integer(378)));
/// assert_eq!(hymn.field("composer"), None);
/// ```
pub trait Queryable {
    /// Reads the field called `name`.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

impl<T: Queryable + ?Sized> Queryable for &T {
    fn field(&self, name: &str) -> Option<FieldValue> {
        (**self).field(name)
    }
}

/// JSON objects expose their top-level keys. Non-object values have no
/// fields.
impl Queryable for Value {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.as_object()?.get(name).map(json_to_field)
    }
}

fn json_to_field(value: &Value) -> FieldValue {
    match value {
        Value::Null => FieldValue::Null,
        Value::Bool(b) => FieldValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => FieldValue::Integer(i),
            None => n.as_f64().map_or(FieldValue::Null, FieldValue::Float),
        },
        Value::String(s) => FieldValue::Text(s.clone()),
        nested @ (Value::Array(_) | Value::Object(_)) => FieldValue::Text(nested.to_string()),
    }
}
