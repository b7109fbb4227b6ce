//! Field values read from records for searching, sorting and filtering.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single field value taken from a record.
///
/// Field values are what the reference engine compares when it sorts and
/// what it stringifies when it searches. They are also the values a
/// [`QueryState`](crate::QueryState) filter is matched against.
///
/// # Example
///
/// ```rust
/// use pagequery::FieldValue;
///
/// let text: FieldValue = "Sermon on faith".into();
/// let number: FieldValue = 42.into();
/// let flag: FieldValue = true.into();
/// assert_eq!(number.search_text().as_deref(), Some("42"));
/// assert!(FieldValue::Null.search_text().is_none());
/// # let _ = (text, flag);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    /// Null or absent value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Integer value (64-bit signed).
    Integer(i64),

    /// Floating-point value (64-bit).
    Float(f64),

    /// Text value.
    Text(String),

    /// Point in time.
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Returns `true` if this is a null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns `true` for values a filter treats as "no constraint":
    /// null and empty text.
    #[inline]
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the text value if this is a Text variant.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value for Integer and Float variants.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The string form used for free-text search.
    ///
    /// Null values have no string form and never match a search term.
    pub fn search_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Float(f) => Some(f.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Timestamp(t) => Some(t.to_rfc3339()),
        }
    }

    /// Returns `true` if `term` (already lower-cased) occurs in this
    /// value's lower-cased search text.
    pub fn contains_term(&self, term: &str) -> bool {
        self.search_text()
            .is_some_and(|text| text.to_lowercase().contains(term))
    }

    /// Equality used by filters.
    ///
    /// Integers and floats compare numerically, a Text filter matches a
    /// Timestamp field when it parses as the same RFC 3339 instant, and
    /// null never matches anything.
    pub fn matches(&self, filter: &FieldValue) -> bool {
        match (self, filter) {
            (FieldValue::Null, _) | (_, FieldValue::Null) => false,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a == b,
            (FieldValue::Timestamp(a), FieldValue::Text(b)) => DateTime::parse_from_rfc3339(b)
                .is_ok_and(|parsed| parsed.with_timezone(&Utc) == *a),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }

    /// Total ordering used for sorting.
    ///
    /// Values of the same kind compare natively and numbers compare across
    /// Integer/Float. Different kinds rank `Bool < number < Timestamp <
    /// Text`, and null ranks after every present value.
    pub fn sort_cmp(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => float_cmp(*a, *b),
            (FieldValue::Integer(a), FieldValue::Float(b)) => int_float_cmp(*a, *b),
            (FieldValue::Float(a), FieldValue::Integer(b)) => int_float_cmp(*b, *a).reverse(),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Bool(_) => 0,
            FieldValue::Integer(_) | FieldValue::Float(_) => 1,
            FieldValue::Timestamp(_) => 2,
            FieldValue::Text(_) => 3,
            FieldValue::Null => 4,
        }
    }
}

/// Orders reals numerically (`-0.0 == 0.0`), negative NaNs below every real
/// and positive NaNs above.
fn float_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Compares an integer with a float exactly, without rounding the integer
/// through `f64`. Agrees with [`float_cmp`] on NaNs.
fn int_float_cmp(i: i64, f: f64) -> Ordering {
    // 2^63, the first float above i64::MAX.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= BOUND {
        return Ordering::Less;
    }
    if f < -BOUND {
        return Ordering::Greater;
    }
    // In range, so the truncated float converts to i64 exactly.
    let whole = f.trunc() as i64;
    i.cmp(&whole).then_with(|| float_cmp(0.0, f.fract()))
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => FieldValue::Null,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Timestamp(t) => f.write_str(&t.to_rfc3339()),
        }
    }
}

/// Conversion from a record's field to a [`FieldValue`].
///
/// Implemented for the field types records commonly carry, and used by
/// `#[derive(Queryable)]` (feature `derive`).
pub trait ToFieldValue {
    /// Reads this field as a [`FieldValue`].
    fn to_field_value(&self) -> FieldValue;
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }
}

impl ToFieldValue for str {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.to_owned())
    }
}

impl ToFieldValue for bool {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Bool(*self)
    }
}

macro_rules! int_field_value {
    ($($ty:ty),*) => {
        $(
            impl ToFieldValue for $ty {
                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Integer(i64::from(*self))
                }
            }
        )*
    };
}

int_field_value!(i8, i16, i32, i64, u8, u16, u32);

impl ToFieldValue for u64 {
    fn to_field_value(&self) -> FieldValue {
        match i64::try_from(*self) {
            Ok(i) => FieldValue::Integer(i),
            Err(_) => FieldValue::Float(*self as f64),
        }
    }
}

impl ToFieldValue for usize {
    fn to_field_value(&self) -> FieldValue {
        (*self as u64).to_field_value()
    }
}

impl ToFieldValue for f32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(f64::from(*self))
    }
}

impl ToFieldValue for f64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl ToFieldValue for DateTime<Utc> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Timestamp(*self)
    }
}

impl ToFieldValue for FieldValue {
    fn to_field_value(&self) -> FieldValue {
        self.clone()
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(v) => v.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

/// Lists become comma-joined text, so searching a tag list matches any tag.
impl<T: ToFieldValue> ToFieldValue for Vec<T> {
    fn to_field_value(&self) -> FieldValue {
        let parts: Vec<String> = self
            .iter()
            .filter_map(|v| v.to_field_value().search_text())
            .collect();
        FieldValue::Text(parts.join(","))
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for &T {
    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}
