//! Newsletter subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::Queryable;
use crate::types::{FieldValue, ToFieldValue};

/// A newsletter subscriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    /// Unique identifier.
    pub id: u64,
    /// Email address.
    pub email: String,
    /// Display name, if given.
    pub name: Option<String>,
    /// Whether the address was confirmed.
    pub confirmed: bool,
    /// Sign-up time.
    pub subscribed_at: DateTime<Utc>,
}

impl Subscriber {
    /// Fields free-text search looks at.
    pub const SEARCHABLE_FIELDS: [&'static str; 2] = ["email", "name"];
}

impl Queryable for Subscriber {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => self.id.to_field_value(),
            "email" => self.email.to_field_value(),
            "name" => self.name.to_field_value(),
            "confirmed" => self.confirmed.to_field_value(),
            "subscribed_at" => self.subscribed_at.to_field_value(),
            _ => return None,
        };
        Some(value)
    }
}

filter_keys! {
    /// Filters offered by the subscribers screen.
    pub enum SubscriberFilter {
        /// Confirmed or pending.
        Confirmed => "confirmed",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::simulate;
    use crate::types::{QueryState, SortOrder};

    fn subscriber(id: u64, email: &str, name: Option<&str>, confirmed: bool) -> Subscriber {
        Subscriber {
            id,
            email: email.to_string(),
            name: name.map(str::to_string),
            confirmed,
            subscribed_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
                + chrono::Duration::days(id as i64),
        }
    }

    fn subscribers() -> Vec<Subscriber> {
        vec![
            subscriber(1, "ruth@example.org", Some("Ruth Miller"), true),
            subscriber(2, "miller.james@example.org", None, false),
            subscriber(3, "anna@example.org", Some("Anna Miller"), false),
            subscriber(4, "peter@example.org", Some("Peter Hale"), true),
        ]
    }

    #[test]
    fn test_search_covers_email_and_name() {
        let items = subscribers();
        let params: QueryState<SubscriberFilter> = QueryState::default()
            .with_search("MILLER")
            .with_sort("id", Some(SortOrder::Asc));

        let page = simulate(&items, &params, &Subscriber::SEARCHABLE_FIELDS);
        let ids: Vec<u64> = page.data.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_confirmed_filter_and_newest_first() {
        let items = subscribers();
        let params = QueryState::default()
            .with_filter(SubscriberFilter::Confirmed, true)
            .with_sort("subscribed_at", Some(SortOrder::Desc));

        let page = simulate(&items, &params, &Subscriber::SEARCHABLE_FIELDS);
        let ids: Vec<u64> = page.data.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![4, 1]);
        assert_eq!(page.pagination.total(), 2);
    }

    #[test]
    fn test_missing_name_is_null() {
        let item = subscriber(2, "miller.james@example.org", None, false);
        assert_eq!(item.field("name"), Some(FieldValue::Null));
        assert_eq!(item.field("confirmed"), Some(FieldValue::from(false)));
        assert_eq!(item.field("unknown"), None);
    }
}
