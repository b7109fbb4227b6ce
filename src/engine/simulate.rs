//! Search, filter, sort and paginate over an in-memory collection.

use super::Queryable;
use crate::types::{FieldValue, FilterKey, PaginatedResult, PaginationMeta, QueryState, SortOrder};

/// Runs `params` against `items` and returns the requested page.
///
/// Steps, in order:
///
/// 1. **Search**: when `params.search` and `searchable_fields` are both
///    non-empty, keep an item if any searchable field, as lower-cased text,
///    contains the lower-cased search term. Null or absent fields never
///    match.
/// 2. **Filter**: keep an item only if every filter equals the item's
///    field (see [`FieldValue::matches`]). Absent fields never match.
/// 3. **Sort**: when a sort field is set, order by it with
///    [`FieldValue::sort_cmp`], reversed for `desc`. The sort is stable, so
///    equal keys keep their input order.
/// 4. **Paginate**: return `limit` items starting at `(page - 1) * limit`.
///    Pages past the end yield no items; the metadata still reports the
///    true `total` and `total_pages`.
///
/// `total` counts the items left after steps 1 and 2.
///
/// ## Example
///
/// ```rust
/// use pagequery::{QueryState, simulate};
/// use serde_json::json;
///
/// let items = vec![
///     json!({ "title": "Faith and Works" }),
///     json!({ "title": "Hope" }),
///     json!({ "title": "Faithful Servants" }),
/// ];
/// let params: QueryState = QueryState::default().with_search("FAITH").with_limit(1);
///
/// let page = simulate(&items, &params, &["title"]);
/// assert_eq!(page.data, vec![json!({ "title": "Faith and Works" })]);
/// assert_eq!(page.pagination.total(), 2);
/// assert!(page.pagination.has_next());
/// ```
pub fn simulate<T, K>(
    items: &[T],
    params: &QueryState<K>,
    searchable_fields: &[&str],
) -> PaginatedResult<T>
where
    T: Queryable + Clone,
    K: FilterKey,
{
    let term = params.search.to_lowercase();
    let search_active = !term.is_empty() && !searchable_fields.is_empty();

    let mut matched: Vec<&T> = items
        .iter()
        .filter(|item| !search_active || matches_search(*item, &term, searchable_fields))
        .filter(|item| matches_filters(*item, params))
        .collect();

    if let Some(field) = params.sort_field() {
        sort_stable(&mut matched, field, params.sort_order);
    }

    let total = matched.len() as u64;
    let offset = usize::try_from(params.offset()).unwrap_or(usize::MAX);
    let limit = params.limit.get() as usize;
    let data = matched
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();

    PaginatedResult::new(
        data,
        PaginationMeta::new(total, params.page.get(), params.limit.get()),
    )
}

fn matches_search<T: Queryable>(item: &T, term: &str, fields: &[&str]) -> bool {
    fields
        .iter()
        .any(|name| item.field(name).is_some_and(|value| value.contains_term(term)))
}

fn matches_filters<T: Queryable, K: FilterKey>(item: &T, params: &QueryState<K>) -> bool {
    params
        .filters
        .iter()
        .filter(|(_, wanted)| !wanted.is_blank())
        .all(|(key, wanted)| {
            item.field(key.field())
                .is_some_and(|value| value.matches(wanted))
        })
}

fn sort_stable<T: Queryable>(items: &mut Vec<&T>, field: &str, order: SortOrder) {
    let mut keyed: Vec<(FieldValue, &T)> = items
        .drain(..)
        .map(|item| (item.field(field).unwrap_or(FieldValue::Null), item))
        .collect();

    // `sort_by` is stable: equal keys keep their input order.
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = a.sort_cmp(b);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    items.extend(keyed.into_iter().map(|(_, item)| item));
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use proptest::prelude::*;
    use serde::{Deserialize, Serialize};
    use serde_json::{Value, json};

    use super::*;
    use crate::types::NoFilter;

    fn titles(result: &PaginatedResult<Value>) -> Vec<&str> {
        result
            .data
            .iter()
            .map(|v| v["title"].as_str().unwrap_or_default())
            .collect()
    }

    /// 25 documents, 7 of which mention "faith" in some casing.
    fn library() -> Vec<Value> {
        (0..25)
            .map(|i| {
                let title = match i {
                    0 | 4 | 8 => format!("Sermon {i}: FAITH in practice"),
                    12 | 16 => format!("Faithful living {i}"),
                    20 | 24 => format!("Keeping the faith {i}"),
                    _ => format!("Sermon {i}: hope"),
                };
                json!({ "id": i, "title": title })
            })
            .collect()
    }

    #[test]
    fn test_empty_collection() {
        let params: QueryState = QueryState::default();
        let result = simulate::<Value, NoFilter>(&[], &params, &[]);

        assert!(result.data.is_empty());
        assert_eq!(result.pagination, PaginationMeta::new(0, 1, 20));
        assert_eq!(result.pagination.total_pages(), 0);
        assert!(!result.pagination.has_next());
        assert!(!result.pagination.has_prev());
    }

    #[test]
    fn test_empty_sort_field_means_unsorted() {
        let items = vec![json!({ "title": "b" }), json!({ "title": "a" })];
        let mut params: QueryState = QueryState::default();
        params.sort_by = Some(String::new());

        let result = simulate(&items, &params, &[]);
        assert_eq!(titles(&result), vec!["b", "a"]);
    }

    #[test]
    fn test_search_then_paginate() {
        let items = library();
        let params: QueryState = QueryState::default().with_search("faith").with_limit(5);

        let page1 = simulate(&items, &params, &["title"]);
        assert_eq!(page1.data.len(), 5);
        assert_eq!(page1.pagination, PaginationMeta::new(7, 1, 5));
        assert_eq!(page1.pagination.total_pages(), 2);
        assert!(page1.pagination.has_next());
        assert!(!page1.pagination.has_prev());

        let page2 = simulate(&items, &params.with_page(2), &["title"]);
        assert_eq!(page2.data.len(), 2);
        assert!(!page2.pagination.has_next());
        assert!(page2.pagination.has_prev());
    }

    #[test]
    fn test_out_of_range_page_is_not_clamped() {
        let items = library();
        let params: QueryState = QueryState::default()
            .with_search("faith")
            .with_limit(5)
            .with_page(10);

        let result = simulate(&items, &params, &["title"]);
        assert!(result.data.is_empty());
        assert_eq!(result.pagination.total(), 7);
        assert_eq!(result.pagination.total_pages(), 2);
        assert_eq!(result.pagination.page(), 10);
        assert!(result.pagination.has_prev());
        assert!(!result.pagination.has_next());
    }

    #[test]
    fn test_search_without_searchable_fields_keeps_everything() {
        let items = library();
        let params: QueryState = QueryState::default().with_search("nothing matches this");

        let result = simulate(&items, &params, &[]);
        assert_eq!(result.pagination.total(), 25);
    }

    #[test]
    fn test_search_skips_missing_and_null_fields() {
        let items = vec![
            json!({ "title": "Grace", "author": null }),
            json!({ "title": "Mercy" }),
            json!({ "title": "Peace", "author": "Grace Hopper" }),
        ];
        let params: QueryState = QueryState::default().with_search("grace");

        let result = simulate(&items, &params, &["author"]);
        assert_eq!(titles(&result), vec!["Peace"]);
    }

    #[test]
    fn test_search_coerces_numbers_to_text() {
        let items = vec![json!({ "title": "Psalm", "number": 23 }), json!({ "title": "Hymn", "number": 7 })];
        let params: QueryState = QueryState::default().with_search("23");

        let result = simulate(&items, &params, &["number"]);
        assert_eq!(titles(&result), vec!["Psalm"]);
    }

    #[test]
    fn test_sort_asc_and_desc() {
        let items = vec![
            json!({ "title": "b", "views": 10 }),
            json!({ "title": "a", "views": 2 }),
            json!({ "title": "c", "views": 33 }),
        ];

        let asc: QueryState = QueryState::default().with_sort("views", Some(SortOrder::Asc));
        assert_eq!(titles(&simulate(&items, &asc, &[])), vec!["a", "b", "c"]);

        let desc = asc.with_sort("views", Some(SortOrder::Desc));
        assert_eq!(titles(&simulate(&items, &desc, &[])), vec!["c", "b", "a"]);

        let by_title = asc.with_sort("title", Some(SortOrder::Asc));
        assert_eq!(titles(&simulate(&items, &by_title, &[])), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let items = vec![
            json!({ "title": "first", "lang": "en" }),
            json!({ "title": "second", "lang": "de" }),
            json!({ "title": "third", "lang": "en" }),
            json!({ "title": "fourth", "lang": "de" }),
        ];
        let asc: QueryState = QueryState::default().with_sort("lang", Some(SortOrder::Asc));
        assert_eq!(
            titles(&simulate(&items, &asc, &[])),
            vec!["second", "fourth", "first", "third"]
        );

        let desc = asc.with_sort("lang", Some(SortOrder::Desc));
        assert_eq!(
            titles(&simulate(&items, &desc, &[])),
            vec!["first", "third", "second", "fourth"]
        );
    }

    #[test]
    fn test_sort_places_missing_fields_last_when_ascending() {
        let items = vec![
            json!({ "title": "no date" }),
            json!({ "title": "late", "date": "2024-05-01" }),
            json!({ "title": "early", "date": "2023-01-01" }),
        ];
        let params: QueryState = QueryState::default().with_sort("date", None);
        assert_eq!(titles(&simulate(&items, &params, &[])), vec!["early", "late", "no date"]);
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    enum DocFilter {
        Language,
        Published,
    }

    impl FilterKey for DocFilter {
        fn field(&self) -> &'static str {
            match self {
                DocFilter::Language => "language",
                DocFilter::Published => "published",
            }
        }

        fn all() -> &'static [Self] {
            &[DocFilter::Language, DocFilter::Published]
        }
    }

    #[test]
    fn test_filters_are_anded_and_missing_fields_do_not_match() {
        let items = vec![
            json!({ "title": "a", "language": "en", "published": true }),
            json!({ "title": "b", "language": "en", "published": false }),
            json!({ "title": "c", "language": "fr", "published": true }),
            json!({ "title": "d", "published": true }),
        ];

        let params = QueryState::default().with_filter(DocFilter::Language, "en");
        assert_eq!(titles(&simulate(&items, &params, &[])), vec!["a", "b"]);

        let params = params.with_filter(DocFilter::Published, true);
        assert_eq!(titles(&simulate(&items, &params, &[])), vec!["a"]);
        assert_eq!(simulate(&items, &params, &[]).pagination.total(), 1);
    }

    #[test]
    fn test_filter_total_counts_before_pagination() {
        let items: Vec<Value> = (0..9)
            .map(|i| json!({ "title": format!("t{i}"), "language": if i < 6 { "en" } else { "de" } }))
            .collect();
        let params = QueryState::default()
            .with_filter(DocFilter::Language, "en")
            .with_limit(4)
            .with_page(2);

        let result = simulate(&items, &params, &[]);
        assert_eq!(titles(&result), vec!["t4", "t5"]);
        assert_eq!(result.pagination.total(), 6);
    }

    proptest! {
        #[test]
        fn prop_sort_is_deterministic_and_stable(keys in prop::collection::vec(0i64..5, 0..60)) {
            let items: Vec<Value> = keys
                .iter()
                .enumerate()
                .map(|(idx, key)| json!({ "idx": idx, "key": key }))
                .collect();
            let params: QueryState = QueryState::default()
                .with_limit(1000)
                .with_sort("key", Some(SortOrder::Asc));

            let first = simulate(&items, &params, &[]);
            let second = simulate(&items, &params, &[]);
            prop_assert_eq!(&first.data, &second.data);

            for pair in first.data.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a["key"].as_i64() <= b["key"].as_i64());
                if a["key"] == b["key"] {
                    prop_assert!(a["idx"].as_u64() < b["idx"].as_u64());
                }
            }
        }

        #[test]
        fn prop_page_sizes_partition_total(count in 0usize..80, limit in 1u32..15) {
            let items: Vec<Value> = (0..count).map(|i| json!({ "i": i })).collect();
            let base: QueryState = QueryState::default().with_limit(limit);
            let pages = simulate(&items, &base, &[]).pagination.total_pages();

            let mut seen = 0usize;
            for page in 1..=pages {
                let result = simulate(&items, &base.with_page(page as u32), &[]);
                prop_assert!(result.data.len() <= limit as usize);
                seen += result.data.len();
            }
            prop_assert_eq!(seen, count);
        }
    }
}
