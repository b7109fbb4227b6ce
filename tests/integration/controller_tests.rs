//! Controller integration tests against the in-memory document library.

use std::time::Duration;

use pagequery::models::{Document, DocumentFilter};
use pagequery::{
    ErrorKind, InMemorySource, LoadState, PaginationMeta, QueryController, QueryOutcome,
    QueryOverrides, SortOrder,
};

use crate::common::{document_source, documents};

/// The documents screen on first load
#[tokio::test]
async fn test_first_page_on_mount() {
    let controller = QueryController::builder(document_source())
        .build()
        .expect("controller should build inside a runtime");

    let state = controller.settled().await;
    assert_eq!(state.status, LoadState::Success);
    assert_eq!(state.data.len(), 20);
    assert_eq!(state.pagination, PaginationMeta::new(25, 1, 20));
}

/// Typing "faith" into the search box, then paging forward
#[tokio::test]
async fn test_search_scenario() {
    let controller = QueryController::builder(document_source())
        .default_limit(5)
        .build()
        .unwrap();
    controller.settled().await;

    controller.set_search("faith");
    let first = controller.settled().await;
    assert_eq!(first.data.len(), 5);
    assert_eq!(first.pagination.total(), 7);
    assert_eq!(first.pagination.total_pages(), 2);
    assert!(first.pagination.has_next());
    assert!(!first.pagination.has_prev());

    controller.set_page(2);
    let second = controller.settled().await;
    assert_eq!(second.data.len(), 2);
    assert!(!second.pagination.has_next());
    assert!(second.pagination.has_prev());

    controller.set_page(10);
    let beyond = controller.settled().await;
    assert!(beyond.data.is_empty());
    assert_eq!(beyond.pagination.total(), 7);
    assert_eq!(beyond.pagination.total_pages(), 2);
    assert!(beyond.error.is_none());
}

/// Category and published filters combine with search
#[tokio::test]
async fn test_filters_narrow_results() {
    let controller = QueryController::builder(document_source()).build().unwrap();

    controller.set_filter(DocumentFilter::Category, "sermon");
    let sermons = controller.settled().await;
    assert_eq!(sermons.pagination.total(), 9);
    assert!(sermons.data.iter().all(|d| d.category == "sermon"));

    controller.set_filter(DocumentFilter::Published, false);
    let drafts = controller.settled().await;
    assert!(drafts.data.iter().all(|d| d.category == "sermon" && !d.published));

    controller.clear_filters();
    let all = controller.settled().await;
    assert_eq!(all.pagination.total(), 25);
}

/// Clicking the title column header twice
#[tokio::test]
async fn test_sort_by_column() {
    let controller = QueryController::builder(document_source()).build().unwrap();

    controller.set_sort("created_at", None);
    let ascending = controller.settled().await;
    assert_eq!(ascending.data.first().map(|d| d.id), Some(1));

    controller.set_sort("created_at", None);
    let descending = controller.settled().await;
    assert_eq!(descending.query.sort_order, SortOrder::Desc);
    assert_eq!(descending.data.first().map(|d| d.id), Some(25));
}

/// Deleting a document, then reloading the list from the settle callback
#[tokio::test]
async fn test_refresh_after_delete() {
    let source = document_source();
    let controller = QueryController::builder(source.clone()).build().unwrap();
    assert_eq!(controller.settled().await.pagination.total(), 25);

    let removed = source.retain(|d| d.id != 1);
    assert_eq!(removed, 1);
    controller.refresh();

    let state = controller.settled().await;
    assert_eq!(state.pagination.total(), 24);
    assert!(state.data.iter().all(|d| d.id != 1));
}

/// A backend slower than the configured ceiling
#[tokio::test(start_paused = true)]
async fn test_slow_backend_times_out() {
    let source = document_source().with_latency(Duration::from_secs(5));
    let controller = QueryController::builder(source)
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let state = controller.settled().await;
    assert_eq!(state.error_kind, Some(ErrorKind::Timeout));
    assert!(state.data.is_empty());
    assert_eq!(state.pagination, PaginationMeta::empty(state.query.limit));
}

/// Typing quickly: only the last keystroke's results are shown
#[tokio::test(start_paused = true)]
async fn test_rapid_typing_shows_latest_query() {
    let source = document_source().with_latency(Duration::from_millis(200));
    let controller = QueryController::builder(source).build().unwrap();

    controller.set_search("f");
    tokio::time::sleep(Duration::from_millis(50)).await;
    controller.set_search("fa");
    tokio::time::sleep(Duration::from_millis(50)).await;
    controller.set_search("faithful");

    let state = controller.settled().await;
    assert_eq!(state.query.search, "faithful");
    assert_eq!(state.pagination.total(), 2);
    assert!(state.data.iter().all(|d| d.title.starts_with("Faithful")));
}

/// Manual mode: the screen fetches only when asked
#[tokio::test]
async fn test_manual_mode_with_overrides() {
    let source: InMemorySource<Document, DocumentFilter> =
        InMemorySource::with_items(Document::SEARCHABLE_FIELDS, documents());
    let controller = QueryController::builder(source)
        .auto_fetch(false)
        .initial(QueryOverrides::new().limit(10))
        .build()
        .unwrap();
    assert_eq!(controller.state().status, LoadState::Idle);

    let outcome = controller
        .execute_query(Some(
            QueryOverrides::new()
                .page(2)
                .filter(DocumentFilter::Author, "J. Calvin"),
        ))
        .await;

    assert_eq!(outcome, QueryOutcome::Applied);
    let state = controller.state();
    assert_eq!(state.query.page.get(), 2);
    assert_eq!(state.pagination.total(), 12);
    assert_eq!(state.data.len(), 2);
}
