//! Data source adapters and the wire form of a query.

use pagequery::testing::MockSource;
use pagequery::{
    DataSource, Error, ErrorKind, PaginatedResult, PaginationMeta, QueryController,
    QueryOutcome, QueryState, source_fn,
};

use crate::common::init_tracing;

/// A REST-style adapter built from an async function
#[tokio::test]
async fn test_rest_style_adapter() {
    init_tracing();
    let source = source_fn(|params: QueryState| async move {
        // Stand-in for an HTTP call answered with 503
        if params.search == "outage" {
            return Err(Error::new(ErrorKind::from_http_status(503), "service unavailable"));
        }
        let query = params.to_query_string();
        Ok(PaginatedResult::new(
            vec![query],
            PaginationMeta::new(1, params.page.get(), params.limit.get()),
        ))
    });
    let controller = QueryController::builder(source).auto_fetch(false).build().unwrap();

    controller.set_sort("title", None);
    controller.set_search("grace");
    assert!(controller.execute_query(None).await.is_applied());
    assert_eq!(
        controller.data().to_vec(),
        vec!["page=1&limit=20&sortBy=title&sortOrder=asc&search=grace".to_string()]
    );

    controller.set_search("outage");
    let outcome = controller.execute_query(None).await;
    assert_eq!(outcome, QueryOutcome::Failed(ErrorKind::Unavailable));
    assert!(controller.error().unwrap().contains("service unavailable"));
}

/// Two refreshes send identical parameters
#[tokio::test]
async fn test_refresh_sends_identical_params() {
    let mock: MockSource<u32> = MockSource::with_items((1..=3).collect());
    let controller = QueryController::builder(mock.clone())
        .auto_fetch(false)
        .build()
        .unwrap();

    controller.set_search("psalm");
    controller.refresh();
    controller.settled().await;
    controller.refresh();
    controller.settled().await;

    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
    assert_eq!(
        serde_json::to_string(&calls[0]).unwrap(),
        serde_json::to_string(&calls[1]).unwrap()
    );
}

/// Sources compose behind `Arc<dyn DataSource>`
#[tokio::test]
async fn test_shared_trait_object() {
    let mock: MockSource<u32> = MockSource::with_items(vec![7]);
    let shared: std::sync::Arc<dyn DataSource<u32>> = std::sync::Arc::new(mock);

    let page = shared.fetch(QueryState::default()).await.unwrap();
    assert_eq!(page.data, vec![7]);
}
