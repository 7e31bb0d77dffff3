//! Paging against a mock HTTP endpoint

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use console_grid::domain::PageRequest;
use console_grid::services::{ClientConfig, HttpPageSource, Pager, PagerEvent, QueryKey};
use mockito::Matcher;
use serde_json::{json, Map, Value};

fn source_for(server: &mockito::ServerGuard, token: Option<&str>) -> HttpPageSource {
    HttpPageSource::new(ClientConfig {
        base_url: Some(server.url()),
        bearer_token: token.map(str::to_string),
        ..Default::default()
    })
    .expect("client")
}

fn params() -> Map<String, Value> {
    let mut params = Map::new();
    params.insert("tenant".into(), json!("contoso"));
    params
}

fn pager(source: HttpPageSource) -> (Pager<HttpPageSource>, crossbeam_channel::Receiver<PagerEvent>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    let live = Arc::new(AtomicU64::new(1));
    let pager = Pager::new(Arc::new(source), QueryKey::from("users"), 1, live, tx);
    (pager, rx)
}

#[tokio::test]
async fn test_follows_next_link_until_exhausted() {
    let mut server = mockito::Server::new_async().await;

    let first = server
        .mock("GET", "/api/ListUsers")
        .match_query(Matcher::Regex("^tenant=contoso$".into()))
        .match_header("authorization", "Bearer secret")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"Results":[{"id":1},{"id":2}],"Metadata":{"nextLink":"p2"}}"#)
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/api/ListUsers")
        .match_query(Matcher::Regex("nextLink=p2$".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"Results":[{"id":3}],"Metadata":{"nextLink":"p3"}}"#)
        .expect(1)
        .create_async()
        .await;
    let third = server
        .mock("GET", "/api/ListUsers")
        .match_query(Matcher::Regex("nextLink=p3$".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"Results":[{"id":4}],"Metadata":{}}"#)
        .expect(1)
        .create_async()
        .await;

    let (pager, rx) = pager(source_for(&server, Some("secret")));
    let fetched = pager.run(PageRequest::new("/api/ListUsers", params())).await;
    assert_eq!(fetched, 3);

    first.assert_async().await;
    second.assert_async().await;
    third.assert_async().await;

    let events: Vec<PagerEvent> = rx.try_iter().collect();
    assert_eq!(events.len(), 4);
    assert!(matches!(events.last(), Some(PagerEvent::Finished { .. })));
}

#[tokio::test]
async fn test_server_error_on_first_page() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/ListUsers")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .expect(1)
        .create_async()
        .await;

    let (pager, rx) = pager(source_for(&server, None));
    let fetched = pager.run(PageRequest::new("/api/ListUsers", params())).await;
    assert_eq!(fetched, 0);
    mock.assert_async().await;

    match rx.try_recv() {
        Ok(PagerEvent::Failed {
            message,
            during_continuation,
            ..
        }) => {
            assert!(!during_continuation);
            assert!(message.contains("500"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_continuation_failure_keeps_first_page() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/ListUsers")
        .match_query(Matcher::Regex("^tenant=contoso$".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"Results":[{"id":1}],"Metadata":{"nextLink":"p2"}}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/ListUsers")
        .match_query(Matcher::Regex("nextLink=p2$".into()))
        .with_status(502)
        .create_async()
        .await;

    let (pager, rx) = pager(source_for(&server, None));
    assert_eq!(pager.run(PageRequest::new("/api/ListUsers", params())).await, 1);

    let events: Vec<PagerEvent> = rx.try_iter().collect();
    assert!(matches!(events[0], PagerEvent::PageLoaded { .. }));
    assert!(matches!(
        events[1],
        PagerEvent::Failed {
            during_continuation: true,
            ..
        }
    ));
}
