//! DataGrid end to end against a mock endpoint

use std::time::{Duration, Instant};

use console_grid::config::{ApiConfig, GridConfig};
use console_grid::domain::{ActionField, FieldKind, RowAction};
use console_grid::Error;
use console_grid::services::{block_on, ClientConfig, MutationClient};
use console_grid::state::{DataGrid, FetchStatus};
use mockito::Matcher;
use rstest::rstest;
use serde_json::{json, Map, Value};

fn settle(grid: &mut DataGrid) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while grid.is_fetching() && Instant::now() < deadline {
        grid.poll_timeout(Duration::from_millis(50));
    }
}

fn config_for(server: &mockito::ServerGuard) -> GridConfig {
    GridConfig {
        title: "Mailboxes".into(),
        api: Some(ApiConfig {
            url: "/api/ListMailboxes".into(),
            data: json!({ "tenantFilter": "contoso" })
                .as_object()
                .cloned()
                .unwrap_or_default(),
            data_key: "Results".into(),
        }),
        client: ClientConfig {
            base_url: Some(server.url()),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_grid_collects_every_page() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/ListMailboxes")
        .match_query(Matcher::Regex("^tenantFilter=contoso$".into()))
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"Results":[{"id":"a","UPN":"a@contoso.com"}],
                "Metadata":{"nextLink":"next-1","QueueMessage":"Still loading"}}"#,
        )
        .expect(1)
        .create();
    server
        .mock("GET", "/api/ListMailboxes")
        .match_query(Matcher::UrlEncoded("nextLink".into(), "next-1".into()))
        .with_header("content-type", "application/json")
        .with_body(r#"{"Results":[{"id":"b","UPN":"b@contoso.com","Size":12}]}"#)
        .expect(1)
        .create();

    let mut grid = DataGrid::with_http(config_for(&server)).expect("grid");
    settle(&mut grid);

    assert_eq!(grid.status(), FetchStatus::Success);
    assert_eq!(grid.records().len(), 2);

    let ids: Vec<&str> = grid.columns().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["id", "UPN", "Size"]);

    let view = grid.view();
    assert!(view.error.is_none());
    assert!(!view.show_skeleton);
    assert_eq!(view.empty_message.as_deref(), Some("Still loading"));
}

#[rstest]
#[case(404)]
#[case(500)]
fn test_first_page_error_shows_banner(#[case] status: usize) {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/ListMailboxes")
        .match_query(Matcher::Any)
        .with_status(status)
        .with_body("nope")
        .create();

    let mut grid = DataGrid::with_http(config_for(&server)).expect("grid");
    settle(&mut grid);

    assert_eq!(grid.status(), FetchStatus::Error);
    let view = grid.view();
    let banner = view.error.expect("banner");
    assert!(banner.message.starts_with("Error Loading data: "));
    assert!(banner.message.contains(&format!("returned {status}")));
    assert!(!banner.during_continuation);
    assert!(view.rows.all().is_empty());
}

#[test]
fn test_non_array_data_is_incorrect_format() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/ListMailboxes")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body(r#"{"Results":"not a table"}"#)
        .create();

    let mut grid = DataGrid::with_http(config_for(&server)).expect("grid");
    settle(&mut grid);

    let view = grid.view();
    assert!(view.incorrect_format.is_some());
    assert!(view.rows.all().is_empty());
}

#[test]
fn test_row_action_posts_row_values() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/ExecResetPass")
        .match_body(Matcher::Json(json!({ "ID": "a@contoso.com", "Mode": "reset" })))
        .with_header("content-type", "application/json")
        .with_body(r#"{"Results":"Password reset for a@contoso.com"}"#)
        .expect(1)
        .create();

    let action = RowAction::new("Reset Password", "/api/ExecResetPass")
        .with_data("ID", json!("UPN"))
        .with_data("Mode", json!("!reset"));
    let row = json!({ "id": "a", "UPN": "a@contoso.com" });
    let Value::Object(row) = row else { unreachable!() };
    let request = action.prepare(&row);

    let client = MutationClient::new(ClientConfig {
        base_url: Some(server.url()),
        ..Default::default()
    })
    .expect("client");
    let outcome = block_on(async move { client.execute(&request).await }).expect("outcome");

    mock.assert();
    assert_eq!(outcome.message, "Password reset for a@contoso.com");
}

#[test]
fn test_row_action_requires_field_inputs() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/ExecNote")
        .match_body(Matcher::Json(json!({ "ID": "a", "Note": "moving desks" })))
        .with_header("content-type", "application/json")
        .with_body(r#"{"Results":"done"}"#)
        .expect(1)
        .create();

    let action = RowAction::new("Add note", "/api/ExecNote")
        .with_data("ID", json!("id"))
        .field(ActionField {
            name: "Note".into(),
            label: "Note".into(),
            kind: FieldKind::Textarea,
            required: true,
        });
    let Value::Object(row) = json!({ "id": "a" }) else { unreachable!() };
    let request = action.prepare(&row);

    let client = MutationClient::new(ClientConfig {
        base_url: Some(server.url()),
        ..Default::default()
    })
    .expect("client");

    let unfilled = request.clone();
    let refused = block_on({
        let client = client.clone();
        async move { client.execute(&unfilled).await }
    });
    assert!(matches!(refused, Err(Error::MissingField { field }) if field == "Note"));

    let mut inputs = Map::new();
    inputs.insert("Note".into(), json!("moving desks"));
    let filled = request.with_inputs(inputs).expect("inputs");
    let outcome = block_on(async move { client.execute(&filled).await }).expect("outcome");

    mock.assert();
    assert_eq!(outcome.message, "done");
}
