//! Loading grid configuration from disk

use std::io::Write;

use console_grid::components::data_table::ColumnWidth;
use console_grid::config::GridConfig;
use console_grid::domain::HttpMethod;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"
title = "Mailboxes"
simple_columns = ["UPN", "Size"]

[api]
url = "/api/ListMailboxes"
data_key = "Results"
data = {{ tenantFilter = "contoso.onmicrosoft.com" }}

[client]
base_url = "https://console.example.com"

[[columns]]
header = "UPN"
accessor_key = "UPN"
width = {{ fixed = 240.0 }}

[[actions]]
label = "Convert to shared"
url = "/api/ExecConvertMailbox"
data = {{ ID = "UPN" }}
confirm_text = "Convert [UPN]?"
"#
    )
    .expect("write");

    let config = GridConfig::load(file.path()).expect("config");
    assert_eq!(config.title, "Mailboxes");
    assert_eq!(config.query_key().as_str(), "Mailboxes");
    assert_eq!(config.data_key(), "Results");
    assert_eq!(config.simple_columns, vec!["UPN", "Size"]);
    assert_eq!(config.columns[0].width, Some(ColumnWidth::Fixed(240.0)));
    assert_eq!(config.actions[0].method, HttpMethod::Post);

    let request = config.first_request().expect("request");
    assert_eq!(
        request.query_pairs(),
        vec![("tenantFilter".to_string(), "contoso.onmicrosoft.com".to_string())]
    );
}

#[test]
fn test_empty_action_url_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"
[[actions]]
label = "Broken"
url = ""
"#
    )
    .expect("write");

    assert!(GridConfig::load(file.path()).is_err());
}

#[test]
fn test_schema_names_top_level_keys() {
    let schema = serde_json::to_value(GridConfig::json_schema()).expect("schema");
    let properties = &schema["properties"];
    for key in ["title", "api", "columns", "actions", "column_visibility"] {
        assert!(properties.get(key).is_some(), "missing {key}");
    }
}
