//! Grid Configuration
//!
//! Everything a caller can configure on a grid, loadable from TOML.

use std::collections::BTreeMap;
use std::path::Path;

use schemars::{JsonSchema, Schema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::components::data_table::{default_visibility, ColumnSpec, OffCanvasConfig, VisibilityMap};
use crate::constants::{DEFAULT_INCORRECT_DATA_MESSAGE, DEFAULT_TITLE};
use crate::domain::{PageRequest, RowAction};
use crate::error::{Error, Result};
use crate::services::{ClientConfig, QueryKey};

/// Remote collection the grid reads from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ApiConfig {
    /// Collection endpoint
    pub url: String,
    /// Static request parameters
    #[serde(default)]
    pub data: Map<String, Value>,
    /// Dotted key-path to the records inside each page; empty means the whole page
    #[serde(default)]
    pub data_key: String,
}

/// Grid configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GridConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Cache identity; the title is used when absent
    #[serde(default)]
    pub query_key: Option<String>,
    #[serde(default)]
    pub api: Option<ApiConfig>,
    #[serde(default)]
    pub client: ClientConfig,
    /// Initial show/hide state
    #[serde(default = "default_column_visibility")]
    pub column_visibility: BTreeMap<String, bool>,
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub simple_columns: Vec<String>,
    #[serde(default)]
    pub actions: Vec<RowAction>,
    /// Detail side-panel; disabled when absent
    #[serde(default)]
    pub off_canvas: Option<OffCanvasConfig>,
    #[serde(default = "default_true")]
    pub export_enabled: bool,
    /// Bare table without toolbar
    #[serde(default)]
    pub simple: bool,
    /// Static fallback data used when no endpoint is configured
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default = "default_incorrect_data_message")]
    pub incorrect_data_message: String,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_true() -> bool {
    true
}

fn default_incorrect_data_message() -> String {
    DEFAULT_INCORRECT_DATA_MESSAGE.to_string()
}

fn default_column_visibility() -> BTreeMap<String, bool> {
    default_visibility().into_iter().collect()
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            query_key: None,
            api: None,
            client: ClientConfig::default(),
            column_visibility: default_column_visibility(),
            columns: Vec::new(),
            simple_columns: Vec::new(),
            actions: Vec::new(),
            off_canvas: None,
            export_enabled: true,
            simple: false,
            data: None,
            incorrect_data_message: default_incorrect_data_message(),
        }
    }
}

impl GridConfig {
    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: GridConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading grid config: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Reject configurations that cannot produce a grid
    pub fn validate(&self) -> Result<()> {
        if let Some(api) = &self.api {
            if api.url.trim().is_empty() {
                return Err(Error::Invalid {
                    message: "api.url must not be empty".into(),
                });
            }
        }
        for action in &self.actions {
            if action.url.trim().is_empty() {
                return Err(Error::Invalid {
                    message: format!("action '{}' has no url", action.label),
                });
            }
        }
        Ok(())
    }

    /// Query key, falling back to the title
    pub fn query_key(&self) -> QueryKey {
        QueryKey::from(self.query_key.clone().unwrap_or_else(|| self.title.clone()))
    }

    /// First-page request, when an endpoint is configured
    pub fn first_request(&self) -> Option<PageRequest> {
        self.api
            .as_ref()
            .map(|api| PageRequest::new(api.url.clone(), api.data.clone()))
    }

    pub fn data_key(&self) -> &str {
        self.api.as_ref().map(|api| api.data_key.as_str()).unwrap_or("")
    }

    pub fn initial_visibility(&self) -> VisibilityMap {
        self.column_visibility
            .iter()
            .map(|(id, visible)| (id.clone(), *visible))
            .collect()
    }

    /// JSON schema of the configuration file
    pub fn json_schema() -> Schema {
        schemars::schema_for!(GridConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GridConfig::from_toml("").expect("empty config");
        assert_eq!(config.title, "Report");
        assert_eq!(config.query_key(), QueryKey::from("Report"));
        assert!(config.export_enabled);
        assert_eq!(config.column_visibility.get("ETag"), Some(&false));
        assert_eq!(config.initial_visibility(), default_visibility());
        assert_eq!(config.incorrect_data_message, "Data not in correct format");
        assert!(config.first_request().is_none());
        assert_eq!(config.data_key(), "");
    }

    #[test]
    fn test_full_config() {
        let config = GridConfig::from_toml(
            r#"
            title = "Users"
            query_key = "users-contoso"
            simple_columns = ["displayName", "mail"]

            [api]
            url = "/api/ListUsers"
            data_key = "Results"
            data = { tenantFilter = "contoso", top = 999 }

            [client]
            base_url = "https://console.example.com"

            [column_visibility]
            id = false

            [[columns]]
            header = "Display Name"
            id = "displayName"

            [off_canvas]
            extended_info_fields = [{ name = "mail" }]

            [[actions]]
            label = "Disable"
            url = "/api/ExecDisableUser"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.query_key(), QueryKey::from("users-contoso"));
        let request = config.first_request().expect("request");
        assert_eq!(request.url, "/api/ListUsers");
        assert_eq!(request.params.get("top"), Some(&serde_json::json!(999)));
        assert_eq!(config.data_key(), "Results");
        assert_eq!(config.columns[0].identifier(), "displayName");
        assert_eq!(config.client.timeout_secs, 30);
        assert_eq!(config.initial_visibility().len(), 1);
        assert!(config.off_canvas.is_some());
    }

    #[test]
    fn test_rejects_empty_url() {
        let err = GridConfig::from_toml("[api]\nurl = \"\"\n").expect_err("invalid");
        assert!(matches!(err, Error::Invalid { .. }));
    }

    #[test]
    fn test_schema_mentions_fields() {
        let schema = serde_json::to_value(GridConfig::json_schema()).expect("schema");
        let properties = schema.get("properties").expect("properties");
        assert!(properties.get("simple_columns").is_some());
        assert!(properties.get("api").is_some());
    }
}
