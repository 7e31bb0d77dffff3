//! HTTP Client
//!
//! reqwest-backed page source and mutation client.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::pager::PageSource;
use crate::constants::{REQUEST_TIMEOUT_SECS, RESULTS_KEY};
use crate::domain::{ActionRequest, HttpMethod, Page, PageRequest};
use crate::error::{Error, Result};
use crate::utils::format::format_cell;

/// Settings shared by every request the grid makes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClientConfig {
    /// Prefix for relative endpoint URLs
    #[serde(default)]
    pub base_url: Option<String>,
    /// Sent as `Authorization: Bearer ...`
    #[serde(default)]
    pub bearer_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    REQUEST_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            bearer_token: None,
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Join `url` to the base URL unless it is already absolute
    pub fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        match &self.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                url.trim_start_matches('/')
            ),
            None => url.to_string(),
        }
    }
}

/// Thin wrapper holding the reqwest client and its settings
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Read a JSON body, turning non-success statuses into errors
    async fn read_json(url: &str, response: Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<Value>().await?)
    }
}

/// Page source reading collections over HTTP GET
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    http: HttpClient,
}

impl HttpPageSource {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }
}

impl PageSource for HttpPageSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page> {
        let url = self.http.config.absolute_url(&request.url);
        tracing::debug!(url = %url, next_link = ?request.next_link, "GET page");

        let builder = self.http.client.get(&url).query(&request.query_pairs());
        let response = self.http.authorize(builder).send().await?;
        let body = HttpClient::read_json(&url, response).await?;
        Ok(Page::new(body))
    }
}

/// Outcome of a row action
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    /// Server message from `Results`, or a generic success line
    pub message: String,
    pub body: Value,
}

/// Executes confirmed row actions
#[derive(Debug, Clone)]
pub struct MutationClient {
    http: HttpClient,
}

impl MutationClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Send a confirmed action. Requests with unfilled required fields are refused
    /// before anything goes on the wire.
    pub async fn execute(&self, request: &ActionRequest) -> Result<MutationOutcome> {
        request.ensure_required()?;

        let url = self.http.config.absolute_url(&request.url);
        tracing::info!(action = %request.label, id = %request.id, url = %url, "Executing row action");

        let builder = match request.method {
            HttpMethod::Post => self.http.client.post(&url).json(&request.body),
            HttpMethod::Get => {
                let query = PageRequest::new(url.clone(), request.body.clone()).query_pairs();
                self.http.client.get(&url).query(&query)
            }
        };
        let response = self.http.authorize(builder).send().await?;
        let body = HttpClient::read_json(&url, response).await?;

        let message = match body.get(RESULTS_KEY) {
            Some(Value::Array(items)) => items.iter().map(format_cell).collect::<Vec<_>>().join("\n"),
            Some(value) => format_cell(value),
            None => format!("{} completed", request.label),
        };

        Ok(MutationOutcome { message, body })
    }
}
