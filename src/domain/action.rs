//! Action - Row Actions and Their Confirmation Requests
//!
//! A row action describes a mutation the user can run against one record. Before it
//! runs, it is turned into an [`ActionRequest`] bound to that record.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::record::{resolve_path, Record};
use crate::error::{Error, Result};
use crate::utils::format::format_cell;

/// HTTP method used by a mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
}

/// Input kind of a confirmation field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Textarea,
    Switch,
    Number,
}

/// A value the user fills in before confirming an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ActionField {
    /// Body key the value is sent under
    pub name: String,
    /// Label shown next to the input
    pub label: String,
    #[serde(default, rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

/// Per-row action descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RowAction {
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    /// Mutation endpoint
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
    /// Body template. Strings starting with `!` are literals, other strings are
    /// dotted paths into the row, non-strings are sent as-is.
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub fields: Vec<ActionField>,
    /// Confirmation prompt; `[field]` is replaced by the row's value
    #[serde(default)]
    pub confirm_text: Option<String>,
    /// Query keys to refresh once the mutation succeeds
    #[serde(default)]
    pub related_query_keys: Vec<String>,
}

impl RowAction {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            color: None,
            url: url.into(),
            method: HttpMethod::default(),
            data: Map::new(),
            fields: Vec::new(),
            confirm_text: None,
            related_query_keys: Vec::new(),
        }
    }

    /// Add a body entry
    pub fn with_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Set the confirmation prompt
    pub fn confirm(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = Some(text.into());
        self
    }

    /// Add a confirmation field
    pub fn field(mut self, field: ActionField) -> Self {
        self.fields.push(field);
        self
    }

    /// Bind this action to a row
    pub fn prepare(&self, row: &Record) -> ActionRequest {
        let row_value = Value::Object(row.clone());

        let body = self
            .data
            .iter()
            .filter_map(|(key, template)| {
                let value = match template {
                    Value::String(s) => match s.strip_prefix('!') {
                        Some(literal) => Value::String(literal.to_string()),
                        None => resolve_path(&row_value, s)?.clone(),
                    },
                    other => other.clone(),
                };
                Some((key.clone(), value))
            })
            .collect();

        let prompt = self
            .confirm_text
            .as_deref()
            .map(|text| fill_placeholders(text, &row_value))
            .unwrap_or_else(|| format!("Are you sure you want to run '{}'?", self.label));

        ActionRequest {
            id: Uuid::new_v4(),
            label: self.label.clone(),
            url: self.url.clone(),
            method: self.method,
            body,
            prompt,
            fields: self.fields.clone(),
            related_query_keys: self.related_query_keys.clone(),
        }
    }
}

/// Replace every `[path]` in `text` by the formatted value found in `row`
fn fill_placeholders(text: &str, row: &Value) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            break;
        };
        out.push_str(&rest[..open]);
        let path = &rest[open + 1..close];
        match resolve_path(row, path) {
            Some(value) => out.push_str(&format_cell(value)),
            None => out.push_str(&rest[open..=close]),
        }
        rest = &rest[close + 1..];
    }
    out.push_str(rest);
    out
}

/// An action bound to a row, awaiting confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    pub id: Uuid,
    pub label: String,
    pub url: String,
    pub method: HttpMethod,
    /// Body resolved from the row
    pub body: Map<String, Value>,
    /// Confirmation prompt with placeholders filled
    pub prompt: String,
    pub fields: Vec<ActionField>,
    pub related_query_keys: Vec<String>,
}

impl ActionRequest {
    /// Merge user input into the body, then check required fields
    pub fn with_inputs(mut self, inputs: Map<String, Value>) -> Result<Self> {
        self.body.extend(inputs);
        self.ensure_required()?;
        Ok(self)
    }

    /// Every required field must have a value in the body.
    ///
    /// Empty strings and `null` count as missing.
    pub fn ensure_required(&self) -> Result<()> {
        let missing = self.fields.iter().filter(|f| f.required).find(|field| {
            match self.body.get(&field.name) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            }
        });
        match missing {
            Some(field) => Err(Error::MissingField {
                field: field.name.clone(),
            }),
            None => Ok(()),
        }
    }
}
