//! ActionForm - Confirmation Inputs for a Row Action
//!
//! Holds the text the user typed for each declared field while the confirmation
//! is open, and turns it into typed inputs on submit.

use serde_json::{Map, Number, Value};

use crate::domain::{ActionField, ActionRequest, FieldKind};
use crate::error::Result;

/// Pending row action plus the raw value of each of its fields
#[derive(Debug, Clone, PartialEq)]
pub struct ActionForm {
    request: ActionRequest,
    values: Vec<String>,
    active: Option<usize>,
}

impl ActionForm {
    pub fn new(request: ActionRequest) -> Self {
        let values = request
            .fields
            .iter()
            .map(|field| match field.kind {
                FieldKind::Switch => "false".to_string(),
                _ => String::new(),
            })
            .collect();
        let active = request
            .fields
            .iter()
            .position(|field| field.kind != FieldKind::Switch);
        Self {
            request,
            values,
            active,
        }
    }

    pub fn request(&self) -> &ActionRequest {
        &self.request
    }

    pub fn fields(&self) -> impl Iterator<Item = (usize, &ActionField, &str)> {
        self.request
            .fields
            .iter()
            .zip(self.values.iter())
            .enumerate()
            .map(|(index, (field, value))| (index, field, value.as_str()))
    }

    /// Field receiving typed characters
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Click on a field: switches flip, other kinds take keyboard focus
    pub fn select(&mut self, index: usize) {
        let Some(field) = self.request.fields.get(index) else {
            return;
        };
        if field.kind == FieldKind::Switch {
            let on = self.values[index] == "true";
            self.values[index] = (!on).to_string();
        } else {
            self.active = Some(index);
        }
    }

    pub fn type_text(&mut self, text: &str) {
        if let Some(value) = self.active.and_then(|i| self.values.get_mut(i)) {
            value.push_str(text);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(value) = self.active.and_then(|i| self.values.get_mut(i)) {
            value.pop();
        }
    }

    /// Typed inputs; blank entries are left out so required checks see them as missing
    pub fn inputs(&self) -> Map<String, Value> {
        self.request
            .fields
            .iter()
            .zip(self.values.iter())
            .filter(|(_, raw)| !raw.trim().is_empty())
            .map(|(field, raw)| {
                let value = match field.kind {
                    FieldKind::Switch => Value::Bool(raw == "true"),
                    FieldKind::Number => raw
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .and_then(Number::from_f64)
                        .map(Value::Number)
                        .unwrap_or_else(|| Value::String(raw.clone())),
                    FieldKind::Text | FieldKind::Textarea => Value::String(raw.clone()),
                };
                (field.name.clone(), value)
            })
            .collect()
    }

    /// Request ready for execution, or the first unfilled required field
    pub fn submit(&self) -> Result<ActionRequest> {
        self.request.clone().with_inputs(self.inputs())
    }
}
