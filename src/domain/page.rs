//! Page - One Paginated API Response

use serde_json::{Map, Value};

use crate::constants::{METADATA_KEY, NEXT_LINK_KEY, QUEUE_MESSAGE_KEY};

/// Pagination metadata carried by a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    /// Whether the server reported more pages
    pub has_more: bool,
    /// Continuation link to send with the next request, when the indicator is a string
    pub next_link: Option<String>,
    /// Status message to show in place of an empty table
    pub queue_message: Option<String>,
}

/// One server response, kept as raw JSON
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    body: Value,
}

impl Page {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    /// Read the `Metadata` object. A page without one has no continuation.
    pub fn metadata(&self) -> PageMetadata {
        let Some(meta) = self.body.get(METADATA_KEY).and_then(Value::as_object) else {
            return PageMetadata::default();
        };

        let (has_more, next_link) = match meta.get(NEXT_LINK_KEY) {
            Some(Value::String(link)) if !link.is_empty() => (true, Some(link.clone())),
            Some(Value::Bool(flag)) => (*flag, None),
            Some(Value::Number(n)) => (n.as_f64().is_some_and(|v| v != 0.0), None),
            _ => (false, None),
        };

        let queue_message = meta
            .get(QUEUE_MESSAGE_KEY)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        PageMetadata {
            has_more,
            next_link,
            queue_message,
        }
    }

    /// Whether another page should be requested after this one
    pub fn has_continuation(&self) -> bool {
        self.metadata().has_more
    }
}

impl From<Value> for Page {
    fn from(body: Value) -> Self {
        Self::new(body)
    }
}

/// A request for one page of a collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRequest {
    /// Collection endpoint
    pub url: String,
    /// Static request parameters
    pub params: Map<String, Value>,
    /// Continuation link from the previous page
    pub next_link: Option<String>,
}

impl PageRequest {
    pub fn new(url: impl Into<String>, params: Map<String, Value>) -> Self {
        Self {
            url: url.into(),
            params,
            next_link: None,
        }
    }

    /// Build the request that follows `page`, or `None` when it was the last one
    pub fn next_after(&self, page: &Page) -> Option<PageRequest> {
        let meta = page.metadata();
        if !meta.has_more {
            return None;
        }
        Some(PageRequest {
            url: self.url.clone(),
            params: self.params.clone(),
            next_link: meta.next_link,
        })
    }

    /// Flatten parameters into query pairs.
    ///
    /// Strings go verbatim, other scalars as their JSON text, nested values as
    /// compact JSON. `null` parameters are dropped.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .params
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((key.clone(), text))
            })
            .collect();

        if let Some(link) = &self.next_link {
            pairs.push((NEXT_LINK_KEY.to_string(), link.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_string_link() {
        let page = Page::new(json!({
            "Results": [],
            "Metadata": { "nextLink": "abc", "QueueMessage": "Still loading" }
        }));
        let meta = page.metadata();
        assert!(meta.has_more);
        assert_eq!(meta.next_link.as_deref(), Some("abc"));
        assert_eq!(meta.queue_message.as_deref(), Some("Still loading"));
    }

    #[test]
    fn test_metadata_falsy_indicators() {
        for body in [
            json!({ "Metadata": { "nextLink": "" } }),
            json!({ "Metadata": { "nextLink": false } }),
            json!({ "Metadata": { "nextLink": null } }),
            json!({ "Metadata": { "nextLink": 0 } }),
            json!({ "Metadata": {} }),
            json!([1, 2, 3]),
        ] {
            assert!(!Page::new(body).has_continuation());
        }
    }

    #[test]
    fn test_metadata_flag_without_link() {
        let page = Page::new(json!({ "Metadata": { "nextLink": true } }));
        let meta = page.metadata();
        assert!(meta.has_more);
        assert!(meta.next_link.is_none());
    }

    #[test]
    fn test_next_request_carries_link() {
        let mut params = Map::new();
        params.insert("tenantFilter".into(), json!("contoso"));
        params.insert("top".into(), json!(100));
        params.insert("skip".into(), Value::Null);
        let request = PageRequest::new("/api/ListUsers", params);

        let page = Page::new(json!({ "Metadata": { "nextLink": "token-2" } }));
        let next = request.next_after(&page).expect("continuation");
        assert_eq!(
            next.query_pairs(),
            vec![
                ("tenantFilter".to_string(), "contoso".to_string()),
                ("top".to_string(), "100".to_string()),
                ("nextLink".to_string(), "token-2".to_string()),
            ]
        );

        let last = Page::new(json!({ "Metadata": {} }));
        assert!(request.next_after(&last).is_none());
    }
}
