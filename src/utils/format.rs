//! Format - Cell Formatting Utilities

use chrono::NaiveDate;
use serde_json::Value;

/// Render a JSON value as cell text.
///
/// Strings verbatim, numbers and booleans as text, `null` as empty, arrays of
/// scalars joined with `", "`, anything else as compact JSON.
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) if items.iter().all(is_scalar) => items
            .iter()
            .map(format_cell)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Truncate a string to max chars with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}

/// Build an export file name such as `Users-2026-10-16.csv`
pub fn export_file_name(title: &str, date: NaiveDate, extension: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    format!("{}-{}.{}", stem, date.format("%Y-%m-%d"), extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(&Value::Null), "");
        assert_eq!(format_cell(&json!("x")), "x");
        assert_eq!(format_cell(&json!(true)), "true");
        assert_eq!(format_cell(&json!(1.5)), "1.5");
        assert_eq!(format_cell(&json!(["a", 2, null])), "a, 2, ");
        assert_eq!(format_cell(&json!([{ "a": 1 }])), r#"[{"a":1}]"#);
        assert_eq!(format_cell(&json!({ "b": 2, "a": 1 })), r#"{"b":2,"a":1}"#);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("héllo", 2), "hé");
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date");
        assert_eq!(export_file_name("Mailbox Report", date, "csv"), "Mailbox-Report-2026-10-16.csv");
    }
}
