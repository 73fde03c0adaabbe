//! Scalar value formatting in `terraform show` style.

use crate::tree::Value;

/// Renders a leaf value the way Terraform prints it: strings double-quoted
/// with backslashes and quotes escaped, numbers verbatim, and the `true`,
/// `false` and `null` literals.
pub fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => quote(s),
        Value::Number(raw) => raw.clone(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Null => "null".to_string(),
        other => render_compact(other),
    }
}

/// Renders a value on a single line for `old -> new` arrows. Containers
/// (which only appear here when an attribute changes type) collapse to
/// compact JSON.
pub fn render_inline(value: &Value) -> String {
    match value {
        Value::Object(_) | Value::Array(_) => render_compact(value),
        scalar => render_scalar(scalar),
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn render_compact(value: &Value) -> String {
    match value {
        Value::Object(entries) => {
            let inner: Vec<String> = entries
                .iter()
                .map(|(key, value)| format!("{}:{}", quote(key), render_compact(value)))
                .collect();
            format!("{{{}}}", inner.join(","))
        }
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(render_compact).collect();
            format!("[{}]", inner.join(","))
        }
        scalar => render_scalar(scalar),
    }
}
