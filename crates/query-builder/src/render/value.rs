//! Literal formatting. This escaping is the compiler's only injection
//! defense; identifiers are validated upstream and never formatted as
//! values.

use serde_json::Value;

/// Formats a literal for inline inclusion in SQL.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => quote(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => quote(&other.to_string()),
    }
}

/// Formats the element list of an IN/NOT IN clause. A scalar degrades to a
/// single-element list.
pub fn format_list(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => format_value(other),
    }
}

/// LIKE patterns are auto-wrapped in `%...%`.
pub fn format_like(value: &Value) -> String {
    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    quote(&format!("%{raw}%"))
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_are_quoted_and_escaped() {
        assert_eq!(format_value(&json!("O'Brien")), "'O''Brien'");
    }

    #[test]
    fn numbers_and_booleans_render_bare() {
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!(1.5)), "1.5");
        assert_eq!(format_value(&json!(true)), "true");
    }

    #[test]
    fn null_renders_as_sql_null() {
        assert_eq!(format_value(&Value::Null), "NULL");
    }

    #[test]
    fn other_types_fall_back_to_quoted_text() {
        assert_eq!(format_value(&json!({"a": 1})), r#"'{"a":1}'"#);
    }

    #[test]
    fn lists_are_comma_separated() {
        assert_eq!(format_list(&json!(["a", "b'c", 3])), "'a', 'b''c', 3");
    }

    #[test]
    fn like_patterns_are_wrapped() {
        assert_eq!(format_like(&json!("smith")), "'%smith%'");
    }
}
