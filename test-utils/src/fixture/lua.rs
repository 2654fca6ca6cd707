//! Rendering JSON values as Lua table constructors.

use serde_json::Value;

/// Renders `value` as a Lua expression.
///
/// Objects become keyed table constructors with every key bracket-quoted, arrays become
/// sequence constructors, and `null` becomes `nil`.
///
/// # Example
///
/// ```rust,ignore
/// let lua = table(&json!({ "id": "1", "tags": ["a"] }));
/// assert_eq!(lua, r#"{ ["id"] = "1", ["tags"] = { "a" } }"#);
/// ```
pub fn table(value: &Value) -> String {
    match value {
        Value::Null => "nil".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => quote(text),
        Value::Array(items) if items.is_empty() => "{}".to_string(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(table).collect();
            format!("{{ {} }}", items.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let fields: Vec<String> = map
                .iter()
                .map(|(key, item)| format!("[{}] = {}", quote(key), table(item)))
                .collect();
            format!("{{ {} }}", fields.join(", "))
        }
    }
}

/// Quotes a string as a Lua literal, escaping as JSON does.
fn quote(text: &str) -> String {
    Value::from(text).to_string()
}
