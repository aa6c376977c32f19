use serde_json::Value;

const INDENT: &str = "        ";

/// Account name shifted right by one indent per classification level, so a
/// chart reads as a tree: `1.1.01` sits two levels below `1`.
pub fn indented_name(name: &str, classification: &str) -> String {
    let levels = classification.matches('.').count();
    format!("{}{name}", INDENT.repeat(levels))
}

/// Table cell text for a stored extract value.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
