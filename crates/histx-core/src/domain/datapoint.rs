use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::UtcInstant;

/// One (timestamp, value) observation for an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datapoint {
    pub ts: UtcInstant,
    /// Opaque scalar state as reported by the backend, numeric or string.
    pub value: Value,
}

impl Datapoint {
    pub fn new(ts: UtcInstant, value: Value) -> Self {
        Self { ts, value }
    }
}

/// Render an opaque scalar for CSV output: numbers and booleans verbatim,
/// strings without surrounding quotes, null as empty.
pub fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Finished export handed to the download sink: exact bytes, declared MIME
/// type, suggested filename (no extension). A failed export never produces
/// one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub content: Vec<u8>,
    pub mime_type: &'static str,
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn scalars_render_without_json_quoting() {
        assert_eq!(render_scalar(&json!(21.5)), "21.5");
        assert_eq!(render_scalar(&json!("ON")), "ON");
        assert_eq!(render_scalar(&json!(true)), "true");
        assert_eq!(render_scalar(&Value::Null), "");
    }
}
