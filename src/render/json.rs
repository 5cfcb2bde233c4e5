//! JSON rendering for normalized output.

use crate::error::{Error, Result};
use serde::Serialize;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a value (typically normalized blocks or an article record).
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::normalize_body;
    use serde_json::json;

    #[test]
    fn test_to_json_pretty() {
        let blocks = normalize_body(&[json!({"type": "paragraph", "content": "Hello"})]);

        let json = to_json(&blocks, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"paragraph\""));
        assert!(json.contains("Hello"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact_keeps_key_order() {
        let blocks = normalize_body(&[json!({
            "children": [],
            "content": "x",
            "id": "b1",
            "type": "paragraph"
        })]);

        let json = to_json(&blocks, JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"[{"type":"paragraph","id":"b1","content":[{"type":"text","text":"x"}]}]"#
        );
    }
}
