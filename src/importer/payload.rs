// ==========================================
// Zuidplas Logistics - Order Payload Reader
// ==========================================
// Accepts the ERP dump as a top-level array or as { "data": [...] }
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde_json::Value;
use std::path::Path;

/// Read raw order rows from a JSON file.
pub fn rows_from_file(path: &Path) -> ImportResult<Vec<Value>> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let raw = std::fs::read_to_string(path)?;
    rows_from_json(&raw)
}

pub fn rows_from_json(raw: &str) -> ImportResult<Vec<Value>> {
    let payload: Value = serde_json::from_str(raw)?;
    rows_from_value(payload)
}

/// Unwrap the payload into its row records; every row must be an object.
pub fn rows_from_value(payload: Value) -> ImportResult<Vec<Value>> {
    let rows = match payload {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(rows)) => rows,
            Some(other) => {
                return Err(ImportError::InvalidPayload(format!(
                    "'data' must be an array, found {}",
                    kind_of(&other)
                )))
            }
            None => {
                return Err(ImportError::InvalidPayload(
                    "expected an array of rows or an object with a 'data' array".to_string(),
                ))
            }
        },
        other => {
            return Err(ImportError::InvalidPayload(format!(
                "expected an array of rows, found {}",
                kind_of(&other)
            )))
        }
    };

    if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| !r.is_object()) {
        return Err(ImportError::InvalidRow {
            row: index + 1,
            found: kind_of(row).to_string(),
        });
    }

    Ok(rows)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_top_level_array() {
        let rows = rows_from_json(r#"[{ "id": 1 }, { "id": 2 }]"#).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_data_wrapper() {
        let rows = rows_from_json(r#"{ "data": [{ "id": 1 }], "meta": { "total": 1 } }"#).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(rows_from_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_scalar_payload_rejected() {
        assert!(matches!(rows_from_json("42"), Err(ImportError::InvalidPayload(_))));
        assert!(matches!(
            rows_from_json(r#"{ "rows": [] }"#),
            Err(ImportError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_non_object_row_rejected() {
        let err = rows_from_json(r#"[{ "id": 1 }, "oops"]"#).unwrap_err();
        assert!(matches!(err, ImportError::InvalidRow { row: 2, .. }));
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(rows_from_json("[{"), Err(ImportError::JsonParseError(_))));
    }

    #[test]
    fn test_rows_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "data": [{{ "id": 7 }}] }}"#).unwrap();
        let rows = rows_from_file(file.path()).unwrap();
        assert_eq!(rows[0]["id"], 7);

        let missing = rows_from_file(Path::new("/nonexistent/orders.json"));
        assert!(matches!(missing, Err(ImportError::FileNotFound(_))));
    }
}
