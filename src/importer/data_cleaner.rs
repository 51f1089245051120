// ==========================================
// Zuidplas Logistics - Data Cleaner
// ==========================================
// Responsibility: NULL normalisation / numeric and time coercion
// of loosely typed JSON values coming from the ERP
// ==========================================

use crate::domain::route::hhmm;
use chrono::{DateTime, NaiveDateTime, NaiveTime};
use serde_json::Value;

pub struct DataCleaner;

impl DataCleaner {
    /// Blank strings become None.
    pub fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// True for null, blank strings and empty arrays/objects.
    pub fn is_blank(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
            _ => false,
        }
    }

    /// Strings and numbers as trimmed text; ids arrive as either.
    pub fn text(&self, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => self.normalize_null(Some(s.clone())),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Numbers, or strings holding a number (comma decimal separator allowed).
    pub fn number(&self, value: &Value) -> Option<f64> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|v| v.is_finite())
    }

    pub fn integer(&self, value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.is_finite())
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Time of day from "HH:MM", "HH:MM:SS", a naive date-time or RFC 3339.
    pub fn time_of_day(&self, value: &Value) -> Option<NaiveTime> {
        let raw = self.text(value)?;
        if let Some(time) = hhmm::parse(&raw) {
            return Some(time);
        }
        for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&raw, format) {
                return Some(dt.time());
            }
        }
        DateTime::parse_from_rfc3339(&raw).ok().map(|dt| dt.time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("   ".to_string())), None);
        assert_eq!(cleaner.normalize_null(Some(" x ".to_string())), Some("x".to_string()));
        assert_eq!(cleaner.normalize_null(None), None);
    }

    #[test]
    fn test_text_from_number_and_string() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.text(&json!(1234)), Some("1234".to_string()));
        assert_eq!(cleaner.text(&json!(" A1 ")), Some("A1".to_string()));
        assert_eq!(cleaner.text(&json!("")), None);
        assert_eq!(cleaner.text(&json!(null)), None);
    }

    #[test]
    fn test_number_coercion() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.number(&json!(12.5)), Some(12.5));
        assert_eq!(cleaner.number(&json!("12,5")), Some(12.5));
        assert_eq!(cleaner.number(&json!(" 40 ")), Some(40.0));
        assert_eq!(cleaner.number(&json!("n/a")), None);
        assert_eq!(cleaner.number(&json!(true)), None);
    }

    #[test]
    fn test_integer_coercion() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.integer(&json!(32)), Some(32));
        assert_eq!(cleaner.integer(&json!(32.0)), Some(32));
        assert_eq!(cleaner.integer(&json!("36")), Some(36));
        assert_eq!(cleaner.integer(&json!(32.5)), None);
    }

    #[test]
    fn test_time_of_day_formats() {
        let cleaner = DataCleaner;
        let five_pm = NaiveTime::from_hms_opt(17, 0, 0);
        assert_eq!(cleaner.time_of_day(&json!("17:00")), five_pm);
        assert_eq!(cleaner.time_of_day(&json!("17:00:00")), five_pm);
        assert_eq!(cleaner.time_of_day(&json!("2025-01-10 17:00:00")), five_pm);
        assert_eq!(cleaner.time_of_day(&json!("2025-01-10T17:00:00+01:00")), five_pm);
        assert_eq!(cleaner.time_of_day(&json!("tomorrow")), None);
    }

    #[test]
    fn test_is_blank() {
        let cleaner = DataCleaner;
        assert!(cleaner.is_blank(&json!(null)));
        assert!(cleaner.is_blank(&json!("  ")));
        assert!(cleaner.is_blank(&json!([])));
        assert!(!cleaner.is_blank(&json!(0)));
    }
}
