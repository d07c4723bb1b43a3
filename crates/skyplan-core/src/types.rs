//! Core value types

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A value that can be rendered in a table cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing value, rendered as an empty cell
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// UTF-8 text
    Text(String),
}

impl CellValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Coerce the value to display text. Null renders as the empty string.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Try to interpret the value as a number.
    ///
    /// Text counts as numeric-like when it parses as a float after trimming.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) if v.is_finite() => Some(*v),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Compare two cell values for sorting.
    ///
    /// Numeric comparison when both sides are numeric-like, otherwise
    /// case-insensitive comparison of the display text.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => self
                .to_text()
                .to_lowercase()
                .cmp(&other.to_text().to_lowercase()),
        }
    }

    /// Convert a JSON value into a cell value. Arrays and objects are kept as
    /// their compact JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Bool(b) => CellValue::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => n.as_f64().map(CellValue::Float).unwrap_or_default(),
            },
            serde_json::Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(v) => write!(f, "{}", v),
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(value as i64)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Int(value as i64)
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Int(value as i64)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_renders_empty() {
        assert_eq!(CellValue::Null.to_text(), "");
        assert_eq!(CellValue::from(None::<i64>), CellValue::Null);
    }

    #[test]
    fn test_numeric_like_text() {
        assert_eq!(CellValue::from(" 42 ").as_number(), Some(42.0));
        assert_eq!(CellValue::from("4.5").as_number(), Some(4.5));
        assert_eq!(CellValue::from("N123AB").as_number(), None);
        assert_eq!(CellValue::Bool(true).as_number(), None);
    }

    #[test]
    fn test_compare_numeric_vs_text() {
        // "10" > "9" numerically even though it sorts first lexicographically
        assert_eq!(
            CellValue::from("10").compare(&CellValue::from("9")),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::Int(3).compare(&CellValue::from("3.0")),
            Ordering::Equal
        );
        assert_eq!(
            CellValue::from("alpha").compare(&CellValue::from("Bravo")),
            Ordering::Less
        );
        assert_eq!(
            CellValue::from("ALPHA").compare(&CellValue::from("alpha")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_from_json() {
        assert_eq!(CellValue::from_json(&serde_json::json!(7)), CellValue::Int(7));
        assert_eq!(
            CellValue::from_json(&serde_json::json!(1.5)),
            CellValue::Float(1.5)
        );
        assert_eq!(
            CellValue::from_json(&serde_json::json!("CYVR")),
            CellValue::Text("CYVR".into())
        );
        assert_eq!(
            CellValue::from_json(&serde_json::json!([1, 2])),
            CellValue::Text("[1,2]".into())
        );
    }

    #[test]
    fn test_untagged_serde() {
        let values: Vec<CellValue> = serde_json::from_str(r#"[null, true, 3, 2.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                CellValue::Null,
                CellValue::Bool(true),
                CellValue::Int(3),
                CellValue::Float(2.5),
                CellValue::Text("x".into()),
            ]
        );
    }
}
