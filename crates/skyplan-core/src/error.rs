//! Error types for SkyPlan

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown when a failure does not carry a usable explanation
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// A single field-level validation error reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field (last segment of the error location)
    pub field: String,
    /// Human readable message
    pub message: String,
}

/// Errors surfaced by requests against the backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Structured single-message error, e.g. `{"detail": "Flight not found"}`
    #[error("{message} (status {status})")]
    Message { status: u16, message: String },

    /// Field-level validation errors, e.g. `{"detail": [{"loc": [...], "msg": "..."}]}`
    #[error("Validation failed (status {status}): {}", join_fields(.fields))]
    Validation { status: u16, fields: Vec<FieldError> },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// A response arrived but its shape was not recognized
    #[error("Unexpected response (status {status:?})")]
    Unexpected { status: Option<u16> },

    /// The payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ApiError {
    /// Classify a failed response from its status code and body.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) else {
            return ApiError::Unexpected {
                status: Some(status),
            };
        };

        match json.get("detail") {
            Some(serde_json::Value::String(message)) => ApiError::Message {
                status,
                message: message.clone(),
            },
            Some(serde_json::Value::Array(items)) => {
                match items.iter().map(parse_field_error).collect::<Option<Vec<_>>>() {
                    Some(fields) if !fields.is_empty() => ApiError::Validation { status, fields },
                    _ => ApiError::Unexpected {
                        status: Some(status),
                    },
                }
            }
            _ => ApiError::Unexpected {
                status: Some(status),
            },
        }
    }

    /// HTTP status of the failed response, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Message { status, .. } | ApiError::Validation { status, .. } => Some(*status),
            ApiError::Unexpected { status } => *status,
            ApiError::Network(_) | ApiError::Serialization(_) => None,
        }
    }

    /// Text suitable for a user-facing notification
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Message { message, .. } => message.clone(),
            ApiError::Validation { fields, .. } => join_fields(fields),
            ApiError::Network(_) | ApiError::Unexpected { .. } | ApiError::Serialization(_) => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }
}

fn parse_field_error(item: &serde_json::Value) -> Option<FieldError> {
    let message = item.get("msg")?.as_str()?.to_string();
    let field = item
        .get("loc")
        .and_then(|loc| loc.as_array())
        .and_then(|loc| loc.last())
        .map(|segment| match segment {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_default();
    Some(FieldError { field, message })
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}

/// Result type alias for backend operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_message_error() {
        let err = ApiError::from_response(404, br#"{"detail": "Flight not found"}"#);
        assert_eq!(
            err,
            ApiError::Message {
                status: 404,
                message: "Flight not found".into()
            }
        );
        assert_eq!(err.user_message(), "Flight not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_field_errors() {
        let body = br#"{"detail": [
            {"loc": ["body", "weight_lb"], "msg": "must be positive"},
            {"loc": ["body", "name"], "msg": "field required"}
        ]}"#;
        let err = ApiError::from_response(422, body);
        assert_eq!(
            err,
            ApiError::Validation {
                status: 422,
                fields: vec![
                    FieldError {
                        field: "weight_lb".into(),
                        message: "must be positive".into()
                    },
                    FieldError {
                        field: "name".into(),
                        message: "field required".into()
                    },
                ]
            }
        );
        assert_eq!(
            err.user_message(),
            "weight_lb: must be positive; name: field required"
        );
    }

    #[test]
    fn test_unexpected_shapes_are_generic() {
        let not_json = ApiError::from_response(500, b"<html>oops</html>");
        assert_eq!(not_json, ApiError::Unexpected { status: Some(500) });
        assert_eq!(not_json.user_message(), GENERIC_ERROR_MESSAGE);

        let no_detail = ApiError::from_response(400, br#"{"error": "bad"}"#);
        assert_eq!(no_detail, ApiError::Unexpected { status: Some(400) });

        let bad_items = ApiError::from_response(422, br#"{"detail": [{"oops": 1}]}"#);
        assert_eq!(bad_items, ApiError::Unexpected { status: Some(422) });

        let network = ApiError::Network("connection refused".into());
        assert_eq!(network.user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(network.status(), None);
    }
}
