use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors raised while setting up the service layer. Request failures are
/// reported as [`ApiError`](skyplan_core::ApiError).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}
