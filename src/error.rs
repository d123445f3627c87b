use serde::Serialize;
use thiserror::Error;

/// ApiError
///
/// Every failure a backend or collaborator call can produce. Callers treat all
/// variants the same way: surface `user_message()` and leave prior state untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    /// HTTP 401. The bearer token is expired or invalid.
    #[error("Session expired: {0}")]
    Unauthorized(String),

    /// HTTP 403.
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Any other 4xx.
    #[error("Request rejected ({status}): {message}")]
    Validation { status: u16, message: String },

    /// Any 5xx.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Invalid bearer token")]
    InvalidToken,

    #[error("Image upload failed: {0}")]
    Upload(String),

    #[error("Payment failed: {0}")]
    Payment(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::Validation { status, .. } | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The text shown in the blocking error notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized(_) => "Your session has expired. Please login again.".to_string(),
            ApiError::Forbidden(_) => "You don't have permission to do that.".to_string(),
            ApiError::Validation { message, .. }
            | ApiError::Server { message, .. }
            | ApiError::Upload(message)
            | ApiError::Payment(message) => message.clone(),
            ApiError::Timeout => "The server took too long to respond.".to_string(),
            ApiError::Network(_) | ApiError::Decode(_) | ApiError::InvalidToken => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Envelope
///
/// The `{success, data}` / `{success: false, error}` shape the HTTP layer exposes to
/// presentation code and the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> From<ApiResult<T>> for Envelope<T> {
    fn from(result: ApiResult<T>) -> Self {
        match result {
            Ok(data) => Envelope {
                success: true,
                data: Some(data),
                error: None,
            },
            Err(err) => Envelope {
                success: false,
                data: None,
                error: Some(err.to_string()),
            },
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    Missing(&'static str),
}
