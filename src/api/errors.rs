use thiserror::Error;

/// Failure of a single backend call.
///
/// Every variant renders as one human-readable line suitable for a toast.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response from server: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Session expired, please sign in again")]
    Unauthorized,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn missing_field(field: &str) -> Self {
        ApiError::MalformedResponse(format!("missing field `{field}`"))
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiError::MalformedResponse(format!("Failed to decode body: {err}"));
        }

        if err.status() == Some(reqwest::StatusCode::UNAUTHORIZED) {
            return ApiError::Unauthorized;
        }

        if err.is_timeout() {
            return ApiError::Transport("Request timed out".to_string());
        }

        if err.is_connect() {
            return ApiError::Transport(format!("Connection error: {err}"));
        }

        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::MalformedResponse(format!("Failed to decode body: {err}"))
    }
}
