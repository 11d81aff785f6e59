use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {provider} failed: {source}")]
    Network {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} answered with HTTP {status}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("{provider} returned a malformed response: {reason}")]
    Malformed {
        provider: &'static str,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read or write state file: {0}")]
    Io(#[from] std::io::Error),

    #[error("state file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal(err)
    }
}

// Upstream detail stays in the log; callers only learn there is no data.
impl From<ProviderError> for AppError {
    fn from(_: ProviderError) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "no data".to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
