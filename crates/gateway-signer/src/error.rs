use axum::http::StatusCode;
use axum_core::response::{IntoResponse as AxumCoreIntoResponse, Response};

/// Failures while building a signed header set.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error("Invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },
    #[error("Invalid HMAC key: {0}")]
    InvalidKey(String),
    #[error("Failed to encode server param: {0}")]
    ServerParam(#[from] serde_json::Error),
    #[error("Header {name} cannot be sent over HTTP: {reason}")]
    InvalidHeaderValue { name: String, reason: String },
}

/// Failures while loading or reading gateway configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
    #[error("Missing config key {0}")]
    Missing(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
    #[error("Signing scheme {0} is not configured")]
    SchemeNotConfigured(&'static str),
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl From<SigningError> for ServerError {
    fn from(error: SigningError) -> Self {
        match error {
            SigningError::InvalidPath { .. } => Self::BadRequest(error.to_string()),
            other => Self::Unexpected(other.into()),
        }
    }
}

/// Trait implementation to convert this error into an axum http response
impl AxumCoreIntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            bad_request_error @ ServerError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, bad_request_error.to_string()).into_response()
            }
            not_configured_error @ ServerError::SchemeNotConfigured(_) => {
                (StatusCode::NOT_FOUND, not_configured_error.to_string()).into_response()
            }
            ServerError::Unexpected(error) => {
                tracing::error!(error = %error, "unexpected error while signing headers");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something wrong happened.",
                )
                    .into_response()
            }
        }
    }
}
