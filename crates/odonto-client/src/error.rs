use thiserror::Error;

use odonto_core::error::CoreError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("server reported failure: {0}")]
    Api(String),

    #[error("response decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error(transparent)]
    Core(CoreError),
}

impl ClientError {
    /// Connection failures and 5xx responses are worth another attempt;
    /// everything else would fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<CoreError> for ClientError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Api(message) => ClientError::Api(message),
            CoreError::Serialization(e) => ClientError::Decode(e),
            other => ClientError::Core(other),
        }
    }
}
