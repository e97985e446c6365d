use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid tooth code: {0}")]
    InvalidToothCode(String),

    #[error("invalid patient id: {0}")]
    InvalidPatientId(String),

    #[error("server reported failure: {0}")]
    Api(String),
}
