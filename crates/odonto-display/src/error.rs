use thiserror::Error;

use odonto_client::error::ClientError;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] ClientError),

    #[error("fetch task failed: {0}")]
    Join(String),

    #[error("no patient selected")]
    NoPatient,
}
