use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("unknown dental index: {0}")]
    UnknownIndex(String),
}
