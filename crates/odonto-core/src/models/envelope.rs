use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::indices::CpoIndices;
use crate::error::CoreError;

/// Response wrapper used by every backend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, alias = "error", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Unwrap the payload. `success: false` becomes [`CoreError::Api`];
    /// a successful response may still carry no data.
    pub fn into_result(self) -> Result<Option<T>, CoreError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(CoreError::Api(
                self.message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            ))
        }
    }
}

/// CPO snapshot persisted server-side for a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SavedIndices {
    #[serde(flatten)]
    pub indices: CpoIndices,
    #[serde(default, alias = "fecha", skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub recorded_at: Option<jiff::Timestamp>,
}

impl SavedIndices {
    pub fn new(indices: CpoIndices) -> Self {
        Self {
            indices,
            recorded_at: None,
        }
    }
}
