use serde::{Deserialize, Serialize};
use ts_rs::TS;

use odonto_core::models::envelope::SavedIndices;
use odonto_core::models::indices::CpoIndices;

/// Shown whenever the persisted snapshot could not be loaded.
pub const FETCH_ERROR_MESSAGE: &str = "No se pudieron calcular los índices";

/// What the CPO panel is showing. The saved snapshot lives inside the
/// variants that have one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// No patient selected yet.
    Idle,
    /// Fetch in flight. `previous` is the snapshot already held for the same
    /// patient, kept as a fallback if the fetch fails.
    Loading { previous: Option<SavedIndices> },
    /// Calculated indices equal the saved ones.
    Saved(SavedIndices),
    /// Calculated indices differ from the saved ones.
    Stale(SavedIndices),
    /// The backend holds no snapshot for this patient.
    Unsaved,
    /// Fetch failed and no snapshot is available.
    Error { detail: String },
}

impl DisplayState {
    /// `Saved` or `Stale`, by exact comparison of all four fields.
    pub fn reconcile(saved: SavedIndices, calculated: &CpoIndices) -> Self {
        if saved.indices == *calculated {
            DisplayState::Saved(saved)
        } else {
            DisplayState::Stale(saved)
        }
    }

    pub fn saved(&self) -> Option<&SavedIndices> {
        match self {
            DisplayState::Saved(saved) | DisplayState::Stale(saved) => Some(saved),
            DisplayState::Loading { previous } => previous.as_ref(),
            _ => None,
        }
    }

    pub fn status(&self) -> PanelStatus {
        match self {
            DisplayState::Idle => PanelStatus::Idle,
            DisplayState::Loading { .. } => PanelStatus::Loading,
            DisplayState::Saved(_) => PanelStatus::Saved,
            DisplayState::Stale(_) => PanelStatus::Stale,
            DisplayState::Unsaved => PanelStatus::Unsaved,
            DisplayState::Error { .. } => PanelStatus::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PanelStatus {
    Idle,
    Loading,
    Saved,
    Stale,
    Unsaved,
    Error,
}

/// Flattened view model handed to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CpoPanel {
    pub status: PanelStatus,
    pub saved: Option<SavedIndices>,
    pub calculated: CpoIndices,
    pub has_unsaved_changes: bool,
    pub message: Option<String>,
    pub detail: Option<String>,
}

impl CpoPanel {
    pub fn new(state: &DisplayState, calculated: CpoIndices) -> Self {
        let has_unsaved_changes = match state {
            DisplayState::Stale(_) => true,
            DisplayState::Unsaved => calculated.total() > 0,
            _ => false,
        };
        let (message, detail) = match state {
            DisplayState::Error { detail } => {
                (Some(FETCH_ERROR_MESSAGE.to_string()), Some(detail.clone()))
            }
            _ => (None, None),
        };

        Self {
            status: state.status(),
            saved: state.saved().copied(),
            calculated,
            has_unsaved_changes,
            message,
            detail,
        }
    }
}
