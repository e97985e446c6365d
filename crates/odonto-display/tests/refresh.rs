use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use odonto_client::error::ClientError;
use odonto_core::models::envelope::SavedIndices;
use odonto_core::models::indices::CpoIndices;
use odonto_core::models::patient::PatientId;
use odonto_display::manager::CpoManager;
use odonto_display::source::IndicesSource;
use odonto_display::state::{DisplayState, PanelStatus};

struct FixedSource {
    answer: Option<CpoIndices>,
    fail: bool,
    calls: AtomicUsize,
}

impl IndicesSource for FixedSource {
    fn fetch_saved(&self, _patient_id: &PatientId) -> Result<Option<SavedIndices>, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(ClientError::Transport("connection refused".to_string()))
        } else {
            Ok(self.answer.map(SavedIndices::new))
        }
    }
}

#[tokio::test]
async fn refresh_loads_snapshot_through_source() {
    let source = Arc::new(FixedSource {
        answer: Some(CpoIndices::ZERO),
        fail: false,
        calls: AtomicUsize::new(0),
    });
    let mut manager = CpoManager::new();

    let state = manager.refresh(source.clone(), "12".parse().unwrap()).await;
    assert_eq!(state, &DisplayState::Saved(SavedIndices::new(CpoIndices::ZERO)));
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn refresh_failure_surfaces_error_state() {
    let source = Arc::new(FixedSource {
        answer: None,
        fail: true,
        calls: AtomicUsize::new(0),
    });
    let mut manager = CpoManager::new();

    manager.refresh(source, "12".parse().unwrap()).await;
    let panel = manager.panel();
    assert_eq!(panel.status, PanelStatus::Error);
    assert!(panel.detail.unwrap().contains("connection refused"));
}
