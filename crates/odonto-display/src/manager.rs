use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use tracing::{debug, info, warn};

use odonto_core::models::catalog::DiagnosisCatalog;
use odonto_core::models::envelope::SavedIndices;
use odonto_core::models::indices::CpoIndices;
use odonto_core::models::odontogram::Odontogram;
use odonto_core::models::patient::PatientId;
use odonto_indices::calculate_cpo;

use crate::error::DisplayError;
use crate::source::IndicesSource;
use crate::state::{CpoPanel, DisplayState};

/// Identifies one fetch. Only the ticket from the latest
/// [`CpoManager::select_patient`] call can change the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    patient_id: PatientId,
    generation: u64,
}

impl FetchTicket {
    pub fn patient_id(&self) -> &PatientId {
        &self.patient_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// The ticket was superseded; the result was dropped.
    Discarded,
}

/// Owns the CPO panel state for the selected patient.
#[derive(Debug)]
pub struct CpoManager {
    patient_id: Option<PatientId>,
    generation: u64,
    state: DisplayState,
    calculated: CpoIndices,
    input_hash: Option<u64>,
}

impl Default for CpoManager {
    fn default() -> Self {
        Self {
            patient_id: None,
            generation: 0,
            state: DisplayState::Idle,
            calculated: CpoIndices::ZERO,
            input_hash: None,
        }
    }
}

impl CpoManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn calculated(&self) -> CpoIndices {
        self.calculated
    }

    pub fn patient_id(&self) -> Option<&PatientId> {
        self.patient_id.as_ref()
    }

    pub fn panel(&self) -> CpoPanel {
        CpoPanel::new(&self.state, self.calculated)
    }

    /// Start loading the saved snapshot for `patient_id`. Any fetch started
    /// earlier is invalidated.
    pub fn select_patient(&mut self, patient_id: PatientId) -> FetchTicket {
        let previous = if self.patient_id.as_ref() == Some(&patient_id) {
            self.state.saved().copied()
        } else {
            None
        };

        self.generation += 1;
        self.patient_id = Some(patient_id.clone());
        self.state = DisplayState::Loading { previous };
        debug!(patient_id = %patient_id, generation = self.generation, "loading saved indices");

        FetchTicket {
            patient_id,
            generation: self.generation,
        }
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation && self.patient_id.as_ref() == Some(&ticket.patient_id)
    }

    /// Apply the result of the fetch identified by `ticket`.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Option<SavedIndices>, DisplayError>,
    ) -> FetchOutcome {
        if !self.is_current(&ticket) {
            debug!(
                patient_id = %ticket.patient_id,
                generation = ticket.generation,
                current = self.generation,
                "discarding superseded fetch"
            );
            return FetchOutcome::Discarded;
        }

        let previous = self.state.saved().copied();
        self.state = match result {
            Ok(Some(saved)) => DisplayState::reconcile(saved, &self.calculated),
            Ok(None) => DisplayState::Unsaved,
            Err(e) => match previous {
                Some(saved) => {
                    warn!(patient_id = %ticket.patient_id, error = %e, "fetch failed, keeping previous snapshot");
                    DisplayState::reconcile(saved, &self.calculated)
                }
                None => {
                    warn!(patient_id = %ticket.patient_id, error = %e, "fetch failed");
                    DisplayState::Error {
                        detail: e.to_string(),
                    }
                }
            },
        };
        info!(patient_id = %ticket.patient_id, status = ?self.state.status(), "saved indices loaded");
        FetchOutcome::Applied
    }

    /// Recalculate from new inputs. Returns `false` when the inputs hash the
    /// same as last time and nothing was recomputed.
    pub fn update_inputs(
        &mut self,
        odontogram: Option<&Odontogram>,
        catalog: Option<&DiagnosisCatalog>,
    ) -> bool {
        let hash = input_hash(odontogram, catalog);
        if self.input_hash == Some(hash) {
            debug!("odontogram and catalog unchanged, skipping recalculation");
            return false;
        }

        self.input_hash = Some(hash);
        self.calculated = calculate_cpo(odontogram, catalog);
        if let DisplayState::Saved(saved) | DisplayState::Stale(saved) = self.state {
            self.state = DisplayState::reconcile(saved, &self.calculated);
        }
        debug!(total = self.calculated.total(), status = ?self.state.status(), "indices recalculated");
        true
    }

    /// Record a snapshot the caller has just persisted. Invalidates any fetch
    /// still in flight, since its answer would predate this snapshot.
    pub fn mark_saved(&mut self, saved: SavedIndices) -> Result<(), DisplayError> {
        let patient_id = self.patient_id.as_ref().ok_or(DisplayError::NoPatient)?;
        info!(patient_id = %patient_id, total = saved.indices.total(), "indices marked as saved");
        self.generation += 1;
        self.state = DisplayState::reconcile(saved, &self.calculated);
        Ok(())
    }

    /// Select `patient_id` and load its snapshot from `source` on a blocking
    /// task.
    pub async fn refresh<S>(&mut self, source: Arc<S>, patient_id: PatientId) -> &DisplayState
    where
        S: IndicesSource + 'static,
    {
        let ticket = self.select_patient(patient_id);
        let id = ticket.patient_id().clone();

        let result = tokio::task::spawn_blocking(move || source.fetch_saved(&id))
            .await
            .map_err(|e| DisplayError::Join(e.to_string()))
            .and_then(|fetched| fetched.map_err(DisplayError::from));

        self.complete_fetch(ticket, result);
        &self.state
    }
}

fn input_hash(odontogram: Option<&Odontogram>, catalog: Option<&DiagnosisCatalog>) -> u64 {
    let mut hasher = DefaultHasher::new();
    odontogram.hash(&mut hasher);
    catalog.hash(&mut hasher);
    hasher.finish()
}
