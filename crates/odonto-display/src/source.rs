use odonto_client::client::ClinicClient;
use odonto_client::error::ClientError;
use odonto_client::transport::Transport;
use odonto_core::models::envelope::SavedIndices;
use odonto_core::models::patient::PatientId;

/// Where persisted snapshots come from. Blocking; the manager runs it off
/// the async runtime.
pub trait IndicesSource: Send + Sync {
    fn fetch_saved(&self, patient_id: &PatientId) -> Result<Option<SavedIndices>, ClientError>;
}

impl<T: Transport> IndicesSource for ClinicClient<T> {
    fn fetch_saved(&self, patient_id: &PatientId) -> Result<Option<SavedIndices>, ClientError> {
        self.fetch_cpo(patient_id)
    }
}
