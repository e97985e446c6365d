//! REST path conventions.
//!
//! Pure string functions, relative to the backend base URL. The backend is a
//! Django REST app, so every path keeps its trailing slash.

use crate::models::patient::PatientId;

pub fn cpo_indices(patient_id: &PatientId) -> String {
    format!("api/pacientes/{patient_id}/indices-cpo/")
}

pub fn odontogram(patient_id: &PatientId) -> String {
    format!("api/pacientes/{patient_id}/odontograma/")
}

pub fn diagnosis_categories() -> String {
    "api/diagnosticos/categorias/".to_string()
}

/// Join a base URL and a relative path with exactly one slash between them.
pub fn join(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
