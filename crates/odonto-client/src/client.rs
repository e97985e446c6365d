use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use odonto_core::api_paths;
use odonto_core::models::catalog::DiagnosisCatalog;
use odonto_core::models::envelope::{ApiEnvelope, SavedIndices};
use odonto_core::models::indices::CpoIndices;
use odonto_core::models::odontogram::Odontogram;
use odonto_core::models::patient::PatientId;

use crate::error::ClientError;
use crate::retry::RetryPolicy;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport, UreqTransport};

/// Connection settings for [`ClinicClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

/// Client for the clinic backend endpoints the index display needs.
pub struct ClinicClient<T = UreqTransport> {
    transport: T,
    base_url: String,
    api_token: Option<String>,
    retry: RetryPolicy,
}

impl ClinicClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> ClinicClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim().to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(config.base_url));
        }

        Ok(Self {
            transport,
            base_url,
            api_token: config.api_token.filter(|t| !t.is_empty()),
            retry: config.retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The CPO snapshot persisted for a patient, or `None` if the backend has
    /// never stored one.
    pub fn fetch_cpo(&self, patient_id: &PatientId) -> Result<Option<SavedIndices>, ClientError> {
        info!(patient_id = %patient_id, "fetching saved CPO indices");
        self.get_json(&api_paths::cpo_indices(patient_id))
    }

    /// Persist a CPO snapshot. Returns the snapshot as stored by the backend,
    /// falling back to the submitted values when the response carries none.
    pub fn save_cpo(
        &self,
        patient_id: &PatientId,
        indices: &CpoIndices,
    ) -> Result<SavedIndices, ClientError> {
        info!(patient_id = %patient_id, total = indices.total(), "saving CPO indices");
        let stored: Option<SavedIndices> =
            self.post_json(&api_paths::cpo_indices(patient_id), indices)?;
        Ok(stored.unwrap_or_else(|| SavedIndices::new(*indices)))
    }

    pub fn fetch_odontogram(&self, patient_id: &PatientId) -> Result<Odontogram, ClientError> {
        info!(patient_id = %patient_id, "fetching odontogram");
        Ok(self
            .get_json(&api_paths::odontogram(patient_id))?
            .unwrap_or_default())
    }

    pub fn fetch_catalog(&self) -> Result<DiagnosisCatalog, ClientError> {
        info!("fetching diagnosis catalog");
        Ok(self
            .get_json(&api_paths::diagnosis_categories())?
            .unwrap_or_default())
    }

    fn get_json<D: DeserializeOwned>(&self, path: &str) -> Result<Option<D>, ClientError> {
        let request = self.request(Method::Get, path, None);
        let response = self.execute(&request)?;
        decode_envelope(&response)
    }

    fn post_json<B: Serialize, D: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<D>, ClientError> {
        let body = serde_json::to_string(body)?;
        let request = self.request(Method::Post, path, Some(body));
        let response = self.execute(&request)?;
        decode_envelope(&response)
    }

    fn request(&self, method: Method, path: &str, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url: api_paths::join(&self.base_url, path),
            bearer: self.api_token.clone(),
            body,
        }
    }

    /// Send with retries. Non-2xx answers become [`ClientError::Status`] so
    /// the retry policy can tell 5xx from 4xx.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        self.retry.run(|attempt| {
            let response = self.transport.send(request)?;
            debug!(url = %request.url, status = response.status, attempt, "response received");
            if response.is_success() {
                Ok(response)
            } else {
                Err(ClientError::Status {
                    status: response.status,
                    body: response.body,
                })
            }
        })
    }
}

fn decode_envelope<D: DeserializeOwned>(response: &HttpResponse) -> Result<Option<D>, ClientError> {
    let envelope: ApiEnvelope<D> = serde_json::from_str(&response.body)?;
    Ok(envelope.into_result()?)
}
