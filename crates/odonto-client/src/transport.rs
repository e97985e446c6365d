use std::time::Duration;

use ureq::Agent;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully resolved request: absolute URL, optional bearer token and JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns whatever status the server answered with.
/// Only failures to get an answer at all are errors at this level.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError>;
}

/// Production transport backed by a ureq agent.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
        }
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        let auth = request.bearer.as_ref().map(|t| format!("Bearer {t}"));

        let result = match request.method {
            Method::Get => {
                let mut req = self
                    .agent
                    .get(&request.url)
                    .header("Accept", "application/json");
                if let Some(auth) = &auth {
                    req = req.header("Authorization", auth.as_str());
                }
                req.call()
            }
            Method::Post => {
                let mut req = self
                    .agent
                    .post(&request.url)
                    .header("Accept", "application/json")
                    .header("Content-Type", "application/json");
                if let Some(auth) = &auth {
                    req = req.header("Authorization", auth.as_str());
                }
                req.send(request.body.as_deref().unwrap_or_default())
            }
        };

        let mut resp = result.map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .body_mut()
            .read_to_string()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
