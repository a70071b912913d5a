use crate::submit::payload::{ErrorBody, SubmitRequest, SubmitResponse};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("endpoint returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("request could not be delivered: {0}")]
    Transport(String),
    #[error("response body could not be decoded: {0}")]
    Decode(String),
}

/// Seam between the wizard and the network. Tests swap in recording fakes;
/// production uses the blocking `ureq` client below.
pub trait Transport {
    fn send(&self, request: &SubmitRequest) -> Result<SubmitResponse, SubmitError>;
}

pub struct HttpTransport {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { agent, base_url }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &SubmitRequest) -> Result<SubmitResponse, SubmitError> {
        let url = self.url_for(&request.path);
        debug!(%url, "posting submission");

        match self.agent.post(&url).send_json(request.body.clone()) {
            Ok(response) => response
                .into_json::<SubmitResponse>()
                .map_err(|err| SubmitError::Decode(err.to_string())),
            Err(ureq::Error::Status(status, response)) => {
                let message = response
                    .into_json::<ErrorBody>()
                    .map(|body| body.error)
                    .unwrap_or_else(|_| format!("status {}", status));
                Err(SubmitError::Status { status, message })
            }
            Err(err) => Err(SubmitError::Transport(err.to_string())),
        }
    }
}
