use std::time::Duration;

use ureq::Agent;

use super::{Backend, Response};
use crate::error::PmwError;
use crate::options::ServerOptions;

/// [`Backend`] over HTTP using a shared `ureq` agent.
#[derive(Clone)]
pub struct HttpBackend {
    agent: Agent,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend for `server`.
    #[must_use]
    pub fn new(server: &ServerOptions) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(server.timeout_secs)))
            .build();
        Self {
            agent: config.into(),
            base_url: server.base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn read(
        result: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
        url: &str,
    ) -> Result<Response, PmwError> {
        let mut response = result
            .map_err(|e| PmwError::Transport(format!("{url}: {e}")))?;
        let status = response.status();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| PmwError::Transport(format!("{url}: {e}")))?;
        log::debug!("{url} -> {}", status.as_u16());
        Ok(Response {
            status: status.as_u16(),
            status_text: status
                .canonical_reason()
                .unwrap_or_default()
                .to_owned(),
            body,
        })
    }
}

impl Backend for HttpBackend {
    fn get(&self, path: &str) -> Result<Response, PmwError> {
        let url = self.url(path);
        Self::read(self.agent.get(url.as_str()).call(), &url)
    }

    fn post_json(&self, path: &str, body: &str) -> Result<Response, PmwError> {
        let url = self.url(path);
        let result = self
            .agent
            .post(url.as_str())
            .header("Content-Type", "application/json")
            .send(body);
        Self::read(result, &url)
    }
}
