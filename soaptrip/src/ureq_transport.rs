//! Blocking HTTP transport backed by `ureq`

use crate::config::TransportConfig;
use crate::error::TransportError;
use crate::message::{Body, Request, Response};
use crate::transport::Transport;

/// A [`Transport`] that sends requests with a [`ureq::Agent`].
///
/// HTTP error statuses are returned as responses rather than failures, so a
/// SOAP Fault delivered with status 500 still reaches the fault scanner.
/// Only connection-level problems become [`TransportError::Network`].
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Create a transport with the default configuration
    pub fn new() -> Self {
        Self::from_agent(Self::build_agent(&TransportConfig::default()))
    }

    /// Create a transport after validating `config`
    pub fn with_config(config: TransportConfig) -> Result<Self, TransportError> {
        config.validate()?;
        Ok(Self::from_agent(Self::build_agent(&config)))
    }

    /// Use an existing agent, e.g. one shared with other clients
    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    fn build_agent(config: &TransportConfig) -> ureq::Agent {
        ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .timeout_read(config.read_timeout)
            .timeout_write(config.write_timeout)
            .user_agent(&config.user_agent)
            .build()
    }

    fn convert(response: ureq::Response) -> Response {
        let status = response.status();
        let headers: Vec<(String, String)> = response
            .headers_names()
            .into_iter()
            .flat_map(|name| {
                response
                    .all(&name)
                    .into_iter()
                    .map(|value| (name.clone(), value.to_string()))
                    .collect::<Vec<_>>()
            })
            .collect();

        headers.into_iter().fold(
            Response::new(status, Body::new(response.into_reader())),
            |response, (name, value)| response.with_header(name, value),
        )
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    type Error = TransportError;

    fn execute(&self, request: Request) -> Result<Response, TransportError> {
        let mut call = self.agent.request(request.method(), request.url());
        for (name, value) in request.headers() {
            call = call.set(name, value);
        }
        if let Some(timeout) = request.deadline() {
            call = call.timeout(timeout);
        }

        tracing::debug!(method = request.method(), url = request.url(), "Sending request");

        let result = if request.body_bytes().is_empty() {
            call.call()
        } else {
            call.send_bytes(request.body_bytes())
        };

        match result {
            Ok(response) => Ok(Self::convert(response)),
            Err(ureq::Error::Status(code, response)) => {
                tracing::debug!(status = code, url = request.url(), "Request returned error status");
                Ok(Self::convert(response))
            }
            Err(err) => Err(TransportError::Network(err.to_string())),
        }
    }
}
