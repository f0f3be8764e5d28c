//! Ureq-based blocking transport.

use std::time::Duration;

use ureq::http;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::BlockingTransport;

/// A [`BlockingTransport`] backed by [`ureq`].
#[derive(Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            // Status codes are interpreted by the decoder, not the transport.
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl BlockingTransport for UreqTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = http::Request::builder()
            .method(request.method.as_str())
            .uri(request.full_url());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let result = match request.body {
            Some(body) => {
                let req = builder
                    .body(body.into_bytes())
                    .map_err(|e| TransportError::Other(e.to_string()))?;
                self.agent.run(req)
            }
            None => {
                let req = builder
                    .body(())
                    .map_err(|e| TransportError::Other(e.to_string()))?;
                self.agent.run(req)
            }
        };

        match result {
            Ok(response) => convert_response(response),
            Err(ureq::Error::Timeout(_)) => Err(TransportError::Timeout),
            Err(ureq::Error::HostNotFound) => {
                Err(TransportError::Connection("host not found".to_owned()))
            }
            Err(ureq::Error::Io(e)) => Err(TransportError::Connection(e.to_string())),
            Err(e) => Err(TransportError::Other(e.to_string())),
        }
    }
}

fn convert_response(
    response: http::Response<ureq::Body>,
) -> Result<HttpResponse, TransportError> {
    let (parts, mut body) = response.into_parts();
    let headers = parts
        .headers
        .iter()
        .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
        .collect();
    let body = body
        .read_to_string()
        .map_err(|e| TransportError::Connection(e.to_string()))?;
    Ok(HttpResponse {
        status: parts.status.as_u16(),
        headers,
        body,
    })
}
