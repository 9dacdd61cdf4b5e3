//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! `Transport` is the only seam that performs I/O. The client is generic over
//! it, so tests can swap in a recorder and assert on the exact request that
//! would have been sent. `UreqTransport` creates a fresh agent for every call:
//! nothing is pooled and nothing outlives the request.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ureq::config::Config;
use ureq::tls::TlsConfig;
use ureq::{Agent, RequestBuilder, SendBody};

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};

/// Performs one blocking HTTP round-trip.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

/// Blocking HTTP/1.1 transport backed by `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        Self
    }

    fn config(request: &HttpRequest) -> Config {
        let tls = TlsConfig::builder()
            .disable_verification(request.insecure_tls)
            .build();

        // Status codes are data for the caller, never transport errors.
        Agent::config_builder()
            .http_status_as_error(false)
            .proxy(None)
            .tls_config(tls)
            .build()
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(&str, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(*name, value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = Self::config(request).new_agent();
        let url = request.url.as_str();

        let mut headers: Vec<(&str, String)> = request
            .headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();
        if let Some(auth) = &request.basic_auth {
            let encoded = STANDARD.encode(auth.credentials());
            headers.push(("Authorization", format!("Basic {encoded}")));
        }

        let result = match request.method {
            HttpMethod::Get => with_headers(agent.get(url), &headers).call(),
            HttpMethod::Delete => with_headers(agent.delete(url), &headers).call(),
            HttpMethod::Post | HttpMethod::Put => {
                let builder = if request.method == HttpMethod::Post {
                    agent.post(url)
                } else {
                    agent.put(url)
                };
                let builder = with_headers(builder, &headers);
                match &request.body {
                    None => builder.send_empty(),
                    Some(RequestBody::Upload(bytes)) => {
                        let mut buffer = Cursor::new(bytes.as_slice());
                        builder.send(SendBody::from_reader(&mut buffer))
                    }
                    Some(body) => builder.send(body.as_bytes()),
                }
            }
        };

        let mut response = result.map_err(TransportError::from)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        // No cap on the reply size; ureq's default limit would turn a large
        // but valid body into a transport failure.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(TransportError::from)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
