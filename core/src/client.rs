//! JSON REST client bound to one endpoint.
//!
//! # Design
//! `HttpClient` owns its `ClientConfig` and a `Transport`. Each verb is split
//! into a `build_*` method that produces a plain-data `HttpRequest` and the
//! shared `execute` routine that sends it and classifies the reply. Auth,
//! TLS mode and default headers are applied in one place, so the four verbs
//! differ only in URL and body encoding.

use std::time::Instant;

use crate::config::ClientConfig;
use crate::http::{is_https, HttpMethod, HttpRequest, RequestBody};
use crate::params::{append_query, Params};
use crate::response::{parse_response, Outcome};
use crate::transport::{Transport, UreqTransport};

/// Synchronous client for a JSON REST endpoint.
///
/// Calls never return `Err`: inspect the `Outcome` to tell a decoded body
/// from a transport failure or a non-JSON reply.
#[derive(Debug, Clone)]
pub struct HttpClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl HttpClient<UreqTransport> {
    pub fn new(endpoint_url: &str, auth_user_id: Option<&str>, auth_password: Option<&str>) -> Self {
        let mut config = ClientConfig::new(endpoint_url);
        config.auth_user_id = auth_user_id.map(str::to_string);
        config.auth_password = auth_password.map(str::to_string);
        Self::with_config(config)
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> HttpClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn debug(&self) -> bool {
        self.config.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.config.debug = debug;
    }

    /// Replace the default header list.
    pub fn set_default_headers(&mut self, headers: Vec<String>) {
        self.config.default_headers = headers;
    }

    pub fn add_default_header(&mut self, header: impl Into<String>) {
        self.config.default_headers.push(header.into());
    }

    pub fn build_get(&self, path: &str, params: Option<&Params>) -> HttpRequest {
        let query = params
            .filter(|p| !p.is_empty())
            .map(Params::to_form)
            .unwrap_or_default();
        let url = append_query(&self.url(path), &query);
        self.request(HttpMethod::Get, url, None)
    }

    /// With `is_file` set, or for byte payloads, the body is sent exactly as
    /// given; otherwise it is form-encoded.
    pub fn build_post(&self, path: &str, params: &Params, is_file: bool) -> HttpRequest {
        let body = if is_file || matches!(params, Params::Bytes(_)) {
            RequestBody::Raw(params.to_raw_bytes())
        } else {
            RequestBody::Form(params.to_form())
        };
        self.request(HttpMethod::Post, self.url(path), Some(body))
    }

    pub fn build_put(&self, path: &str, data: &Params) -> HttpRequest {
        let body = RequestBody::Upload(data.to_json_bytes());
        self.request(HttpMethod::Put, self.url(path), Some(body))
    }

    pub fn build_delete(&self, path: &str) -> HttpRequest {
        let mut request = self.request(HttpMethod::Delete, self.url(path), None);
        request.include_headers = true;
        request
    }

    pub fn get(&self, path: &str, params: Option<Params>) -> Outcome {
        let request = self.build_get(path, params.as_ref());
        let outcome = self.execute(&request);
        self.log_call(&request, None);
        outcome
    }

    pub fn post(&self, path: &str, params: impl Into<Params>, is_file: bool) -> Outcome {
        let params = params.into();
        let request = self.build_post(path, &params, is_file);
        let outcome = self.execute(&request);
        self.log_call(&request, Some((&params, Some(is_file))));
        outcome
    }

    pub fn put(&self, path: &str, data: impl Into<Params>) -> Outcome {
        let data = data.into();
        let request = self.build_put(path, &data);
        let outcome = self.execute(&request);
        self.log_call(&request, Some((&data, None)));
        outcome
    }

    pub fn delete(&self, path: &str) -> Outcome {
        let request = self.build_delete(path);
        let outcome = self.execute(&request);
        self.log_call(&request, None);
        outcome
    }

    /// Send a request and classify the reply.
    pub fn execute(&self, request: &HttpRequest) -> Outcome {
        let started = Instant::now();
        let result = self.transport.send(request);
        let elapsed = started.elapsed();

        match &result {
            Ok(response) => tracing::debug!(
                method = %request.method,
                url = %request.url,
                status = response.status,
                elapsed_ms = elapsed.as_millis() as u64,
                "request completed"
            ),
            Err(e) => tracing::warn!(
                method = %request.method,
                url = %request.url,
                error = %e,
                "request failed"
            ),
        }

        parse_response(request, result, elapsed)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint_url, path)
    }

    fn request(&self, method: HttpMethod, url: String, body: Option<RequestBody>) -> HttpRequest {
        HttpRequest {
            method,
            insecure_tls: self.config.accept_invalid_certs && is_https(&url),
            url,
            headers: self.config.header_pairs(),
            body,
            basic_auth: self.config.basic_auth(),
            include_headers: false,
        }
    }

    fn log_call(&self, request: &HttpRequest, params: Option<(&Params, Option<bool>)>) {
        if !self.config.debug {
            return;
        }
        let banner = "#".repeat(80);
        tracing::info!("{banner}");
        tracing::info!("{}: {}", request.method, request.url);
        match params {
            Some((params, Some(is_file))) => tracing::info!(is_file, "params: {params}"),
            Some((data, None)) => tracing::info!("data: {data}"),
            None => {}
        }
        tracing::info!("{banner}");
    }
}
