//! Response classification.
//!
//! # Design
//! Every call ends in exactly one `Outcome`: the body decoded as JSON, a
//! transport failure with no response at all, or a response whose body is not
//! JSON. HTTP error statuses are not failures here; a `404` with a JSON body
//! is `Decoded`, and the status is available through `StatusInfo`.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Transport-level metadata for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusInfo {
    pub method: HttpMethod,
    pub url: String,
    /// HTTP status code, or `0` when no response was received.
    pub status: u16,
    pub total_time: Duration,
    pub content_type: Option<String>,
    pub size_download: usize,
    /// Response headers; only recorded when the request asked for them.
    pub headers: Option<Vec<(String, String)>>,
    pub error: Option<TransportError>,
}

impl StatusInfo {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()?
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Result of a client call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A response arrived and its body is JSON. An empty body decodes to
    /// `Value::Null`.
    Decoded { info: StatusInfo, value: Value },

    /// No response was received.
    TransportError(StatusInfo),

    /// A response arrived but its body is not valid JSON.
    DecodeError { info: StatusInfo, body: String },
}

impl Outcome {
    pub fn info(&self) -> &StatusInfo {
        match self {
            Outcome::Decoded { info, .. }
            | Outcome::TransportError(info)
            | Outcome::DecodeError { info, .. } => info,
        }
    }

    /// The decoded body, if there is one.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Outcome::Decoded { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Outcome::Decoded { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, Outcome::Decoded { .. })
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(self, Outcome::TransportError(_))
    }

    pub fn is_decode_error(&self) -> bool {
        matches!(self, Outcome::DecodeError { .. })
    }
}

/// Turn the transport result for `request` into an `Outcome`.
pub fn parse_response(
    request: &HttpRequest,
    result: Result<HttpResponse, TransportError>,
    elapsed: Duration,
) -> Outcome {
    let response = match result {
        Ok(response) => response,
        Err(error) => {
            return Outcome::TransportError(StatusInfo {
                method: request.method,
                url: request.url.clone(),
                status: 0,
                total_time: elapsed,
                content_type: None,
                size_download: 0,
                headers: None,
                error: Some(error),
            });
        }
    };

    let info = StatusInfo {
        method: request.method,
        url: request.url.clone(),
        status: response.status,
        total_time: elapsed,
        content_type: response.header("content-type").map(str::to_string),
        size_download: response.body.len(),
        headers: request.include_headers.then(|| response.headers.clone()),
        error: None,
    };

    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Outcome::Decoded {
            info,
            value: Value::Null,
        };
    }

    match serde_json::from_slice::<Value>(&response.body) {
        Ok(value) => Outcome::Decoded { info, value },
        Err(e) => {
            tracing::debug!(url = %info.url, status = info.status, "response body is not JSON: {e}");
            Outcome::DecodeError {
                info,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            }
        }
    }
}
