//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The client
//! builds `HttpRequest` values and parses `HttpResponse` values; only the
//! `Transport` implementation touches the network. Keeping the request as data
//! lets callers and tests inspect exactly what would go on the wire.
//!
//! All fields use owned types (`String`, `Vec`) so values can be stored,
//! cloned and compared without lifetime concerns.

use std::fmt;

use serde::Serialize;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// The uppercased verb as sent on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload, tagged by how it is handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// An `application/x-www-form-urlencoded` string, or a caller-supplied
    /// string sent verbatim.
    Form(String),

    /// Bytes passed through untouched (file uploads, pre-encoded multipart).
    Raw(Vec<u8>),

    /// Bytes written to a temporary buffer and streamed as the request body.
    Upload(Vec<u8>),
}

impl RequestBody {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RequestBody::Form(s) => s.as_bytes(),
            RequestBody::Raw(b) | RequestBody::Upload(b) => b,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// Username/password pair attached as HTTP basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub user_id: String,
    pub password: String,
}

impl BasicAuth {
    /// The `user:password` credential string, before base64 encoding.
    pub fn credentials(&self) -> String {
        format!("{}:{}", self.user_id, self.password)
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An HTTP request described as plain data.
///
/// Built by `HttpClient::build_*` methods and executed by a `Transport`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub basic_auth: Option<BasicAuth>,
    /// Skip TLS peer and host verification for this request.
    pub insecure_tls: bool,
    /// Record response headers in the resulting `StatusInfo`.
    pub include_headers: bool,
}

impl HttpRequest {
    /// Case-insensitive header lookup; returns the first match.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_https(&self) -> bool {
        is_https(&self.url)
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport` after executing an `HttpRequest`, then handed to
/// `parse_response`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub(crate) fn is_https(url: &str) -> bool {
    url.get(..8)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https://"))
}

/// Split a raw `Name: value` header line. Returns `None` when there is no
/// colon or the name is empty.
pub(crate) fn split_header_line(line: &str) -> Option<(String, String)> {
    let (name, value) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}
