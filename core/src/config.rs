//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::http::{split_header_line, BasicAuth};

/// Headers attached to every request unless replaced.
pub const DEFAULT_HEADERS: [&str; 2] = ["Accept: application/json", "Content-Type: application/json"];

/// Configuration owned by one `HttpClient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address prefixed to every request path.
    pub endpoint_url: String,
    #[serde(default)]
    pub auth_user_id: Option<String>,
    #[serde(default)]
    pub auth_password: Option<String>,
    /// Raw `Name: value` lines, sent in order.
    #[serde(default = "default_headers")]
    pub default_headers: Vec<String>,
    /// Emit request details through `tracing` for every call.
    #[serde(default)]
    pub debug: bool,
    /// Skip certificate and host name verification for `https` URLs.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_headers() -> Vec<String> {
    DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect()
}

impl ClientConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            auth_user_id: None,
            auth_password: None,
            default_headers: default_headers(),
            debug: false,
            accept_invalid_certs: false,
        }
    }

    pub fn with_basic_auth(mut self, user_id: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth_user_id = Some(user_id.into());
        self.auth_password = Some(password.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_default_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Credentials to attach, present only when both parts are non-empty.
    pub fn basic_auth(&self) -> Option<BasicAuth> {
        match (self.auth_user_id.as_deref(), self.auth_password.as_deref()) {
            (Some(user_id), Some(password)) if !user_id.is_empty() && !password.is_empty() => {
                Some(BasicAuth {
                    user_id: user_id.to_string(),
                    password: password.to_string(),
                })
            }
            _ => None,
        }
    }

    /// Default headers as name/value pairs. Lines without a `Name:` prefix
    /// are skipped with a warning.
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        self.default_headers
            .iter()
            .filter_map(|line| {
                let pair = split_header_line(line);
                if pair.is_none() {
                    tracing::warn!(header = %line, "ignoring malformed default header");
                }
                pair
            })
            .collect()
    }
}
