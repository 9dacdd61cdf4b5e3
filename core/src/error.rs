//! Error types for the REST client.
//!
//! # Design
//! The client never returns `Err` for expected failures; a failed round-trip
//! is reported as `Outcome::TransportError` carrying one of these values in
//! its `StatusInfo`. They are `Clone` and `Serialize` so a status descriptor
//! can be stored, compared and logged as a whole.

use std::io;

use serde::Serialize;

/// Why a request produced no HTTP response at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum TransportError {
    /// The host name could not be resolved.
    #[error("host not found")]
    Dns,

    /// The TCP connection was refused or could not be established.
    #[error("connection failed: {0}")]
    Connect(String),

    /// TLS handshake or certificate verification failed.
    #[error("TLS failure: {0}")]
    Tls(String),

    #[error("request timed out")]
    Timeout,

    /// The URL could not be turned into a request target.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The peer broke the HTTP/1.1 framing.
    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("transport error: {0}")]
    Other(String),
}

impl From<io::Error> for TransportError {
    fn from(e: io::Error) -> Self {
        // rustls reports handshake failures through the I/O stream.
        #[cfg(feature = "rustls")]
        if let Some(tls) = e.get_ref().and_then(|inner| inner.downcast_ref::<rustls::Error>()) {
            return TransportError::Tls(tls.to_string());
        }

        match e.kind() {
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::AddrNotAvailable => TransportError::Connect(e.to_string()),
            io::ErrorKind::TimedOut => TransportError::Timeout,
            _ => TransportError::Io(e.to_string()),
        }
    }
}

impl From<ureq::Error> for TransportError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::HostNotFound => TransportError::Dns,
            ureq::Error::ConnectionFailed => {
                TransportError::Connect("no address could be reached".to_string())
            }
            ureq::Error::Timeout(_) => TransportError::Timeout,
            ureq::Error::Io(io_err) => TransportError::from(io_err),
            ureq::Error::BadUri(uri) => TransportError::InvalidUrl(uri),
            ureq::Error::Tls(msg) => TransportError::Tls(msg.to_string()),
            ureq::Error::Protocol(p) => TransportError::Protocol(p.to_string()),
            #[cfg(feature = "rustls")]
            ureq::Error::Rustls(tls) => TransportError::Tls(tls.to_string()),
            other => TransportError::Other(other.to_string()),
        }
    }
}
