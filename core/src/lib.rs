//! Synchronous JSON REST client.
//!
//! # Overview
//! `HttpClient` issues GET/POST/PUT/DELETE requests against one base endpoint,
//! optionally with basic authentication, and decodes JSON replies. Every call
//! blocks until the round-trip finishes and returns an `Outcome`.
//!
//! # Design
//! - Each verb is split into `build_*` (plain-data `HttpRequest`) and a shared
//!   `execute` step, so the exact wire request can be inspected without I/O.
//! - `Transport` is the only I/O seam; `UreqTransport` is the default and
//!   opens a fresh agent per call.
//! - `Outcome` distinguishes decoded bodies, transport failures and non-JSON
//!   replies instead of overloading one return shape.
//! - Debug output goes through `tracing`; attach a subscriber to see it.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod params;
pub mod response;
pub mod transport;

pub use client::HttpClient;
pub use config::{ClientConfig, DEFAULT_HEADERS};
pub use error::TransportError;
pub use http::{BasicAuth, HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use params::Params;
pub use response::{parse_response, Outcome, StatusInfo};
pub use transport::{Transport, UreqTransport};
