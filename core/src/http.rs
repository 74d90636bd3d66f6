//! Plain-data HTTP types passed between the façade and the executor.
//!
//! All fields use owned types (`String`, `Vec`) so a request can move onto
//! the worker thread that performs the actual I/O.

use std::fmt;
use std::time::Duration;

/// HTTP method for a request.
///
/// `Update` is not a registered HTTP method; the backend this engine talks
/// to accepts it as an extension method, so it is dispatched verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Update,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Update => "UPDATE",
        }
    }

    /// Whether a request body is written for this method.
    pub fn accepts_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Update)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-resolved outbound request.
///
/// Built by the façade after endpoint resolution and body serialization.
/// Headers are applied in order; duplicate names are all applied.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// The raw result of one executed request: the numeric status, the fully
/// buffered body text, and the wall time the round-trip took.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
}
