//! Request execution over a per-call ureq agent.
//!
//! # Design
//! Each invocation builds a fresh agent, so no connection is ever reused
//! across calls. The agent is configured with `http_status_as_error(false)`
//! so non-success statuses come back as data for the façade to classify,
//! and with a connect timeout only. No read timeout is set; a stalled
//! response stream blocks the worker until the peer closes the connection.
//! This mirrors the backend contract this engine was built against.
//!
//! The round-trip runs on a spawned worker thread. The calling thread
//! parks on a channel until the worker delivers the result, which bounds
//! the caller's involvement to a single blocking receive. The status code
//! is read before any of the body, and the body is buffered fully into
//! text before control returns.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use ureq::Agent;

use crate::http::{ApiRequest, RawResponse};

/// Faults raised below the status-code line. These never escape the
/// façade; it folds them into the exception branch of the outcome.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be assembled (bad URL, bad header name).
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ureq::http::Error),

    /// Connection, TLS, timeout or stream-level failure.
    #[error(transparent)]
    Http(#[from] ureq::Error),

    /// The worker thread died before delivering a result.
    #[error("worker thread exited before delivering a result")]
    WorkerExited,
}

/// Execute one request on a worker thread and wait for its result.
pub fn execute(
    request: ApiRequest,
    connect_timeout: Duration,
) -> Result<RawResponse, TransportError> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(perform(&request, connect_timeout));
    });
    rx.recv().map_err(|_| TransportError::WorkerExited)?
}

/// The blocking round-trip: connect, send, read status, buffer body.
fn perform(
    request: &ApiRequest,
    connect_timeout: Duration,
) -> Result<RawResponse, TransportError> {
    let agent: Agent = Agent::config_builder()
        .http_status_as_error(false)
        .timeout_connect(Some(connect_timeout))
        .build()
        .new_agent();

    let started = Instant::now();

    let mut builder = ureq::http::Request::builder()
        .method(request.method.as_str())
        .uri(request.url.as_str());
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    // A supplied body is only written for write-capable methods; on the
    // other methods it still shows up in the request log but never on the
    // wire.
    let payload = match (&request.body, request.method.accepts_body()) {
        (Some(body), true) => body.clone().into_bytes(),
        _ => Vec::new(),
    };

    let mut response = agent.run(builder.body(payload)?)?;
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string()?;

    Ok(RawResponse { status, body, elapsed: started.elapsed() })
}
