//! Deferred request/response logging.
//!
//! # Design
//! Log entries are zero-argument actions that snapshot everything they
//! need at enqueue time and render only when flushed, so no logging work
//! happens while the call is in flight. The queue is owned by a single
//! call: the façade creates one per invocation, enqueues one request entry
//! and (when a response arrived) one response entry, and flushes it before
//! returning. Entries from concurrent calls can therefore never
//! interleave.

use std::collections::VecDeque;

use crate::http::{ApiRequest, RawResponse};
use crate::outcome::is_success;

type Entry = Box<dyn FnOnce() + Send>;

/// FIFO queue of deferred render actions.
#[derive(Default)]
pub struct DeferredLog {
    entries: VecDeque<Entry>,
}

impl DeferredLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a render action to run at the next flush.
    pub fn defer(&mut self, entry: impl FnOnce() + Send + 'static) {
        self.entries.push_back(Box::new(entry));
    }

    /// Invoke and remove every entry in enqueue order. Flushing an empty
    /// queue is a no-op.
    pub fn flush_all(&mut self) {
        while let Some(entry) = self.entries.pop_front() {
            entry();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for DeferredLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredLog").field("pending", &self.entries.len()).finish()
    }
}

/// Render action for an outgoing request. Snapshots method, URL, headers
/// and body text now; emits a `debug!` event when flushed.
pub(crate) fn request_entry(request: &ApiRequest) -> impl FnOnce() + Send + 'static {
    let method = request.method;
    let url = request.url.clone();
    let headers = request.headers.clone();
    let body = request.body.clone();
    move || {
        let body = body.as_deref().map(pretty_json);
        tracing::debug!(
            target: "http_request",
            %method,
            %url,
            headers = ?headers,
            body = body.as_deref().unwrap_or("omitted request body"),
            "outgoing request"
        );
    }
}

/// Render action for a received response. Severity follows the success
/// band: `info!` in band, `error!` outside it.
pub(crate) fn response_entry(
    request: &ApiRequest,
    response: &RawResponse,
) -> impl FnOnce() + Send + 'static {
    let method = request.method;
    let url = request.url.clone();
    let status = response.status;
    let elapsed_ms = response.elapsed.as_millis() as u64;
    let body = response.body.clone();
    move || {
        let body = pretty_json(&body);
        if is_success(status) {
            tracing::info!(
                target: "http_response",
                %method,
                %url,
                status,
                elapsed_ms,
                %body,
                "response received"
            );
        } else {
            tracing::error!(
                target: "http_response",
                %method,
                %url,
                status,
                elapsed_ms,
                %body,
                "response received"
            );
        }
    }
}

/// Pretty-print a JSON body, falling back to the raw text when it does not
/// parse.
fn pretty_json(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| body.to_string())
}
