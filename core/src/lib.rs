//! Generic HTTP-call engine for the user API.
//!
//! # Overview
//! One façade call takes an endpoint template, path/query parameters,
//! headers and an optional JSON body, and returns a [`CallOutcome`]: the
//! typed success value, the backend's structured error payload, or a
//! transport failure. Request and response logging is deferred into a
//! per-call FIFO queue and flushed once the call finishes.
//!
//! # Design
//! - `ApiClient` is stateless; it holds only its [`Config`].
//! - Resolution, execution, classification and logging are separate
//!   modules wired together by the façade, so each stage is testable on
//!   its own.
//! - The façade is the single recovery boundary: no fault below it
//!   escapes as `Err` or a panic; everything folds into the outcome.
//! - One connection per call, executed on a worker thread; nothing is
//!   pooled or reused.

pub mod client;
pub mod endpoint;
pub mod executor;
pub mod http;
pub mod logger;
pub mod outcome;
pub mod types;

pub use client::{ApiCall, ApiClient, Config, DEFAULT_CONNECT_TIMEOUT};
pub use endpoint::{resolve, Param};
pub use executor::TransportError;
pub use http::{ApiRequest, Method, RawResponse};
pub use logger::DeferredLog;
pub use outcome::{is_success, ApiError, ApiErrorDetail, CallOutcome};
pub use types::User;
