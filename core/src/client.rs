//! Generic call façade: one entry point for every HTTP call.
//!
//! # Design
//! `ApiClient` holds only its configuration and carries no mutable state
//! between calls. Each invocation resolves the endpoint, executes the
//! round-trip, classifies the status, parses the buffered body and returns
//! a `CallOutcome`; the per-call deferred log is flushed on every exit
//! path before the outcome is handed back. This is the single recovery
//! boundary: transport faults, body serialization failures and parse
//! failures all fold into the exception branch instead of escaping as
//! `Err` or a panic.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::endpoint::{resolve, Param};
use crate::executor;
use crate::http::{ApiRequest, Method};
use crate::logger::{self, DeferredLog};
use crate::outcome::{is_success, ApiError, CallOutcome};
use crate::types::User;

/// Connect timeout used when the configuration does not override it.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Headers applied by the typed convenience calls.
const JSON_HEADERS: &[(&str, &str)] =
    &[("Content-Type", "application/json"), ("charset", "utf-8")];

/// Configuration consumed by the engine: where to call and how long to
/// wait for a connection. Everything else is per call.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub connect_timeout: Duration,
}

impl Config {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// One call, described declaratively: endpoint template, method, headers,
/// parameters and an optional body reference. The method defaults to GET.
pub struct ApiCall<'a, B: Serialize = ()> {
    endpoint: &'a str,
    method: Method,
    headers: &'a [(&'a str, &'a str)],
    path_params: &'a [Param<'a>],
    query_params: &'a [Param<'a>],
    body: Option<&'a B>,
}

impl<'a> ApiCall<'a> {
    pub fn new(endpoint: &'a str) -> Self {
        Self {
            endpoint,
            method: Method::Get,
            headers: &[],
            path_params: &[],
            query_params: &[],
            body: None,
        }
    }

    pub fn get(endpoint: &'a str) -> Self {
        Self::new(endpoint)
    }

    pub fn post(endpoint: &'a str) -> Self {
        Self::new(endpoint).method(Method::Post)
    }

    pub fn put(endpoint: &'a str) -> Self {
        Self::new(endpoint).method(Method::Put)
    }

    pub fn delete(endpoint: &'a str) -> Self {
        Self::new(endpoint).method(Method::Delete)
    }
}

impl<'a, B: Serialize> ApiCall<'a, B> {
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn headers(mut self, headers: &'a [(&'a str, &'a str)]) -> Self {
        self.headers = headers;
        self
    }

    pub fn path_params(mut self, params: &'a [Param<'a>]) -> Self {
        self.path_params = params;
        self
    }

    pub fn query_params(mut self, params: &'a [Param<'a>]) -> Self {
        self.query_params = params;
        self
    }

    /// Attach a body. It is serialized to JSON at call time and written to
    /// the wire only for write-capable methods.
    pub fn body<B2: Serialize>(self, body: &'a B2) -> ApiCall<'a, B2> {
        ApiCall {
            endpoint: self.endpoint,
            method: self.method,
            headers: self.headers,
            path_params: self.path_params,
            query_params: self.query_params,
            body: Some(body),
        }
    }
}

/// Stateless client for the user API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Config,
}

impl ApiClient {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Execute one call and return its three-way outcome. Never panics and
    /// never returns `Err`: every fault is folded into the outcome.
    pub fn call<T, B>(&self, call: ApiCall<'_, B>) -> CallOutcome<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = match call.body.map(serde_json::to_string).transpose() {
            Ok(body) => body,
            Err(err) => {
                return CallOutcome::TransportFailure {
                    message: format!("request body serialization failed: {err}"),
                }
            }
        };

        let endpoint = resolve(call.endpoint, call.path_params, call.query_params);
        let url = format!("{}/{}", self.config.base_url, endpoint.trim_start_matches('/'));
        let request = ApiRequest {
            method: call.method,
            url,
            headers: call
                .headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            body,
        };

        let mut log = DeferredLog::new();
        log.defer(logger::request_entry(&request));

        let outcome = match executor::execute(request.clone(), self.config.connect_timeout) {
            Ok(response) => {
                log.defer(logger::response_entry(&request, &response));
                decode(response.status, &response.body)
            }
            Err(err) => CallOutcome::TransportFailure { message: err.to_string() },
        };

        log.flush_all();
        outcome
    }

    /// Fetch the calling user's profile.
    pub fn get_me(&self) -> CallOutcome<User> {
        self.call(ApiCall::get("user/me").headers(JSON_HEADERS))
    }

    /// Fetch one user by id.
    pub fn get_user(&self, id: u64) -> CallOutcome<User> {
        self.call(
            ApiCall::get("user/{id}")
                .headers(JSON_HEADERS)
                .path_params(&[("id", &id)]),
        )
    }

    /// Create a user and return the backend's echo of it.
    pub fn create_user(&self, user: &User) -> CallOutcome<User> {
        self.call(ApiCall::post("user").headers(JSON_HEADERS).body(user))
    }
}

/// Pick the parse target from the status band and build the outcome. The
/// success band selects the caller's `T`; everything else parses as the
/// structured error payload. A body that fits neither target folds into
/// the exception branch, which deliberately carries no status field.
fn decode<T: DeserializeOwned>(status: u16, body: &str) -> CallOutcome<T> {
    if is_success(status) {
        match serde_json::from_str(body) {
            Ok(result) => CallOutcome::Success { status, result },
            Err(err) => CallOutcome::TransportFailure {
                message: format!("response deserialization failed (status {status}): {err}"),
            },
        }
    } else {
        match serde_json::from_str::<ApiError>(body) {
            Ok(error) => CallOutcome::ApiFailure { status, error },
            Err(err) => CallOutcome::TransportFailure {
                message: format!("error payload deserialization failed (status {status}): {err}"),
            },
        }
    }
}
