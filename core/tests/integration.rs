//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the real client
//! through every outcome branch over actual HTTP: typed success, API
//! failure with the structured payload, malformed payloads, and a refused
//! connection. Run with `--nocapture` and `RUST_LOG=debug` to see the
//! deferred request/response log entries render.

use std::net::SocketAddr;
use std::time::Duration;

use api_manager::{ApiCall, ApiClient, CallOutcome, Config, Method, User};

/// Boot the mock server on a random port and return its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn client(addr: SocketAddr) -> ApiClient {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    ApiClient::new(Config::new(&format!("http://{addr}")).connect_timeout(Duration::from_secs(5)))
}

#[test]
fn user_lifecycle() {
    let client = client(start_server());

    // Step 1: fetch the seeded profile.
    let me = client.get_me();
    assert_eq!(me.status(), Some(200));
    assert_eq!(me.result().unwrap().name, "Rick Sanchez");

    // Step 2: create a user without an email; the backend echoes it back
    // with an explicit null that must parse as absent.
    let created = client.create_user(&User { name: "asasd".to_string(), email: None });
    assert_eq!(created.status(), Some(201));
    let echoed = created.result().unwrap();
    assert_eq!(echoed.name, "asasd");
    assert!(echoed.email.is_none());

    // Step 3: the created user landed behind the seeded one.
    let fetched = client.get_user(2);
    assert_eq!(fetched.result().unwrap().name, "asasd");

    // Step 4: an unknown id yields the structured API failure.
    let missing = client.get_user(999);
    assert_eq!(missing.status(), Some(404));
    assert_eq!(missing.api_error().unwrap().error.descripcion, "user not found");
    assert!(missing.result().is_none());
    assert!(missing.exception_error().is_none());
}

#[test]
fn query_params_ride_along_without_changing_the_route() {
    let client = client(start_server());

    let outcome: CallOutcome<User> = client.call(
        ApiCall::get("user/me").query_params(&[("role", &"admin"), ("id", &1)]),
    );
    assert!(outcome.is_success());
}

#[test]
fn path_params_resolve_through_the_generic_call() {
    let client = client(start_server());

    let outcome: CallOutcome<User> =
        client.call(ApiCall::get("user/{id}").path_params(&[("id", &1)]));
    assert_eq!(outcome.status(), Some(200));
    assert_eq!(outcome.result().unwrap().name, "Rick Sanchez");
}

#[test]
fn non_json_error_body_folds_into_the_exception_branch() {
    let client = client(start_server());

    let outcome: CallOutcome<User> = client.call(ApiCall::get("broken"));
    assert_eq!(outcome.status(), None);
    let message = outcome.exception_error().unwrap();
    assert!(message.contains("deserialization failed"), "unexpected message: {message}");
    assert!(message.contains("500"), "unexpected message: {message}");
}

#[test]
fn unknown_verb_is_rejected_by_the_backend() {
    let client = client(start_server());

    // axum has no UPDATE route, so it answers 405 with an empty body,
    // which cannot parse as the structured error payload.
    let outcome: CallOutcome<User> = client.call(ApiCall::new("user/me").method(Method::Update));
    assert_eq!(outcome.status(), None);
    assert!(outcome.exception_error().unwrap().contains("405"));
}

#[test]
fn refused_connection_yields_the_exception_branch() {
    // Bind and drop a listener so nothing answers on the port.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(
        Config::new(&format!("http://{addr}")).connect_timeout(Duration::from_secs(1)),
    );

    let outcome = client.get_me();
    assert_eq!(outcome.status(), None);
    assert!(outcome.result().is_none());
    assert!(outcome.api_error().is_none());
    assert!(!outcome.exception_error().unwrap().is_empty());
}
