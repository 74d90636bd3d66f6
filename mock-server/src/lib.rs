//! In-process stand-in for the user API backend.
//!
//! Serves the routes the client engine calls, with the backend's exact
//! wire shapes: users serialize `email` as an explicit `null` when absent,
//! and failures carry `{"error":{"descripcion":...}}`. DTOs are defined
//! independently of the core crate so integration tests catch schema
//! drift. `/broken` answers with a non-JSON body to exercise the client's
//! malformed-payload path.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ErrorDetail,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub descripcion: String,
}

impl ApiError {
    fn new(descripcion: &str) -> Self {
        Self {
            error: ErrorDetail { descripcion: descripcion.to_string() },
        }
    }
}

pub type Db = Arc<RwLock<HashMap<u64, User>>>;

/// The seeded profile returned by `/user/me` and `/user/1`.
fn me() -> User {
    User {
        name: "Rick Sanchez".to_string(),
        email: Some("rick@example.com".to_string()),
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::from([(1, me())])));
    Router::new()
        .route("/user/me", get(get_me))
        .route("/user", axum::routing::post(create_user))
        .route("/user/{id}", get(get_user))
        .route("/broken", get(broken))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_me() -> Json<User> {
    Json(me())
}

async fn create_user(State(db): State<Db>, Json(input): Json<User>) -> (StatusCode, Json<User>) {
    let mut users = db.write().await;
    let id = users.keys().max().copied().unwrap_or(0) + 1;
    users.insert(id, input.clone());
    (StatusCode::CREATED, Json(input))
}

async fn get_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<User>, (StatusCode, Json<ApiError>)> {
    let users = db.read().await;
    users
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, Json(ApiError::new("user not found"))))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}
