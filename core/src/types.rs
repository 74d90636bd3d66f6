//! Domain DTOs for the user API.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently
//! of the mock server's; integration tests catch schema drift. `email` is
//! omitted from outgoing JSON when absent (the backend tolerates both a
//! missing field and an explicit `null` on input and may answer with
//! either).

use serde::{Deserialize, Serialize};

/// A user as the backend represents it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
