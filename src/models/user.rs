//! User row and wire shapes, with the explicit mapping between them.
//!
//! The persisted row ([`User`]) and the HTTP representation ([`UserResource`])
//! carry the same four fields, but they are distinct types: the row id is
//! always present, while the resource id is absent on create payloads. The
//! conversions below are the only place fields cross that boundary, so the
//! field list stays auditable at a single call site per direction.

use serde::{Deserialize, Serialize};

/// Persisted user row
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Database-assigned identifier. Never reused once deleted.
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Stored and returned verbatim. This service does no credential
    /// handling; the column holds whatever the client sent.
    pub password: String,
}

/// Insert shape: a user row before the database has assigned its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Wire representation of a user
///
/// Used both for request payloads (POST/PUT, where `id` is null or omitted)
/// and for responses (where `id` is always populated). Two resources are
/// equal iff all four fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResource {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl User {
    /// Map a persisted row to its wire shape
    pub fn into_resource(self) -> UserResource {
        UserResource {
            id: Some(self.id),
            username: self.username,
            email: self.email,
            password: self.password,
        }
    }
}

impl UserResource {
    /// Map a payload to an insert/overwrite shape
    ///
    /// Any id carried by the payload is dropped here: on create the database
    /// assigns one, on update the path id is authoritative.
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            username: self.username,
            email: self.email,
            password: self.password,
        }
    }
}
