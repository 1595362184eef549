//! Storage collaborator for the user table
//!
//! The service layer talks to storage exclusively through the
//! [`UserRepository`] trait, so the backend can be swapped without touching
//! request handling. Two backends ship with the crate:
//!
//! - [`postgres::PgUserRepository`]: sqlx/PostgreSQL, the production backend
//! - [`memory::InMemoryUserRepository`]: a mutex-guarded map, used by the
//!   test suite and for running without a database

use async_trait::async_trait;

use crate::models::{NewUser, User};

mod error;
pub mod memory;
pub mod postgres;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Row-level CRUD primitives over the users table
///
/// Absence is part of the return types, not the error channel:
/// `find_by_id`/`update` answer `None` and `delete` answers `false` for an
/// id with no row. A `RepositoryError` always means the backend itself
/// failed.
///
/// `update` and `delete` are single conditional writes. The row count of the
/// statement decides presence, so there is no check-then-act window between
/// an existence probe and the write.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All rows, in storage order
    async fn find_all(&self) -> RepositoryResult<Vec<User>>;

    /// Row with the given id, or `None`
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>>;

    /// Whether a row with the given id exists
    async fn exists(&self, id: i64) -> RepositoryResult<bool>;

    /// Insert a new row and return it with its assigned id
    ///
    /// Ids are assigned monotonically and never reused, even after the row
    /// they belonged to is deleted.
    async fn create(&self, user: NewUser) -> RepositoryResult<User>;

    /// Overwrite the non-id fields of the row with the given id
    ///
    /// Returns the updated row, or `None` if no row matched.
    async fn update(&self, id: i64, changes: NewUser) -> RepositoryResult<Option<User>>;

    /// Delete the row with the given id
    ///
    /// Returns `true` iff a row was removed.
    async fn delete(&self, id: i64) -> RepositoryResult<bool>;

    /// Cheap liveness probe against the backend, for readiness checks
    async fn ping(&self) -> RepositoryResult<()>;
}
