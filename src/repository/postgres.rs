//! PostgreSQL repository backend
//!
//! Plain `query_as` with runtime binding; the schema lives in
//! `migrations/0001_create_users.sql`. Presence is decided by the statement
//! itself: updates use `RETURNING` with `fetch_optional`, deletes use the
//! affected-row count.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{NewUser, User};

use super::{RepositoryOperation, RepositoryResult, UserRepository};

/// sqlx-backed [`UserRepository`] over the users table
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            super::RepositoryError::from(e).with_operation(RepositoryOperation::FindAll)
        })
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            super::RepositoryError::from(e).with_operation(RepositoryOperation::FindById)
        })
    }

    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                super::RepositoryError::from(e).with_operation(RepositoryOperation::Exists)
            })
    }

    async fn create(&self, user: NewUser) -> RepositoryResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            super::RepositoryError::from(e).with_operation(RepositoryOperation::Create)
        })
    }

    async fn update(&self, id: i64, changes: NewUser) -> RepositoryResult<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $2, email = $3, password = $4
            WHERE id = $1
            RETURNING id, username, email, password
            "#,
        )
        .bind(id)
        .bind(&changes.username)
        .bind(&changes.email)
        .bind(&changes.password)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            super::RepositoryError::from(e).with_operation(RepositoryOperation::Update)
        })
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                super::RepositoryError::from(e).with_operation(RepositoryOperation::Delete)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| {
                super::RepositoryError::from(e).with_operation(RepositoryOperation::Ping)
            })
    }
}
