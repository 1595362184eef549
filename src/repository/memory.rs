//! In-memory repository backend
//!
//! Keeps rows in a mutex-guarded map and assigns ids from a counter that
//! only moves forward, so deleted ids are never handed out again. Used by
//! the test suite and when the service is configured without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::{NewUser, User};

use super::{RepositoryResult, UserRepository};

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<i64, User>,
    next_id: i64,
}

/// Map-backed [`UserRepository`]
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: Mutex<Inner>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        let inner = self.inner.lock().await;
        let mut users: Vec<User> = inner.users.values().cloned().collect();
        // HashMap iteration order is arbitrary; listing in id order keeps
        // the endpoint deterministic like the sequence-backed table.
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let inner = self.inner.lock().await;
        Ok(inner.users.contains_key(&id))
    }

    async fn create(&self, user: NewUser) -> RepositoryResult<User> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            username: user.username,
            email: user.email,
            password: user.password,
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, changes: NewUser) -> RepositoryResult<Option<User>> {
        let mut inner = self.inner.lock().await;
        match inner.users.get_mut(&id) {
            Some(user) => {
                user.username = changes.username;
                user.email = changes.email;
                user.password = changes.password;
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let mut inner = self.inner.lock().await;
        Ok(inner.users.remove(&id).is_some())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}
