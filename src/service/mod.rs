//! User service: absence semantics and row/resource translation
//!
//! Sits between the HTTP handlers and the storage collaborator. Absence is
//! carried as `Option`/`bool` inside `Ok`; the error channel is reserved for
//! storage faults. There are no business rules beyond that: the service maps
//! shapes and passes through.

use std::sync::Arc;

use crate::error::Result;
use crate::models::UserResource;
use crate::repository::UserRepository;

/// CRUD operations over users, backed by a [`UserRepository`]
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// All users as wire resources, in storage order
    ///
    /// An empty store yields an empty vec, never an absence marker.
    pub async fn list_users(&self) -> Result<Vec<UserResource>> {
        let users = self.repository.find_all().await?;
        Ok(users.into_iter().map(|user| user.into_resource()).collect())
    }

    /// User with the given id, or `None` if no such row
    pub async fn get_user(&self, id: i64) -> Result<Option<UserResource>> {
        let user = self.repository.find_by_id(id).await?;
        Ok(user.map(|user| user.into_resource()))
    }

    /// Persist a new user and return it with its assigned id
    ///
    /// Any id in the payload is ignored; the storage backend assigns one.
    /// No duplicate checks: two identical payloads make two users.
    pub async fn create_user(&self, resource: UserResource) -> Result<UserResource> {
        let created = self.repository.create(resource.into_new_user()).await?;
        Ok(created.into_resource())
    }

    /// Overwrite the non-id fields of the user with the given id
    ///
    /// The path id is authoritative; an id inside the payload is ignored.
    /// Fields are replaced wholesale, never partially. Returns `None` if the
    /// id does not exist. The write is a single conditional statement, so a
    /// concurrent delete cannot slip between a lookup and the write.
    pub async fn update_user(
        &self,
        id: i64,
        resource: UserResource,
    ) -> Result<Option<UserResource>> {
        let updated = self.repository.update(id, resource.into_new_user()).await?;
        Ok(updated.map(|user| user.into_resource()))
    }

    /// Delete the user with the given id
    ///
    /// Returns `true` iff a row was removed; a second call with the same id
    /// answers `false`.
    pub async fn delete_user(&self, id: i64) -> Result<bool> {
        Ok(self.repository.delete(id).await?)
    }

    /// Probe the storage backend, for readiness checks
    pub async fn ping(&self) -> Result<()> {
        Ok(self.repository.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::InMemoryUserRepository;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserRepository::new()))
    }

    fn resource(name: &str) -> UserResource {
        UserResource {
            id: None,
            username: name.to_string(),
            email: format!("{}@example.com", name),
            password: "password".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_users_empty_store_yields_empty_vec() {
        let service = service();
        assert_eq!(service.list_users().await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_create_user_assigns_id_and_echoes_fields() {
        let service = service();
        let created = service.create_user(resource("admin")).await.unwrap();
        assert_eq!(created.id, Some(1));
        assert_eq!(created.username, "admin");
        assert_eq!(created.email, "admin@example.com");
        assert_eq!(created.password, "password");
    }

    #[tokio::test]
    async fn test_create_user_ignores_supplied_id() {
        let service = service();
        let mut payload = resource("admin");
        payload.id = Some(42);
        let created = service.create_user(payload).await.unwrap();
        assert_eq!(created.id, Some(1));
    }

    #[tokio::test]
    async fn test_create_users_get_distinct_ids() {
        let service = service();
        let first = service.create_user(resource("admin")).await.unwrap();
        let second = service.create_user(resource("user01")).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_get_user_roundtrip_and_absent() {
        let service = service();
        let created = service.create_user(resource("admin")).await.unwrap();

        let fetched = service.get_user(1).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        assert!(service.get_user(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_users_reflects_creates_and_deletes() {
        let service = service();
        service.create_user(resource("admin")).await.unwrap();
        service.create_user(resource("user01")).await.unwrap();
        service.create_user(resource("user02")).await.unwrap();
        assert!(service.delete_user(2).await.unwrap());

        let users = service.list_users().await.unwrap();
        let ids: Vec<Option<i64>> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![Some(1), Some(3)]);
    }

    #[tokio::test]
    async fn test_update_user_overwrites_wholesale() {
        let service = service();
        service.create_user(resource("admin")).await.unwrap();

        let updated = service
            .update_user(1, resource("admin1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, Some(1));
        assert_eq!(updated.username, "admin1");
        assert_eq!(updated.email, "admin1@example.com");

        let fetched = service.get_user(1).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_user_is_idempotent() {
        let service = service();
        service.create_user(resource("admin")).await.unwrap();

        let once = service.update_user(1, resource("admin1")).await.unwrap();
        let twice = service.update_user(1, resource("admin1")).await.unwrap();
        assert_eq!(once, twice);
        assert_eq!(service.get_user(1).await.unwrap(), once);
    }

    #[tokio::test]
    async fn test_update_user_ignores_payload_id() {
        let service = service();
        service.create_user(resource("admin")).await.unwrap();

        let mut payload = resource("admin1");
        payload.id = Some(99);
        let updated = service.update_user(1, payload).await.unwrap().unwrap();
        assert_eq!(updated.id, Some(1));
        assert!(service.get_user(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_user_returns_none() {
        let service = service();
        assert!(service
            .update_user(99, resource("ghost"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_user_true_once_then_false() {
        let service = service();
        service.create_user(resource("admin")).await.unwrap();

        assert!(service.delete_user(1).await.unwrap());
        assert!(!service.delete_user(1).await.unwrap());
        assert!(service.get_user(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ping() {
        let service = service();
        assert!(service.ping().await.is_ok());
    }
}
