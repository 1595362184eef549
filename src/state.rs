//! Application state shared across handlers

use std::sync::Arc;

use crate::{config::Config, service::UserService};

/// Handler state: configuration plus the user service
///
/// Cheap to clone; both halves are behind `Arc`s. All mutable state lives in
/// the storage backend the service wraps, so the state itself is read-only.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    users: UserService,
}

impl AppState {
    /// Create a new AppState with the given configuration and service
    pub fn new(config: Config, users: UserService) -> Self {
        Self {
            config: Arc::new(config),
            users,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the user service
    pub fn users(&self) -> &UserService {
        &self.users
    }
}
