//! # users-service
//!
//! A CRUD REST service for a single user resource, backed by a relational
//! table and exposed over HTTP with JSON payloads.
//!
//! Three layers, leaf to root:
//!
//! - [`repository`]: row-level CRUD over the users table, behind a trait
//!   with PostgreSQL and in-memory backends
//! - [`service`]: absence semantics and the mapping between rows and wire
//!   resources
//! - [`handlers`]: verb/path routing and the status-code contract
//!
//! Everything else is plumbing: [`config`] (figment), [`observability`]
//! (tracing), [`error`] (thiserror + JSON error bodies), [`server`] (axum
//! with graceful shutdown), and [`health`] probes.

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod health;
pub mod models;
pub mod observability;
pub mod repository;
pub mod responses;
pub mod server;
pub mod service;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
