//! # stockroom-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `LocationRepository` port defined in `stockroom-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between location aggregates and JSON document rows
//!
//! ## Dependency rule
//! Depends on `stockroom-app` (for port traits) and `stockroom-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod location_repo;
pub mod pool;

pub use location_repo::SqliteLocationRepository;
pub use pool::{Config, Database};
