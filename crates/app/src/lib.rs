//! # stockroom-app
//!
//! Application layer: the location store and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `LocationRepository`: load, save and delete whole location aggregates
//! - Provide the **driving/inbound** use-case struct:
//!   - `LocationStore`: in-memory cache of locations with CRUD at every level
//!     of the location → counter → area tree
//! - Provide **in-process infrastructure** (subscriber registry) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `stockroom-domain` only (plus `tracing`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
pub mod subscribers;
