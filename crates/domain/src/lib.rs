//! # stockroom-domain
//!
//! Pure domain model for the stockroom inventory tracker.
//!
//! ## Responsibilities
//! - Foundational types: prefixed string identifiers, error conventions
//! - Define **Locations** (the root aggregate, the unit of persistence)
//! - Define **Counters** (owned by exactly one location)
//! - Define **Areas** (owned by exactly one counter, ordered by display order)
//! - Carry **Inventory records** through untouched
//! - Area ordering and id back-fill for partially constructed trees
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod area;
pub mod counter;
pub mod inventory;
pub mod location;
pub mod normalize;
pub mod ordering;
