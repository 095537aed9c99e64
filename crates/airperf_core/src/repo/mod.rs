//! Data-access contracts and store implementations.
//!
//! # Responsibility
//! - Define the narrow read contract consumed by performance calculations.
//! - Provide SQLite-backed and in-memory stores satisfying it.
//!
//! # Invariants
//! - Stores report a missing aircraft as `RepoError::NotFound`, never as a
//!   transport error.
//! - Stores never mutate records while resolving them.

pub mod aircraft_repo;
pub mod memory_store;
