//! Domain model for aircraft records and performance calculations.
//!
//! # Responsibility
//! - Define canonical aircraft and performance-data structures.
//! - Define the statically declared request/result shapes of the two
//!   performance operations.
//!
//! # Invariants
//! - Every aircraft is identified by a positive, externally assigned `AircraftId`.
//! - Every aircraft owns exactly one `AircraftPerformanceData` record.

pub mod aircraft;
pub mod performance;
