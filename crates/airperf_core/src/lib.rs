//! Core aircraft performance logic.
//! This crate owns the range/endurance calculations and the aircraft store
//! contract they read from.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::aircraft::{
    Aircraft, AircraftId, AircraftPerformanceData, AircraftType, AircraftValidationError,
};
pub use model::performance::{
    AircraftPerformanceSnapshot, EnduranceRequest, EnduranceResult, EnduranceTime, RangeRequest,
    RangeResult,
};
pub use repo::aircraft_repo::{AircraftDataStore, RepoError, RepoResult, SqliteAircraftRepository};
pub use repo::memory_store::InMemoryAircraftStore;
pub use service::performance_service::{
    PerformanceCalculator, PerformanceError, PerformanceResult,
};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
