//! Core use-case services.
//!
//! # Responsibility
//! - Turn resolved aircraft data plus caller inputs into performance results.
//! - Keep transport and storage layers out of the calculation path.

pub mod performance_service;
