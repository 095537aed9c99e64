//! Range and endurance calculation service.
//!
//! # Responsibility
//! - Validate caller inputs before touching the store.
//! - Resolve exactly one aircraft snapshot per calculation.
//! - Apply the linear range/endurance formulas.
//!
//! # Invariants
//! - The calculator holds no mutable state; calls are independent.
//! - Invalid input never reaches the store.
//! - Non-finite or non-positive `fuel_consumption` is reported as invalid
//!   aircraft data, never as a division result.
//! - Results are always finite; overflowing flight times are invalid input.
//! - Range is not clamped: a headwind stronger than cruise speed yields a
//!   negative range, meaning no forward progress is possible.

use crate::model::aircraft::AircraftId;
use crate::model::performance::{
    AircraftPerformanceSnapshot, EnduranceRequest, EnduranceResult, EnduranceTime, RangeRequest,
    RangeResult,
};
use crate::repo::aircraft_repo::{AircraftDataStore, RepoError};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type PerformanceResult<T> = Result<T, PerformanceError>;

/// Error kinds surfaced by performance calculations.
#[derive(Debug)]
pub enum PerformanceError {
    /// Caller arguments are malformed; the store was not queried.
    InvalidInput(String),
    /// No aircraft has the requested id.
    NotFound(AircraftId),
    /// The stored record cannot support the formulas.
    InvalidAircraftData {
        aircraft_id: AircraftId,
        reason: String,
    },
    /// Store or transport failure unrelated to the request itself.
    Store(RepoError),
}

impl PerformanceError {
    /// Stable machine-readable code used in log lines and by callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NotFound(_) => "not_found",
            Self::InvalidAircraftData { .. } => "invalid_aircraft_data",
            Self::Store(_) => "store_failure",
        }
    }

    fn from_store(err: RepoError, aircraft_id: AircraftId) -> Self {
        match err {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::InvalidData(reason) => Self::InvalidAircraftData {
                aircraft_id,
                reason,
            },
            RepoError::Validation(err) => Self::InvalidAircraftData {
                aircraft_id,
                reason: err.to_string(),
            },
            other => Self::Store(other),
        }
    }
}

impl Display for PerformanceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::NotFound(id) => write!(f, "aircraft not found: {id}"),
            Self::InvalidAircraftData {
                aircraft_id,
                reason,
            } => write!(f, "invalid data for aircraft {aircraft_id}: {reason}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PerformanceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

/// Stateless calculator over an explicit read-only aircraft store.
pub struct PerformanceCalculator<S: AircraftDataStore> {
    store: S,
}

impl<S: AircraftDataStore> PerformanceCalculator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Computes maximum endurance for `fuel` as `HH:MM`.
    ///
    /// # Errors
    /// - `InvalidInput` for a non-positive id or negative/non-finite fuel.
    /// - `NotFound` when the aircraft does not exist.
    /// - `InvalidAircraftData` when `fuel_consumption` is not finite and positive.
    /// - `InvalidInput` when the flight time does not fit `EnduranceTime`.
    pub fn calculate_endurance(
        &self,
        request: &EnduranceRequest,
    ) -> PerformanceResult<EnduranceResult> {
        let started_at = Instant::now();
        validate_aircraft_id(request.aircraft_id)?;
        validate_fuel(request.fuel)?;

        let snapshot = self.resolve(request.aircraft_id)?;
        let hours = flight_hours(&snapshot, request.fuel)?;
        let endurance = EnduranceTime::from_hours(hours)
            .ok_or_else(|| {
                PerformanceError::InvalidInput(format!("cannot render {hours} flight hours"))
            })?
            .to_string();

        debug!(
            "event=calculate_endurance module=service status=ok aircraft_id={} duration_ms={}",
            request.aircraft_id,
            started_at.elapsed().as_millis()
        );
        Ok(EnduranceResult {
            name: snapshot.name,
            endurance,
        })
    }

    /// Computes maximum range for `fuel` given a signed along-track wind.
    ///
    /// `range = fuel / fuel_consumption * (cruise_speed + wind_speed)`, with
    /// no rounding and no clamping at zero.
    ///
    /// # Errors
    /// - `InvalidInput` for a non-positive id, negative/non-finite fuel or
    ///   non-finite wind speed.
    /// - `NotFound` when the aircraft does not exist.
    /// - `InvalidAircraftData` when `fuel_consumption` is not finite and positive.
    /// - `InvalidInput` when the flight time or the range overflows.
    pub fn calculate_range(&self, request: &RangeRequest) -> PerformanceResult<RangeResult> {
        let started_at = Instant::now();
        validate_aircraft_id(request.aircraft_id)?;
        validate_fuel(request.fuel)?;
        if !request.wind_speed.is_finite() {
            return Err(PerformanceError::InvalidInput(format!(
                "wind_speed must be finite, got {}",
                request.wind_speed
            )));
        }

        let snapshot = self.resolve(request.aircraft_id)?;
        let hours = flight_hours(&snapshot, request.fuel)?;
        let ground_speed = snapshot.performance.cruise_speed + request.wind_speed;
        let range = hours * ground_speed;
        if !range.is_finite() {
            return Err(PerformanceError::InvalidInput(format!(
                "range for fuel {} overflows",
                request.fuel
            )));
        }

        debug!(
            "event=calculate_range module=service status=ok aircraft_id={} negative_ground_speed={} duration_ms={}",
            request.aircraft_id,
            ground_speed < 0.0,
            started_at.elapsed().as_millis()
        );
        Ok(RangeResult {
            name: snapshot.name,
            range,
        })
    }

    fn resolve(&self, aircraft_id: AircraftId) -> PerformanceResult<AircraftPerformanceSnapshot> {
        self.store.resolve(aircraft_id).map_err(|err| {
            let err = PerformanceError::from_store(err, aircraft_id);
            match &err {
                PerformanceError::NotFound(_) => debug!(
                    "event=aircraft_resolve module=service status=error aircraft_id={aircraft_id} error_code={}",
                    err.code()
                ),
                _ => warn!(
                    "event=aircraft_resolve module=service status=error aircraft_id={aircraft_id} error_code={} error={}",
                    err.code(),
                    err
                ),
            }
            err
        })
    }
}

fn validate_aircraft_id(aircraft_id: AircraftId) -> PerformanceResult<()> {
    if aircraft_id <= 0 {
        return Err(PerformanceError::InvalidInput(format!(
            "aircraft_id must be positive, got {aircraft_id}"
        )));
    }
    Ok(())
}

fn validate_fuel(fuel: f64) -> PerformanceResult<()> {
    if !fuel.is_finite() || fuel < 0.0 {
        return Err(PerformanceError::InvalidInput(format!(
            "fuel must be a finite non-negative number, got {fuel}"
        )));
    }
    Ok(())
}

fn flight_hours(snapshot: &AircraftPerformanceSnapshot, fuel: f64) -> PerformanceResult<f64> {
    let consumption = snapshot.performance.fuel_consumption;
    if !consumption.is_finite() || consumption <= 0.0 {
        warn!(
            "event=aircraft_data_rejected module=service status=error aircraft_id={} error_code=invalid_fuel_consumption",
            snapshot.aircraft_id
        );
        return Err(PerformanceError::InvalidAircraftData {
            aircraft_id: snapshot.aircraft_id,
            reason: format!("fuel_consumption must be finite and positive, got {consumption}"),
        });
    }

    let hours = fuel / consumption;
    if hours >= EnduranceTime::MAX_HOURS {
        return Err(PerformanceError::InvalidInput(format!(
            "fuel {fuel} at consumption {consumption} exceeds the representable flight time"
        )));
    }
    Ok(hours)
}
