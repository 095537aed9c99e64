//! Aircraft domain model.
//!
//! # Responsibility
//! - Define the aircraft record and its one-to-one performance data.
//! - Provide validation shared by write and read paths.
//!
//! # Invariants
//! - `id` is positive and never reused for another aircraft.
//! - `performance.fuel_consumption` is strictly positive for stored records.
//! - `first_flight` is an ISO calendar date (`YYYY-MM-DD`).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static FIRST_FLIGHT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex")
});

/// Externally assigned aircraft identifier.
pub type AircraftId = i64;

/// Aircraft role category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AircraftType {
    Trainer,
    Transport,
    Fighter,
    Bomber,
    Helicopter,
    Utility,
}

/// Performance characteristics stored alongside one aircraft.
///
/// All values share the unit system chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftPerformanceData {
    /// Fuel burned per unit time at cruise.
    pub fuel_consumption: f64,
    /// Service ceiling.
    pub ceiling: f64,
    /// Empty weight.
    pub weight: f64,
    /// Maximum fuel capacity.
    pub fuel: f64,
    /// Maximum take-off weight.
    pub take_off_weight: f64,
    pub max_speed: f64,
    /// Steady-state forward speed with no wind.
    pub cruise_speed: f64,
}

/// Canonical aircraft record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: AircraftId,
    pub name: String,
    pub manufacturer: String,
    /// Serialized as `aircraft_type` to match the stored column name.
    #[serde(rename = "aircraft_type")]
    pub kind: AircraftType,
    /// Calendar date of the first flight, `YYYY-MM-DD`.
    pub first_flight: String,
    #[serde(rename = "aircraft_data")]
    pub performance: AircraftPerformanceData,
}

/// Validation errors for aircraft records.
#[derive(Debug, Clone, PartialEq)]
pub enum AircraftValidationError {
    NonPositiveId(AircraftId),
    EmptyName,
    EmptyManufacturer,
    InvalidFirstFlight(String),
    /// A performance value is negative, NaN or infinite.
    InvalidPerformanceValue { field: &'static str, value: f64 },
    NonPositiveFuelConsumption(f64),
}

impl Display for AircraftValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveId(id) => write!(f, "aircraft id must be positive, got {id}"),
            Self::EmptyName => write!(f, "aircraft name cannot be empty"),
            Self::EmptyManufacturer => write!(f, "aircraft manufacturer cannot be empty"),
            Self::InvalidFirstFlight(value) => {
                write!(f, "first flight must be a YYYY-MM-DD date, got `{value}`")
            }
            Self::InvalidPerformanceValue { field, value } => {
                write!(f, "performance value `{field}` must be finite and >= 0, got {value}")
            }
            Self::NonPositiveFuelConsumption(value) => {
                write!(f, "fuel consumption must be positive, got {value}")
            }
        }
    }
}

impl Error for AircraftValidationError {}

impl AircraftPerformanceData {
    /// Validates numeric fields.
    ///
    /// # Errors
    /// - Any value negative or non-finite.
    /// - `fuel_consumption` equal to zero.
    pub fn validate(&self) -> Result<(), AircraftValidationError> {
        for (field, value) in self.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(AircraftValidationError::InvalidPerformanceValue { field, value });
            }
        }
        if self.fuel_consumption <= 0.0 {
            return Err(AircraftValidationError::NonPositiveFuelConsumption(
                self.fuel_consumption,
            ));
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("fuel_consumption", self.fuel_consumption),
            ("ceiling", self.ceiling),
            ("weight", self.weight),
            ("fuel", self.fuel),
            ("take_off_weight", self.take_off_weight),
            ("max_speed", self.max_speed),
            ("cruise_speed", self.cruise_speed),
        ]
    }
}

impl Aircraft {
    /// Validates the record before persistence or after loading it back.
    pub fn validate(&self) -> Result<(), AircraftValidationError> {
        if self.id <= 0 {
            return Err(AircraftValidationError::NonPositiveId(self.id));
        }
        if self.name.trim().is_empty() {
            return Err(AircraftValidationError::EmptyName);
        }
        if self.manufacturer.trim().is_empty() {
            return Err(AircraftValidationError::EmptyManufacturer);
        }
        if !FIRST_FLIGHT_RE.is_match(&self.first_flight) {
            return Err(AircraftValidationError::InvalidFirstFlight(
                self.first_flight.clone(),
            ));
        }
        self.performance.validate()
    }
}
