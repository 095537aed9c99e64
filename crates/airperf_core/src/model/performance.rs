//! Request, snapshot and result shapes for performance calculations.
//!
//! # Responsibility
//! - Declare the input fields of the range/endurance operations statically.
//! - Carry the read-only aircraft snapshot used by one calculation.
//! - Convert fractional flight hours into the `HH:MM` endurance form.
//!
//! # Invariants
//! - `EnduranceTime::minutes` is always in `0..60`.
//! - Rendered endurance matches `^\d{2,}:\d{2}$`.

use crate::model::aircraft::{Aircraft, AircraftId, AircraftPerformanceData};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Immutable view of one aircraft resolved for a single calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftPerformanceSnapshot {
    pub aircraft_id: AircraftId,
    pub name: String,
    pub performance: AircraftPerformanceData,
}

impl From<&Aircraft> for AircraftPerformanceSnapshot {
    fn from(value: &Aircraft) -> Self {
        Self {
            aircraft_id: value.id,
            name: value.name.clone(),
            performance: value.performance,
        }
    }
}

/// Input of the range operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeRequest {
    pub aircraft_id: AircraftId,
    /// Signed along-track wind; positive is tailwind, negative is headwind.
    pub wind_speed: f64,
    pub fuel: f64,
}

/// Input of the endurance operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnduranceRequest {
    pub aircraft_id: AircraftId,
    pub fuel: f64,
}

/// Output of the range operation.
///
/// `range` is negative when the headwind exceeds cruise speed, meaning no
/// forward progress is possible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeResult {
    pub name: String,
    pub range: f64,
}

/// Output of the endurance operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnduranceResult {
    pub name: String,
    /// Zero-padded `HH:MM`; hours grow past two digits when needed.
    pub endurance: String,
}

/// Whole hours and minutes of airborne time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnduranceTime {
    pub hours: u64,
    pub minutes: u8,
}

impl EnduranceTime {
    /// Exclusive upper bound of fractional hours that fit `hours: u64`.
    pub const MAX_HOURS: f64 = u64::MAX as f64;

    /// Splits fractional hours into whole hours and rounded minutes.
    ///
    /// Minutes that round up to 60 carry into the next hour. Returns `None`
    /// for NaN, negative or infinite values and for values of at least
    /// `MAX_HOURS`.
    pub fn from_hours(hours: f64) -> Option<Self> {
        if !(0.0..Self::MAX_HOURS).contains(&hours) {
            return None;
        }
        let floor = hours.floor();
        let mut minutes = ((hours - floor) * 60.0).round() as u8;
        // `floor` is below 2^64 and floats that large are spaced by 4096,
        // so the carry cannot overflow.
        let mut whole = floor as u64;
        if minutes >= 60 {
            whole += 1;
            minutes = 0;
        }
        Some(Self {
            hours: whole,
            minutes,
        })
    }
}

impl Display for EnduranceTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}
