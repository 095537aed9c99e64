//! Aircraft store contract and SQLite implementation.
//!
//! # Responsibility
//! - Resolve an aircraft id into a performance snapshot.
//! - Provide seeding and catalog reads over `aircraft` + `aircraft_data`.
//!
//! # Invariants
//! - Write paths call `Aircraft::validate()` before SQL mutations.
//! - An aircraft row without its `aircraft_data` row, or with a column value
//!   of the wrong storage type, is reported as `RepoError::InvalidData`.

use crate::db::DbError;
use crate::model::aircraft::{
    Aircraft, AircraftId, AircraftPerformanceData, AircraftType, AircraftValidationError,
};
use crate::model::performance::AircraftPerformanceSnapshot;
use rusqlite::types::FromSql;
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const AIRCRAFT_SELECT_SQL: &str = "SELECT
    a.aircraft_id,
    a.name,
    a.manufacturer,
    a.aircraft_type,
    a.first_flight,
    d.aircraft_id AS data_aircraft_id,
    d.fuel_consumption,
    d.ceiling,
    d.weight,
    d.fuel,
    d.take_off_weight,
    d.max_speed,
    d.cruise_speed
FROM aircraft a
LEFT JOIN aircraft_data d ON d.aircraft_id = a.aircraft_id";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for aircraft persistence and lookup.
#[derive(Debug)]
pub enum RepoError {
    Validation(AircraftValidationError),
    Db(DbError),
    NotFound(AircraftId),
    AlreadyExists(AircraftId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "aircraft not found: {id}"),
            Self::AlreadyExists(id) => write!(f, "aircraft already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted aircraft data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::AlreadyExists(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<AircraftValidationError> for RepoError {
    fn from(value: AircraftValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read contract consumed by performance calculations.
///
/// Implementations need not validate `aircraft_id`; callers do.
pub trait AircraftDataStore {
    /// Resolves one aircraft into an immutable performance snapshot.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no aircraft has this id.
    /// - `RepoError::InvalidData` when the aircraft has no performance record.
    fn resolve(&self, aircraft_id: AircraftId) -> RepoResult<AircraftPerformanceSnapshot>;
}

impl<S: AircraftDataStore + ?Sized> AircraftDataStore for &S {
    fn resolve(&self, aircraft_id: AircraftId) -> RepoResult<AircraftPerformanceSnapshot> {
        (**self).resolve(aircraft_id)
    }
}

/// SQLite-backed aircraft repository.
pub struct SqliteAircraftRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAircraftRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts one aircraft and its performance data atomically.
    ///
    /// # Errors
    /// - `RepoError::Validation` when the record fails `Aircraft::validate()`.
    /// - `RepoError::AlreadyExists` when the id is taken.
    pub fn create_aircraft(&self, aircraft: &Aircraft) -> RepoResult<AircraftId> {
        aircraft.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let inserted = tx.execute(
            "INSERT INTO aircraft (
                aircraft_id,
                name,
                manufacturer,
                aircraft_type,
                first_flight
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                aircraft.id,
                aircraft.name.as_str(),
                aircraft.manufacturer.as_str(),
                aircraft_type_to_db(aircraft.kind),
                aircraft.first_flight.as_str(),
            ],
        );
        if let Err(err) = inserted {
            return Err(map_insert_error(err, aircraft.id));
        }

        let data = &aircraft.performance;
        tx.execute(
            "INSERT INTO aircraft_data (
                aircraft_id,
                fuel_consumption,
                ceiling,
                weight,
                fuel,
                take_off_weight,
                max_speed,
                cruise_speed
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                aircraft.id,
                data.fuel_consumption,
                data.ceiling,
                data.weight,
                data.fuel,
                data.take_off_weight,
                data.max_speed,
                data.cruise_speed,
            ],
        )?;
        tx.commit()?;

        Ok(aircraft.id)
    }

    /// Gets one fully validated aircraft record.
    pub fn get_aircraft(&self, id: AircraftId) -> RepoResult<Option<Aircraft>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AIRCRAFT_SELECT_SQL} WHERE a.aircraft_id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_aircraft_row(row)?)),
            None => Ok(None),
        }
    }

    /// Lists all aircraft ordered by id.
    ///
    /// Fails on the first persisted record that does not validate.
    pub fn list_aircraft(&self) -> RepoResult<Vec<Aircraft>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AIRCRAFT_SELECT_SQL} ORDER BY a.aircraft_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut aircraft = Vec::new();
        while let Some(row) = rows.next()? {
            aircraft.push(parse_aircraft_row(row)?);
        }
        Ok(aircraft)
    }
}

impl AircraftDataStore for SqliteAircraftRepository<'_> {
    fn resolve(&self, aircraft_id: AircraftId) -> RepoResult<AircraftPerformanceSnapshot> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AIRCRAFT_SELECT_SQL} WHERE a.aircraft_id = ?1;"))?;
        let mut rows = stmt.query([aircraft_id])?;
        let Some(row) = rows.next()? else {
            return Err(RepoError::NotFound(aircraft_id));
        };

        // Range checks on fuel_consumption belong to the calculator.
        Ok(AircraftPerformanceSnapshot {
            aircraft_id,
            name: read_column(row, "name", aircraft_id)?,
            performance: parse_performance(row, aircraft_id)?,
        })
    }
}

fn parse_aircraft_row(row: &Row<'_>) -> RepoResult<Aircraft> {
    let id: AircraftId = row.get("aircraft_id")?;
    let type_text: String = read_column(row, "aircraft_type", id)?;
    let kind = parse_aircraft_type(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid aircraft type `{type_text}` in aircraft.aircraft_type"
        ))
    })?;

    let aircraft = Aircraft {
        id,
        name: read_column(row, "name", id)?,
        manufacturer: read_column(row, "manufacturer", id)?,
        kind,
        first_flight: read_column(row, "first_flight", id)?,
        performance: parse_performance(row, id)?,
    };
    aircraft
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("aircraft {id}: {err}")))?;
    Ok(aircraft)
}

fn parse_performance(row: &Row<'_>, id: AircraftId) -> RepoResult<AircraftPerformanceData> {
    if row.get::<_, Option<AircraftId>>("data_aircraft_id")?.is_none() {
        return Err(RepoError::InvalidData(format!(
            "aircraft {id} has no aircraft_data record"
        )));
    }

    Ok(AircraftPerformanceData {
        fuel_consumption: read_column(row, "fuel_consumption", id)?,
        ceiling: read_column(row, "ceiling", id)?,
        weight: read_column(row, "weight", id)?,
        fuel: read_column(row, "fuel", id)?,
        take_off_weight: read_column(row, "take_off_weight", id)?,
        max_speed: read_column(row, "max_speed", id)?,
        cruise_speed: read_column(row, "cruise_speed", id)?,
    })
}

/// Reads one column, reporting a stored value of the wrong type as bad data.
fn read_column<T: FromSql>(row: &Row<'_>, column: &str, id: AircraftId) -> RepoResult<T> {
    row.get(column).map_err(|err| match err {
        rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => RepoError::InvalidData(format!(
            "aircraft {id}: unreadable `{column}`: {err}"
        )),
        other => other.into(),
    })
}

fn map_insert_error(err: rusqlite::Error, id: AircraftId) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.code == ErrorCode::ConstraintViolation {
            return RepoError::AlreadyExists(id);
        }
    }
    err.into()
}

fn aircraft_type_to_db(kind: AircraftType) -> &'static str {
    match kind {
        AircraftType::Trainer => "trainer",
        AircraftType::Transport => "transport",
        AircraftType::Fighter => "fighter",
        AircraftType::Bomber => "bomber",
        AircraftType::Helicopter => "helicopter",
        AircraftType::Utility => "utility",
    }
}

fn parse_aircraft_type(value: &str) -> Option<AircraftType> {
    match value {
        "trainer" => Some(AircraftType::Trainer),
        "transport" => Some(AircraftType::Transport),
        "fighter" => Some(AircraftType::Fighter),
        "bomber" => Some(AircraftType::Bomber),
        "helicopter" => Some(AircraftType::Helicopter),
        "utility" => Some(AircraftType::Utility),
        _ => None,
    }
}
