//! SQLite storage bootstrap for the aircraft catalog.
//!
//! # Responsibility
//! - Open and configure SQLite connections backing the aircraft store.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - No aircraft data is read or written before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, open_existing_db, ping_db};

pub type DbResult<T> = Result<T, DbError>;

/// Failures of the aircraft catalog database layer.
#[derive(Debug)]
pub enum DbError {
    /// The catalog at `target` could not be opened (missing file, bad path).
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// Pragmas, migrations or catalog queries failed on an open connection.
    Sqlite(rusqlite::Error),
    /// The catalog was migrated by a newer airperf build.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "cannot open aircraft catalog `{target}`: {source}")
            }
            Self::Sqlite(err) => write!(f, "aircraft catalog query failed: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "aircraft catalog schema v{found} needs a newer airperf (this build reads up to v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
