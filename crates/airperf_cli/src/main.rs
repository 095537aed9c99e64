//! Command-line entry point for aircraft performance queries.
//!
//! # Responsibility
//! - Parse statically declared arguments and open the aircraft database.
//! - Map core results to JSON on stdout and core errors to exit codes.

use airperf_core::db::{open_db, open_existing_db, ping_db};
use airperf_core::{
    init_logging, Aircraft, EnduranceRequest, PerformanceCalculator, PerformanceError,
    RangeRequest, RepoError, SqliteAircraftRepository,
};
use clap::{Parser, Subcommand};
use log::error;
use serde_json::json;
use std::error::Error;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_INTERNAL: u8 = 1;
const EXIT_INVALID_INPUT: u8 = 2;
const EXIT_NOT_FOUND: u8 = 3;
const EXIT_INVALID_AIRCRAFT_DATA: u8 = 4;

#[derive(Debug, Parser)]
#[command(name = "airperf", version, about = "Aircraft range and endurance calculator")]
struct Args {
    /// SQLite database holding the aircraft catalog.
    #[arg(long, env = "AIRPERF_DB", default_value = "aircraft.db")]
    db: PathBuf,
    #[arg(
        long,
        env = "AIRPERF_LOG_LEVEL",
        default_value_t = airperf_core::default_log_level().to_string()
    )]
    log_level: String,
    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "AIRPERF_LOG_DIR")]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Checks that an existing database can be opened and queried.
    Health,
    /// Lists all aircraft as JSON.
    List,
    /// Adds one aircraft from a JSON file, or `-` for stdin.
    Add { source: String },
    /// Maximum range for a fuel load and along-track wind.
    Range {
        #[arg(long)]
        aircraft_id: i64,
        /// Positive for tailwind, negative for headwind.
        #[arg(long, allow_hyphen_values = true)]
        wind_speed: f64,
        #[arg(long)]
        fuel: f64,
    },
    /// Maximum endurance for a fuel load, as HH:MM.
    Endurance {
        #[arg(long)]
        aircraft_id: i64,
        #[arg(long)]
        fuel: f64,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(log_dir) = args.log_dir.as_deref() {
        if let Err(err) = init_logging(&args.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            error!(
                "event=cli_command module=cli status=error exit_code={} error={}",
                failure.exit_code, failure.message
            );
            eprintln!("{}", failure.message);
            ExitCode::from(failure.exit_code)
        }
    }
}

#[derive(Debug)]
struct Failure {
    exit_code: u8,
    message: String,
}

impl Failure {
    fn internal(err: impl Error) -> Self {
        Self {
            exit_code: EXIT_INTERNAL,
            message: err.to_string(),
        }
    }

    fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            exit_code: EXIT_INVALID_INPUT,
            message: message.into(),
        }
    }
}

impl From<PerformanceError> for Failure {
    fn from(value: PerformanceError) -> Self {
        let exit_code = match value {
            PerformanceError::InvalidInput(_) => EXIT_INVALID_INPUT,
            PerformanceError::NotFound(_) => EXIT_NOT_FOUND,
            PerformanceError::InvalidAircraftData { .. } => EXIT_INVALID_AIRCRAFT_DATA,
            PerformanceError::Store(_) => EXIT_INTERNAL,
        };
        Self {
            exit_code,
            message: value.to_string(),
        }
    }
}

impl From<RepoError> for Failure {
    fn from(value: RepoError) -> Self {
        let exit_code = match value {
            RepoError::Validation(_) | RepoError::AlreadyExists(_) => EXIT_INVALID_INPUT,
            RepoError::NotFound(_) => EXIT_NOT_FOUND,
            RepoError::InvalidData(_) => EXIT_INVALID_AIRCRAFT_DATA,
            RepoError::Db(_) => EXIT_INTERNAL,
        };
        Self {
            exit_code,
            message: value.to_string(),
        }
    }
}

fn run(args: &Args) -> Result<String, Failure> {
    let output = match &args.command {
        Command::Health => {
            let report = health(args);
            if report["status"] != "HEALTHY" {
                return Err(Failure {
                    exit_code: EXIT_INTERNAL,
                    message: report.to_string(),
                });
            }
            report
        }
        Command::List => {
            let conn = open_db(&args.db).map_err(Failure::internal)?;
            json!(SqliteAircraftRepository::new(&conn).list_aircraft()?)
        }
        Command::Add { source } => {
            let aircraft = read_aircraft(source)?;
            let conn = open_db(&args.db).map_err(Failure::internal)?;
            let id = SqliteAircraftRepository::new(&conn).create_aircraft(&aircraft)?;
            json!({ "aircraft_id": id })
        }
        Command::Range {
            aircraft_id,
            wind_speed,
            fuel,
        } => {
            let conn = open_db(&args.db).map_err(Failure::internal)?;
            let calculator = PerformanceCalculator::new(SqliteAircraftRepository::new(&conn));
            json!(calculator.calculate_range(&RangeRequest {
                aircraft_id: *aircraft_id,
                wind_speed: *wind_speed,
                fuel: *fuel,
            })?)
        }
        Command::Endurance { aircraft_id, fuel } => {
            let conn = open_db(&args.db).map_err(Failure::internal)?;
            let calculator = PerformanceCalculator::new(SqliteAircraftRepository::new(&conn));
            json!(calculator.calculate_endurance(&EnduranceRequest {
                aircraft_id: *aircraft_id,
                fuel: *fuel,
            })?)
        }
    };
    Ok(output.to_string())
}

fn health(args: &Args) -> serde_json::Value {
    let database = match open_existing_db(&args.db).and_then(|conn| ping_db(&conn)) {
        Ok(()) => "OK",
        Err(err) => {
            error!("event=health_check module=cli status=error error={err}");
            "DOWN"
        }
    };
    let status = if database == "OK" { "HEALTHY" } else { "UNHEALTHY" };
    json!({
        "status": status,
        "database": database,
        "core_version": airperf_core::core_version(),
        "ping": airperf_core::ping(),
    })
}

fn read_aircraft(source: &str) -> Result<Aircraft, Failure> {
    let text = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(Failure::internal)?;
        buffer
    } else {
        std::fs::read_to_string(source).map_err(Failure::internal)?
    };
    serde_json::from_str(&text)
        .map_err(|err| Failure::invalid_input(format!("invalid aircraft JSON: {err}")))
}
