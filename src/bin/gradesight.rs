//! Gradesight CLI - Command-line interface for the dashboard engine
//!
//! Commands:
//! - grids: Build weekly grids for every student in a tree
//! - details: Flatten one student's subtree into detail rows
//! - progress: Build one student's progress rollup
//!
//! The CLI is the only place the wall clock is read; every library call
//! receives an explicit `as_of` instant.

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

use chrono::{DateTime, Utc};
use gradesight::{detail_rows, progress_table, weekly_grids, EngineError, StudentTree};
use gradesight::{DETAIL_HEADER, ENGINE_VERSION};

/// Gradesight - Gradebook dashboard views from a normalized student tree
#[derive(Parser)]
#[command(name = "gradesight")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Build calendar and progress views from an LMS gradebook tree", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build weekly grids for every student in the tree
    Grids {
        /// Input tree JSON path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// IANA timezone (e.g. "America/Los_Angeles")
        #[arg(long, default_value = "UTC")]
        timezone: String,

        /// Reference instant (RFC 3339); defaults to now
        #[arg(long)]
        as_of: Option<String>,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Flatten one student's subtree into detail rows
    Details {
        /// Input tree JSON path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Student id within the tree
        #[arg(short, long)]
        student: String,

        /// IANA timezone
        #[arg(long, default_value = "UTC")]
        timezone: String,

        /// Reference instant (RFC 3339); defaults to now
        #[arg(long)]
        as_of: Option<String>,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,

        /// Include the column header labels in the output
        #[arg(long)]
        header: bool,
    },

    /// Build one student's progress rollup
    Progress {
        /// Input tree JSON path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Student id within the tree
        #[arg(short, long)]
        student: String,

        /// IANA timezone
        #[arg(long, default_value = "UTC")]
        timezone: String,

        /// Reference instant (RFC 3339); defaults to now
        #[arg(long)]
        as_of: Option<String>,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid --as-of instant: {0}")]
    BadAsOf(String),

    #[error("student not found in tree: {0}")]
    UnknownStudent(String),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Grids {
            input,
            timezone,
            as_of,
            pretty,
        } => {
            let tree = read_tree(&input)?;
            let as_of = parse_as_of(as_of.as_deref())?;
            let grids = weekly_grids(&tree, as_of, Some(&timezone))?;
            emit(&grids, pretty)
        }

        Commands::Details {
            input,
            student,
            timezone,
            as_of,
            pretty,
            header,
        } => {
            let tree = read_tree(&input)?;
            let as_of = parse_as_of(as_of.as_deref())?;
            let subtree = tree
                .student(&student)
                .ok_or(CliError::UnknownStudent(student))?;
            let rows = detail_rows(subtree, as_of, Some(&timezone))?;
            if header {
                emit(&serde_json::json!({ "header": DETAIL_HEADER, "rows": rows }), pretty)
            } else {
                emit(&rows, pretty)
            }
        }

        Commands::Progress {
            input,
            student,
            timezone,
            as_of,
            pretty,
        } => {
            let tree = read_tree(&input)?;
            let as_of = parse_as_of(as_of.as_deref())?;
            let table = progress_table(&tree, &student, as_of, Some(&timezone))?
                .ok_or(CliError::UnknownStudent(student))?;
            emit(&table, pretty)
        }
    }
}

fn read_tree(path: &PathBuf) -> Result<StudentTree, CliError> {
    let raw = if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&raw)?)
}

fn parse_as_of(as_of: Option<&str>) -> Result<DateTime<Utc>, CliError> {
    match as_of {
        Some(raw) => raw
            .parse()
            .map_err(|_| CliError::BadAsOf(raw.to_string())),
        None => Ok(Utc::now()),
    }
}

fn emit<T: serde::Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
