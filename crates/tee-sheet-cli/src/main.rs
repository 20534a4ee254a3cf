//! `teesheet` CLI: resolve course schedules and generate tee sheets from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Effective rules for a date (course JSON from stdin)
//! cat course.json | teesheet resolve --date 2026-07-04
//!
//! # Tee sheet for a date
//! teesheet slots -c course.json --date 2026-07-04
//!
//! # Tee sheet plus statistics, with sunset-based twilight
//! teesheet preview -c course.json --date 2026-07-04 --sunset-table sunsets.json
//!
//! # One summary row per day
//! teesheet calendar -c course.json --from 2026-07-01 --to 2026-07-31 --pretty
//!
//! # Check a course document before saving it
//! teesheet validate -c course.json
//! ```
//!
//! Set `RUST_LOG=tee_sheet_engine=debug` to see which season and special day
//! were selected.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use std::process;
use tee_sheet_engine::twilight::{NoSunsetProvider, SunsetProvider};
use tee_sheet_engine::{CourseSchedule, SunsetTable};

#[derive(Parser)]
#[command(
    name = "teesheet",
    version,
    about = "Golf tee-time schedule resolution and tee-sheet generation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Course JSON file (reads from stdin if omitted)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// JSON object mapping YYYY-MM-DD dates to HH:MM sunset times
    #[arg(long, global = true)]
    sunset_table: Option<String>,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the effective schedule for a date
    Resolve {
        /// Date to resolve (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Generate the tee sheet for a date
    Slots {
        /// Date to generate (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Generate the tee sheet for a date with summary statistics
    Preview {
        /// Date to preview (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        /// Players allowed per tee time
        #[arg(long, default_value_t = 4)]
        max_players: u32,
    },
    /// Summarize every date in an inclusive range
    Calendar {
        /// First date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,
        /// Last date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        to: NaiveDate,
        /// Players allowed per tee time
        #[arg(long, default_value_t = 4)]
        max_players: u32,
    },
    /// Check the course configuration and list every issue
    Validate,
}

/// Result of `teesheet validate`.
#[derive(Serialize)]
struct ValidationReport {
    valid: bool,
    issues: Vec<tee_sheet_engine::ValidationIssue>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let raw = read_input(cli.config.as_deref())?;
    let course = CourseSchedule::from_json(&raw).context("Failed to parse course JSON")?;
    let table = match cli.sunset_table.as_deref() {
        Some(path) => Some(load_sunset_table(path)?),
        None => None,
    };
    let sunset: &dyn SunsetProvider = match &table {
        Some(table) => table,
        None => &NoSunsetProvider,
    };
    let CourseSchedule {
        config,
        seasons,
        special_days,
    } = &course;

    let rendered = match cli.command {
        Commands::Resolve { date } => {
            let schedule = tee_sheet_engine::resolve_effective_schedule_with(
                config,
                seasons,
                special_days,
                date,
                sunset,
            )
            .with_context(|| format!("Failed to resolve schedule for {}", date))?;
            to_json(&schedule, cli.pretty)?
        }
        Commands::Slots { date } => {
            let schedule = tee_sheet_engine::resolve_effective_schedule_with(
                config,
                seasons,
                special_days,
                date,
                sunset,
            )
            .with_context(|| format!("Failed to resolve schedule for {}", date))?;
            let slots = tee_sheet_engine::generate_slots(&schedule)
                .with_context(|| format!("Failed to generate slots for {}", date))?;
            to_json(&slots, cli.pretty)?
        }
        Commands::Preview { date, max_players } => {
            let preview = tee_sheet_engine::assemble_preview_with(
                config,
                seasons,
                special_days,
                date,
                max_players,
                sunset,
            )
            .with_context(|| format!("Failed to assemble preview for {}", date))?;
            to_json(&preview, cli.pretty)?
        }
        Commands::Calendar {
            from,
            to,
            max_players,
        } => {
            let rows = tee_sheet_engine::summarize_calendar_with(
                config,
                seasons,
                special_days,
                from,
                to,
                max_players,
                sunset,
            )
            .with_context(|| format!("Failed to summarize {} to {}", from, to))?;
            to_json(&rows, cli.pretty)?
        }
        Commands::Validate => {
            let issues = tee_sheet_engine::validate_course(config, seasons, special_days);
            let report = ValidationReport {
                valid: issues.is_empty(),
                issues,
            };
            let rendered = to_json(&report, cli.pretty)?;
            write_output(cli.output.as_deref(), &rendered)?;
            if !report.valid {
                for issue in &report.issues {
                    tracing::warn!(%issue, "invalid course configuration");
                }
                process::exit(1);
            }
            return Ok(());
        }
    };

    write_output(cli.output.as_deref(), &rendered)
}

/// Log to stderr so stdout stays machine-readable. `RUST_LOG` overrides the
/// default `warn` level.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    tee_sheet_engine::model::parse_full_date(s).map_err(|e| e.to_string())
}

fn load_sunset_table(path: &str) -> Result<SunsetTable> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sunset table: {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse sunset table: {}", path))
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let mut json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');
    Ok(json)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
