//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments and resolves the station configuration
//! - runs one or more fetch cycles
//! - prints observations

use std::time::Duration;

use clap::Parser;
use tracing::info;

use crate::cli::{Command, FetchArgs, StationArgs, WatchArgs};
use crate::config::Configuration;
use crate::data::HttpTransport;
use crate::domain::Observation;
use crate::error::{AppError, FetchError};
use crate::host::{CycleOutcome, FetchCycle, PARSER_INFO};

/// Entry point for the `awn` binary.
pub fn run() -> Result<(), AppError> {
    init_tracing();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fetch(args) => handle_fetch(args),
        Command::Watch(args) => handle_watch(args),
    }
}

fn init_tracing() {
    // Logs go to stderr so stdout stays clean for `--json`.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn fetch_cycle(station: &StationArgs) -> Result<FetchCycle<HttpTransport>, AppError> {
    let config = Configuration::from_env(&station.overrides())?;
    let cycle = FetchCycle::new(HttpTransport::new(), config);
    info!(device = cycle.config().device_id(), "Using station");
    Ok(cycle)
}

fn handle_fetch(args: FetchArgs) -> Result<(), AppError> {
    let mut cycle = fetch_cycle(&args.station)?;
    match cycle.run_once() {
        CycleOutcome::Completed(observations) => print_observations(&observations, args.json),
        CycleOutcome::Failed(err) => Err(cycle_error(&cycle, err)),
    }
}

fn handle_watch(args: WatchArgs) -> Result<(), AppError> {
    let mut cycle = fetch_cycle(&args.station)?;
    let interval = Duration::from_secs(args.interval);
    info!(
        parser = PARSER_INFO.name,
        interval_secs = interval.as_secs(),
        "Starting fetch loop"
    );

    let mut print_err = None;
    cycle.run_every(interval, args.cycles, |outcome| {
        if let CycleOutcome::Completed(observations) = outcome {
            if let Err(e) = print_observations(observations, args.json) {
                print_err.get_or_insert(e);
            }
        }
    });

    match print_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn print_observations(observations: &[Observation], json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", crate::report::observations_json(observations)?);
    } else {
        print!("{}", crate::report::format_observations(observations));
    }
    Ok(())
}

fn cycle_error<T: crate::data::Transport>(cycle: &FetchCycle<T>, err: FetchError) -> AppError {
    let message = cycle
        .last_known_error()
        .map(str::to_string)
        .unwrap_or_else(|| format!("Error: {err}"));
    AppError::new(err.exit_code(), message)
}
