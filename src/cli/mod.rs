//! Command-line parsing for the station fetcher.
//!
//! Keeps argument parsing and command dispatch separate from the fetch and
//! conversion code.

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "awn", version, about = "Ambient Weather Network station fetcher")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the latest sample once and print normalized observations.
    Fetch(FetchArgs),
    /// Fetch on a fixed interval, as the irrigation scheduler does.
    Watch(WatchArgs),
}

/// Station selection and credentials. Each flag overrides its environment variable.
#[derive(Debug, Args, Clone, Default)]
pub struct StationArgs {
    /// Station MAC address (env: AMBIENT_MAC_ADDRESS).
    #[arg(long, value_name = "MAC")]
    pub mac_address: Option<String>,

    /// API key (env: AMBIENT_API_KEY).
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Application key (env: AMBIENT_APPLICATION_KEY).
    #[arg(long, value_name = "KEY")]
    pub application_key: Option<String>,
}

impl StationArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            mac_address: self.mac_address.clone(),
            api_key: self.api_key.clone(),
            application_key: self.application_key.clone(),
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct FetchArgs {
    #[command(flatten)]
    pub station: StationArgs,

    /// Print observations as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct WatchArgs {
    #[command(flatten)]
    pub station: StationArgs,

    /// Seconds between fetch cycles.
    #[arg(long, default_value_t = 3600)]
    pub interval: u64,

    /// Stop after this many cycles (runs forever when omitted).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub cycles: Option<u64>,

    /// Print observations as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_accepts_credential_overrides() {
        let cli = Cli::parse_from(["awn", "fetch", "--mac-address", "AA:BB", "--json"]);
        let Command::Fetch(args) = cli.command else {
            panic!("expected fetch");
        };
        assert!(args.json);
        assert_eq!(args.station.mac_address.as_deref(), Some("AA:BB"));
        assert!(args.station.api_key.is_none());
    }

    #[test]
    fn watch_defaults_to_hourly() {
        let cli = Cli::parse_from(["awn", "watch"]);
        let Command::Watch(args) = cli.command else {
            panic!("expected watch");
        };
        assert_eq!(args.interval, 3600);
        assert_eq!(args.cycles, None);
    }

    #[test]
    fn watch_rejects_zero_cycles() {
        assert!(Cli::try_parse_from(["awn", "watch", "--cycles", "0"]).is_err());

        let cli = Cli::parse_from(["awn", "watch", "--cycles", "2"]);
        let Command::Watch(args) = cli.command else {
            panic!("expected watch");
        };
        assert_eq!(args.cycles, Some(2));
    }
}
