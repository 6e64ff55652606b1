//! Fetch-cycle runner standing in for the irrigation controller's scheduler.
//!
//! The scheduler invokes the parser on a fixed interval and keeps the last
//! error around for display; a failed cycle never stops the next one.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Configuration;
use crate::data::{Transport, fetch_latest};
use crate::domain::Observation;
use crate::error::FetchError;

/// Static description of the parser as registered with the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub forecast: bool,
    pub historical: bool,
    pub interval: Duration,
}

pub const PARSER_INFO: ParserInfo = ParserInfo {
    name: "Ambient Weather Network Parser",
    description: "Live personal weather station data from www.ambientweather.net",
    forecast: false,
    historical: true,
    interval: Duration::from_secs(60 * 60),
};

/// Result of one cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Completed(Vec<Observation>),
    Failed(FetchError),
}

impl CycleOutcome {
    pub fn observations(&self) -> &[Observation] {
        match self {
            CycleOutcome::Completed(obs) => obs,
            CycleOutcome::Failed(_) => &[],
        }
    }
}

pub struct FetchCycle<T> {
    transport: T,
    config: Configuration,
    last_known_error: Option<String>,
    cycles_run: u64,
}

impl<T: Transport> FetchCycle<T> {
    pub fn new(transport: T, config: Configuration) -> Self {
        Self {
            transport,
            config,
            last_known_error: None,
            cycles_run: 0,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// User-facing message from the most recent failed cycle, cleared by a
    /// successful one.
    pub fn last_known_error(&self) -> Option<&str> {
        self.last_known_error.as_deref()
    }

    pub fn cycles_run(&self) -> u64 {
        self.cycles_run
    }

    pub fn run_once(&mut self) -> CycleOutcome {
        self.cycles_run += 1;
        match fetch_latest(&self.transport, &self.config) {
            Ok(observations) => {
                info!(
                    cycle = self.cycles_run,
                    count = observations.len(),
                    "Fetch cycle completed"
                );
                self.last_known_error = None;
                CycleOutcome::Completed(observations)
            }
            Err(err) => {
                let message = format!("Error: {err}");
                // `fetch_latest` already reports NoData at error level.
                if err == FetchError::NoData {
                    debug!(cycle = self.cycles_run, "{message}");
                } else {
                    warn!(cycle = self.cycles_run, "{message}");
                }
                self.last_known_error = Some(message);
                CycleOutcome::Failed(err)
            }
        }
    }

    /// Run cycles back to back on the calling thread, sleeping `interval`
    /// between them. `max_cycles = None` runs forever.
    pub fn run_every<F>(&mut self, interval: Duration, max_cycles: Option<u64>, mut on_cycle: F)
    where
        F: FnMut(&CycleOutcome),
    {
        let mut remaining = max_cycles;
        loop {
            let outcome = self.run_once();
            on_cycle(&outcome);

            if let Some(n) = remaining.as_mut() {
                *n = n.saturating_sub(1);
                if *n == 0 {
                    break;
                }
            }
            std::thread::sleep(interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::domain::ObservationKind;

    /// Replays a fixed script of responses, one per call.
    struct ScriptedTransport {
        responses: RefCell<VecDeque<Result<Option<String>, FetchError>>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<Result<Option<String>, FetchError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
            }
        }
    }

    impl Transport for ScriptedTransport {
        fn get(&self, _url: &str, _query: &[(&str, &str)]) -> Result<Option<String>, FetchError> {
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or(Ok(None))
        }
    }

    fn config() -> Configuration {
        Configuration::new("mac", "api", "app").unwrap()
    }

    #[test]
    fn parser_runs_hourly() {
        assert_eq!(PARSER_INFO.interval, Duration::from_secs(3600));
        assert!(PARSER_INFO.historical);
        assert!(!PARSER_INFO.forecast);
    }

    #[test]
    fn no_data_sets_last_known_error() {
        let mut cycle = FetchCycle::new(ScriptedTransport::new(vec![Ok(None)]), config());
        let outcome = cycle.run_once();
        assert_eq!(outcome, CycleOutcome::Failed(FetchError::NoData));
        assert!(outcome.observations().is_empty());
        assert_eq!(cycle.last_known_error(), Some("Error: No data received from server"));
        assert_eq!(cycle.config().device_id(), "mac");
    }

    #[test]
    fn success_clears_previous_error() {
        let transport = ScriptedTransport::new(vec![
            Ok(Some("garbage".to_string())),
            Ok(Some(r#"[{"dateutc": 1000, "tempf": 32}]"#.to_string())),
        ]);
        let mut cycle = FetchCycle::new(transport, config());

        assert!(matches!(
            cycle.run_once(),
            CycleOutcome::Failed(FetchError::MalformedResponse(_))
        ));
        assert!(cycle.last_known_error().is_some());

        let outcome = cycle.run_once();
        assert_eq!(outcome.observations().len(), 1);
        assert_eq!(outcome.observations()[0].kind, ObservationKind::Temperature);
        assert_eq!(outcome.observations()[0].timestamp_seconds, 1);
        assert_eq!(cycle.last_known_error(), None);
    }

    #[test]
    fn run_every_continues_after_failures() {
        let transport = ScriptedTransport::new(vec![
            Err(FetchError::Transport("timed out".to_string())),
            Ok(None),
            Ok(Some(r#"[{"dateutc": 0, "humidity": 80}]"#.to_string())),
        ]);
        let mut cycle = FetchCycle::new(transport, config());

        let mut seen = Vec::new();
        cycle.run_every(Duration::ZERO, Some(3), |outcome| seen.push(outcome.clone()));

        assert_eq!(cycle.cycles_run(), 3);
        assert_eq!(seen.len(), 3);
        assert!(matches!(seen[0], CycleOutcome::Failed(FetchError::Transport(_))));
        assert_eq!(seen[1], CycleOutcome::Failed(FetchError::NoData));
        assert_eq!(seen[2].observations().len(), 1);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn no_data_is_logged_once() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .with_writer(move || writer.clone())
            .finish();

        let mut cycle = FetchCycle::new(ScriptedTransport::new(vec![Ok(None)]), config());
        tracing::subscriber::with_default(subscriber, || {
            cycle.run_once();
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output
            .lines()
            .filter(|l| l.contains("No data received from server"))
            .collect();
        assert_eq!(lines.len(), 1, "{output}");
        assert!(lines[0].contains("ERROR"), "{output}");
    }
}
