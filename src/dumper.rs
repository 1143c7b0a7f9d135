//! # Dumper
//!
//! The polling loop: sample the simulator once per tick and hand each sample
//! to the configured logs.
//!
//! The loop runs until Ctrl+C or until the optional sample limit is reached,
//! then flushes every log and reports a summary.

use std::io::Write;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::format::{LogFormat, Status};
use crate::reader::Reader;
use crate::simulator::SimConnection;
use crate::telemetry::{G1000Log, RawLog};

/// Default polling interval (1 Hz, like the G1000 itself)
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// Counters reported when the loop ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpStats {
    /// Polling rounds attempted
    pub ticks: u64,
    /// Samples taken
    pub samples: u64,
    /// Rounds where the simulator could not be refreshed
    pub failed_samples: u64,
    /// Individual property readings that came back empty
    pub failed_readings: u64,
    pub rows_written: u64,
    pub rows_skipped: u64,
    pub raw_records: u64,
}

/// Polls a [`Reader`] and writes the samples out
pub struct Dumper<C> {
    reader: Reader<C>,
    status: Status,
    g1000: Option<G1000Log<Box<dyn Write>>>,
    raw: Option<RawLog<Box<dyn Write>>>,
    interval: Duration,
    max_samples: Option<u64>,
    stats: DumpStats,
}

impl<C: SimConnection> Dumper<C> {
    pub fn new(reader: Reader<C>) -> Self {
        Self {
            reader,
            status: Status,
            g1000: None,
            raw: None,
            interval: DEFAULT_INTERVAL,
            max_samples: None,
            stats: DumpStats::default(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_samples(mut self, max_samples: Option<u64>) -> Self {
        self.max_samples = max_samples;
        self
    }

    pub fn with_g1000(mut self, log: G1000Log<Box<dyn Write>>) -> Self {
        self.g1000 = Some(log);
        self
    }

    pub fn with_raw(mut self, log: RawLog<Box<dyn Write>>) -> Self {
        self.raw = Some(log);
        self
    }

    pub fn reader(&self) -> &Reader<C> {
        &self.reader
    }

    pub fn stats(&self) -> DumpStats {
        self.stats
    }

    /// Whether the sample limit has been reached
    pub fn done(&self) -> bool {
        self.max_samples.is_some_and(|max| self.stats.ticks >= max)
    }

    /// Take one sample and write it to every log
    ///
    /// # Errors
    ///
    /// Returns error only if writing a log fails. A simulator that cannot be
    /// refreshed costs one round and is logged.
    pub fn step(&mut self) -> Result<()> {
        self.stats.ticks += 1;

        let sample = match self.reader.sample() {
            Ok(sample) => sample,
            Err(e) => {
                warn!("Sample {} failed: {}", self.stats.ticks, e);
                self.stats.failed_samples += 1;
                return Ok(());
            }
        };
        self.stats.samples += 1;
        self.stats.failed_readings += sample.failed_count() as u64;

        if let Some(line) = self.status.format(&sample) {
            info!("{}", line);
        }

        if let Some(raw) = self.raw.as_mut() {
            raw.append(&sample)?;
            self.stats.raw_records = raw.records();
        }

        if let Some(log) = self.g1000.as_mut() {
            log.append(&sample)?;
            self.stats.rows_written = log.rows_written();
            self.stats.rows_skipped = log.rows_skipped();
        }

        Ok(())
    }

    /// Flush every log
    pub fn flush(&mut self) -> Result<()> {
        if let Some(raw) = self.raw.as_mut() {
            raw.flush()?;
        }
        if let Some(log) = self.g1000.as_mut() {
            log.flush()?;
        }
        Ok(())
    }

    /// Run the polling loop until Ctrl+C or the sample limit
    ///
    /// Missed ticks are delayed rather than bursted, so a slow simulator
    /// stretches the interval instead of producing back-to-back samples.
    ///
    /// # Errors
    ///
    /// Returns error if a log cannot be written; logs are flushed first.
    pub async fn run(&mut self) -> Result<DumpStats> {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        info!(
            "Sampling {} properties every {} ms",
            self.reader.properties().len(),
            self.interval.as_millis()
        );
        info!("Press Ctrl+C to exit");

        let outcome = loop {
            if self.done() {
                debug!("Sample limit of {:?} reached", self.max_samples);
                break Ok(());
            }

            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.step() {
                        break Err(e);
                    }
                }

                _ = &mut shutdown => {
                    info!("Received Ctrl+C, shutting down...");
                    break Ok(());
                }
            }
        };

        self.flush()?;
        outcome?;

        let stats = self.stats;
        info!(
            "Logged {} samples ({} rows written, {} rows skipped, {} failed readings)",
            stats.samples, stats.rows_written, stats.rows_skipped, stats.failed_readings
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::G1kError;
    use crate::format::G1000;
    use crate::property::Property;
    use crate::simulator::mocks::FakeSimulator;
    use crate::simulator::{MockSimConnection, SimValue, SyntheticSimulator};
    use crate::telemetry::{create_log_file, RawReplay};
    use std::fs;
    use std::io::BufReader;

    fn fake() -> FakeSimulator {
        FakeSimulator::new()
            .with("AIRSPEED_INDICATED", SimValue::Number(120.0))
            .with("PLANE_ALTITUDE", SimValue::Number(5500.0))
    }

    #[test]
    fn test_step_counts_samples() {
        let mut reader = Reader::new(fake());
        reader.set_property_list(vec![Property::Ias, Property::AltMsl, Property::Oat]);
        let mut dumper = Dumper::new(reader);

        dumper.step().unwrap();
        dumper.step().unwrap();

        let stats = dumper.stats();
        assert_eq!(stats.ticks, 2);
        assert_eq!(stats.samples, 2);
        // OAT variable is not exposed by the fake
        assert_eq!(stats.failed_readings, 2);
        assert_eq!(dumper.reader().connection().refresh_count, 2);
    }

    #[test]
    fn test_refresh_failure_is_not_fatal() {
        let mut mock = MockSimConnection::new();
        mock.expect_refresh()
            .times(1)
            .returning(|| Err(G1kError::Simulator("link down".to_string())));

        let mut dumper = Dumper::new(Reader::new(mock));
        dumper.step().unwrap();

        let stats = dumper.stats();
        assert_eq!(stats.ticks, 1);
        assert_eq!(stats.samples, 0);
        assert_eq!(stats.failed_samples, 1);
    }

    #[test]
    fn test_done_without_limit() {
        let dumper = Dumper::new(Reader::new(fake()));
        assert!(!dumper.done());
    }

    #[tokio::test]
    async fn test_run_stops_at_sample_limit() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("flight.csv");
        let jsonl = dir.path().join("flight.jsonl");

        let g1000: Box<dyn Write> = Box::new(create_log_file(&csv).unwrap());
        let raw: Box<dyn Write> = Box::new(create_log_file(&jsonl).unwrap());

        let mut dumper = Dumper::new(Reader::new(SyntheticSimulator::new()))
            .with_interval(Duration::from_millis(1))
            .with_max_samples(Some(3))
            .with_g1000(G1000Log::new(g1000, G1000::default()).unwrap())
            .with_raw(RawLog::new(raw));

        let stats = dumper.run().await.unwrap();

        assert_eq!(stats.samples, 3);
        assert_eq!(stats.rows_written, 3);
        assert_eq!(stats.raw_records, 3);
        assert_eq!(stats.rows_skipped, 0);

        let text = fs::read_to_string(&csv).unwrap();
        assert_eq!(text.lines().count(), 6);

        let replayed = RawReplay::new(BufReader::new(fs::File::open(&jsonl).unwrap()))
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(replayed.len(), 3);
        assert!(replayed[0].value(Property::Ias).is_some());
    }

    #[tokio::test]
    async fn test_run_with_zero_limit_takes_no_samples() {
        let mut dumper = Dumper::new(Reader::new(fake()))
            .with_interval(Duration::from_millis(1))
            .with_max_samples(Some(0));

        let stats = dumper.run().await.unwrap();
        assert_eq!(stats, DumpStats::default());
        assert_eq!(dumper.reader().connection().refresh_count, 0);
    }
}
