//! # Telemetry Module
//!
//! Handles writing sampled telemetry to log files.
//!
//! This module handles:
//! - G1000 CSV flight data logs ([`G1000Log`])
//! - Raw JSONL logs of unformatted samples ([`RawLog`])
//! - Reading raw logs back for offline rendering ([`RawReplay`])
//! - G1000-style log file naming

pub mod g1000_log;
pub mod raw;

pub use g1000_log::G1000Log;
pub use raw::{RawLog, RawReplay};

use chrono::NaiveDateTime;
use std::fs::{self, File};
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;

/// G1000-style log file name: `log_YYMMDD_HHMMSS_<IDENT>.csv`
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use g1k_logger::telemetry::log_file_name;
///
/// let t = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap().and_hms_opt(14, 30, 5).unwrap();
/// assert_eq!(log_file_name(&t, "N36GA"), "log_240615_143005_N36GA.csv");
/// ```
pub fn log_file_name(started: &NaiveDateTime, airframe_ident: &str) -> String {
    format!("log_{}_{}.csv", started.format("%y%m%d_%H%M%S"), airframe_ident)
}

/// Create a log file for writing, creating parent directories as needed
pub fn create_log_file<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    info!("Writing {}", path.display());
    Ok(BufWriter::new(file))
}

/// Resolve where the G1000 log goes: an explicit path, or an auto-named file
/// in the log directory
pub fn g1000_log_path(
    explicit: Option<&Path>,
    log_dir: &Path,
    started: &NaiveDateTime,
    airframe_ident: &str,
) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => log_dir.join(log_file_name(started, airframe_ident)),
    }
}

/// Re-render a raw log into G1000 rows
///
/// # Returns
///
/// * `Result<u64>` - Number of rows written
///
/// # Errors
///
/// Returns error on I/O failure reading the raw log or writing the G1000 log.
/// Malformed raw lines and rows that fail formatting are skipped.
pub fn render<R: BufRead, W: Write>(replay: &mut RawReplay<R>, log: &mut G1000Log<W>) -> Result<u64> {
    for sample in replay.by_ref() {
        log.append(&sample?)?;
    }
    log.flush()?;

    info!(
        "Rendered {} rows ({} skipped, {} unreadable lines)",
        log.rows_written(),
        log.rows_skipped(),
        replay.skipped()
    );
    Ok(log.rows_written())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::G1000;
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    #[test]
    fn test_log_file_name_zero_padded() {
        assert_eq!(log_file_name(&start(), "KBJC"), "log_240102_030405_KBJC.csv");
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = g1000_log_path(Some(Path::new("/tmp/flight.csv")), Path::new("./logs"), &start(), "N1");
        assert_eq!(path, PathBuf::from("/tmp/flight.csv"));
    }

    #[test]
    fn test_auto_path_in_log_dir() {
        let path = g1000_log_path(None, Path::new("logs"), &start(), "N1");
        assert_eq!(path, PathBuf::from("logs/log_240102_030405_N1.csv"));
    }

    #[test]
    fn test_create_log_file_makes_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/log.csv");

        let mut writer = create_log_file(&path).unwrap();
        writer.write_all(b"x").unwrap();
        writer.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x");
    }

    #[test]
    fn test_render_raw_log() {
        let raw = "{\"ias\":100.0}\n{\"ias\":\"fast\"}\ngarbage\n{\"ias\":102.5}\n";
        let mut replay = RawReplay::new(Cursor::new(raw));
        let mut log = G1000Log::new(Vec::new(), G1000::default()).unwrap();

        let rows = render(&mut replay, &mut log).unwrap();

        assert_eq!(rows, 2);
        assert_eq!(log.rows_skipped(), 1);
        assert_eq!(replay.skipped(), 1);
        let text = String::from_utf8(log.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().nth(4).unwrap().contains("102.50"));
    }
}
