//! G1000 CSV log writer.

use std::io::Write;
use tracing::debug;

use crate::error::Result;
use crate::format::{LogFormat, G1000};
use crate::sample::Sample;

/// Writes a header once, then one G1000 row per sample
pub struct G1000Log<W: Write> {
    writer: W,
    format: G1000,
    rows_written: u64,
    rows_skipped: u64,
}

impl<W: Write> G1000Log<W> {
    /// Start a log, writing the three header lines immediately
    pub fn new(mut writer: W, format: G1000) -> Result<Self> {
        writeln!(writer, "{}", format.header())?;
        writer.flush()?;

        Ok(Self {
            writer,
            format,
            rows_written: 0,
            rows_skipped: 0,
        })
    }

    /// Append one sample. Returns whether a row was written.
    ///
    /// # Errors
    ///
    /// Returns error only on I/O failure; samples that cannot be formatted
    /// are counted as skipped.
    pub fn append(&mut self, sample: &Sample) -> Result<bool> {
        match self.format.format(sample) {
            Some(line) => {
                writeln!(self.writer, "{}", line)?;
                // One row per second; flush so a crash loses at most a row
                self.writer.flush()?;
                self.rows_written += 1;
                Ok(true)
            }
            None => {
                self.rows_skipped += 1;
                debug!("G1000 row skipped ({} so far)", self.rows_skipped);
                Ok(false)
            }
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    pub fn rows_skipped(&self) -> u64 {
        self.rows_skipped
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
