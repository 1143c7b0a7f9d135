//! Raw sample logs in JSON Lines format.
//!
//! Each line is one [`Sample`] as a JSON object keyed by property name, with
//! `null` for readings that failed:
//!
//! ```text
//! {"local_time":"14:30:01","lat":39.9088,"ias":142.12,"next_wp":null}
//! ```
//!
//! JSON has no NaN or infinity. The reader never produces them, but a
//! non-finite number in a hand-built sample is written as `null` and replays
//! as a failed reading.

use std::io::{BufRead, Write};
use tracing::warn;

use crate::error::Result;
use crate::sample::Sample;

/// Writes samples as JSON lines
pub struct RawLog<W: Write> {
    writer: W,
    records: u64,
}

impl<W: Write> RawLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, records: 0 }
    }

    pub fn append(&mut self, sample: &Sample) -> Result<()> {
        serde_json::to_writer(&mut self.writer, sample)?;
        self.writer.write_all(b"\n")?;
        self.records += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Iterates over the samples of a raw log, skipping lines that do not parse
pub struct RawReplay<R: BufRead> {
    lines: std::io::Lines<R>,
    line_no: usize,
    skipped: usize,
}

impl<R: BufRead> RawReplay<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            skipped: 0,
        }
    }

    /// Lines that were not valid samples
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> Iterator for RawReplay<R> {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(sample) => return Some(Ok(sample)),
                Err(e) => {
                    warn!("Skipping raw log line {}: {}", self.line_no, e);
                    self.skipped += 1;
                }
            }
        }
    }
}
