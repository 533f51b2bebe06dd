//! Append-only operation journal.
//!
//! Records that an encrypt or decrypt ran: direction, how many bits, whether
//! a trace was captured, and when. Keys, data bits and traces are never
//! recorded. Supports pluggable sinks for forwarding records to a file or
//! any other store.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cipher::RunResult;

/// Which way the data was going. The cipher itself does not care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Destination for journal records beyond the in-memory log.
pub trait JournalSink: Send {
    /// Persist one record. A failure is handed back to whoever journaled
    /// the run.
    fn append(&mut self, record: &OperationRecord) -> io::Result<()>;
}

/// One journaled cipher run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub direction: Direction,
    /// Number of data bits processed.
    pub bits: usize,
    /// Whether a step trace was captured.
    pub traced: bool,
    pub timestamp: DateTime<Utc>,
}

impl OperationRecord {
    /// Describe `result`, stamped with the current time.
    pub fn from_run(direction: Direction, result: &RunResult) -> Self {
        Self {
            direction,
            bits: result.input.len(),
            traced: result.trace.is_some(),
            timestamp: Utc::now(),
        }
    }
}

/// An append-only log of cipher runs.
#[derive(Default)]
pub struct Journal {
    records: Vec<OperationRecord>,
    forward_sinks: Vec<Box<dyn JournalSink>>,
}

impl std::fmt::Debug for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Journal {{ {} record(s), {} sink(s) }}",
            self.records.len(),
            self.forward_sinks.len()
        )
    }
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink to receive a copy of every record.
    pub fn add_forward_sink(&mut self, sink: Box<dyn JournalSink>) {
        self.forward_sinks.push(sink);
    }

    /// Log a record, then hand it to every sink in the order they were added.
    ///
    /// The in-memory log always keeps the record. The first sink error is
    /// returned after every sink has been tried.
    pub fn append(&mut self, record: OperationRecord) -> io::Result<()> {
        let mut outcome = Ok(());
        for sink in &mut self.forward_sinks {
            if let Err(e) = sink.append(&record) {
                outcome = outcome.and(Err(e));
            }
        }
        self.records.push(record);
        outcome
    }

    /// Journal a finished run.
    pub fn record(&mut self, direction: Direction, result: &RunResult) -> io::Result<()> {
        self.append(OperationRecord::from_run(direction, result))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OperationRecord> {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// Built-in sink: file
// ---------------------------------------------------------------------------

/// JSON-lines file sink. The file is opened in append mode and created if
/// missing; every record is flushed before `append` returns.
pub struct FileJournalSink {
    file: File,
}

impl FileJournalSink {
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }
}

impl JournalSink for FileJournalSink {
    fn append(&mut self, record: &OperationRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.file, record)?;
        self.file.write_all(b"\n")?;
        self.file.flush()
    }
}
