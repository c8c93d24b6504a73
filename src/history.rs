//! Operation history log.
//!
//! Append-only, insertion-ordered record of every completed operation.
//! The log is the single source of truth for any audit or replay a
//! caller wants to build on top; the engine only appends, it never
//! mutates or reorders entries. Rendering is left to the front end,
//! which takes snapshots through [`HistoryLog::records`].
//!
//! An optional file sink mirrors each record to a line-oriented log,
//! flushed per entry so a crash loses at most the in-flight line.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::{FormatConfig, NumericValue, OperatorKind};

/// A completed operation: operands, operator, and reduced result.
#[derive(Debug, Clone)]
pub struct HistoryRecord {
    /// Left operand at resolution time.
    pub operand_a: NumericValue,
    /// Operator applied.
    pub operator: OperatorKind,
    /// Right operand, when the operation took one.
    pub operand_b: Option<NumericValue>,
    /// Reduced result.
    pub result: NumericValue,
    /// Seconds since the Unix epoch at append time.
    pub timestamp: u64,
}

impl HistoryRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        operand_a: NumericValue,
        operator: OperatorKind,
        operand_b: Option<NumericValue>,
        result: NumericValue,
    ) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            operand_a,
            operator,
            operand_b,
            result,
            timestamp,
        }
    }

    /// Render as a calculation line, decimal operands.
    ///
    /// Example: `250 + 10 = 4`.
    pub fn render_decimal(&self) -> String {
        match &self.operand_b {
            Some(b) => format!(
                "{} {} {} = {}",
                self.operand_a.to_decimal(),
                self.operator,
                b.to_decimal(),
                self.result.to_decimal()
            ),
            None => format!(
                "{} {} = {}",
                self.operator,
                self.operand_a.to_decimal(),
                self.result.to_decimal()
            ),
        }
    }

    /// Render as a calculation line, hexadecimal operands.
    pub fn render_hex(&self, fmt: &FormatConfig) -> String {
        match &self.operand_b {
            Some(b) => format!(
                "{} {} {} = {}",
                self.operand_a.to_hex(fmt),
                self.operator,
                b.to_hex(fmt),
                self.result.to_hex(fmt)
            ),
            None => format!(
                "{} {} = {}",
                self.operator,
                self.operand_a.to_hex(fmt),
                self.result.to_hex(fmt)
            ),
        }
    }
}

/// Append-only log of completed operations.
#[derive(Debug, Default)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
    sink: Option<BufWriter<std::fs::File>>,
}

impl HistoryLog {
    /// Create an in-memory log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            sink: None,
        }
    }

    /// Create a log that also appends rendered lines to a file.
    ///
    /// The file is opened in append mode so successive sessions extend
    /// the same log.
    pub fn with_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self {
            records: Vec::new(),
            sink: Some(BufWriter::new(file)),
        })
    }

    /// Append a record. Insertion order is preserved forever.
    pub fn append(&mut self, record: HistoryRecord) {
        if let Some(sink) = self.sink.as_mut() {
            // Sink failures must not disturb the engine; the in-memory
            // log stays authoritative.
            let _ = writeln!(sink, "[{}] {}", record.timestamp, record.render_decimal());
            let _ = sink.flush();
        }
        self.records.push(record);
    }

    /// Snapshot of all records, oldest first.
    #[inline]
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Number of recorded operations.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }
}
