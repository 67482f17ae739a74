//! Per-run import counters

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters shared by the producer, the error consumer and every worker
///
/// Increments are relaxed; totals are only read through [`snapshot`](Self::snapshot)
/// after all incrementing tasks have been joined.
#[derive(Debug, Default)]
pub struct ImportCounters {
    records_read: AtomicU64,
    read_errors: AtomicU64,
    import_errors: AtomicU64,
}

impl ImportCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// A worker dequeued a record
    pub fn record_read(&self) {
        self.records_read.fetch_add(1, Ordering::Relaxed);
    }

    /// A row was skipped by the reader or the parser
    pub fn read_error(&self) {
        self.read_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// A dequeued record failed to persist
    pub fn import_error(&self) {
        self.import_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ImportTotals {
        ImportTotals {
            records_read: self.records_read.load(Ordering::Relaxed),
            read_errors: self.read_errors.load(Ordering::Relaxed),
            import_errors: self.import_errors.load(Ordering::Relaxed),
        }
    }
}

/// Final counter values of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportTotals {
    pub records_read: u64,
    pub read_errors: u64,
    pub import_errors: u64,
}

impl ImportTotals {
    /// Records persisted successfully
    pub fn imported(&self) -> u64 {
        self.records_read - self.import_errors
    }

    /// Data rows seen, whether or not they parsed
    pub fn total_read(&self) -> u64 {
        self.records_read + self.read_errors
    }

    pub fn total_errors(&self) -> u64 {
        self.read_errors + self.import_errors
    }
}
