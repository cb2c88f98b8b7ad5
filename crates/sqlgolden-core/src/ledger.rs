//! Thread-safe, append-only store of canonical statements.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use crate::golden;

/// Ordered record of canonical statements with a recording gate.
///
/// Every operation takes the single internal lock, so concurrent appends are
/// serialized and snapshots are consistent.
#[derive(Debug)]
pub struct QueryLedger {
    inner: Mutex<LedgerInner>,
    reference_path: Option<PathBuf>,
}

#[derive(Debug)]
struct LedgerInner {
    entries: Vec<String>,
    recording: bool,
}

impl Default for QueryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryLedger {
    /// Create an empty ledger with recording enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(LedgerInner {
                entries: Vec::new(),
                recording: true,
            }),
            reference_path: None,
        }
    }

    /// Create an empty ledger that remembers where its golden reference lives.
    #[must_use]
    pub fn with_reference_path(path: impl Into<PathBuf>) -> Self {
        Self {
            reference_path: Some(path.into()),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn reference_path(&self) -> Option<&Path> {
        self.reference_path.as_deref()
    }

    /// Append an already canonical statement. Ignored while recording is off
    /// or when `query` is empty.
    pub fn add_query(&self, query: impl Into<String>) {
        let query = query.into();
        if query.is_empty() {
            return;
        }
        let mut inner = self.inner.lock();
        if !inner.recording {
            return;
        }
        debug!(index = inner.entries.len(), query = %query, "recorded query");
        inner.entries.push(query);
    }

    pub fn enable(&self) {
        self.inner.lock().recording = true;
    }

    pub fn disable(&self) {
        self.inner.lock().recording = false;
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.inner.lock().recording
    }

    /// Drop every entry. The recording gate is left as it was.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    /// Independent copy of the entries in append order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.inner.lock().entries.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Golden-file text of the entries in append order.
    #[must_use]
    pub fn serialize(&self) -> String {
        golden::serialize(&self.inner.lock().entries)
    }

    /// Golden-file text of the entries sorted lexicographically.
    #[must_use]
    pub fn serialize_sorted(&self) -> String {
        let mut entries = self.snapshot();
        entries.sort();
        golden::serialize(&entries)
    }
}
