//! Recording facade handed to capture hooks.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sqlgolden_types::{RawCapture, SqlValue};

use crate::assemble::assemble_capture;
use crate::canonical::canonicalize;
use crate::compare;
use crate::golden::{self, ComparisonOrder, GoldenOutcome};
use crate::ledger::QueryLedger;

/// Receiver for intercepted database calls.
///
/// Implementations are called on the hot path of the code under test and
/// must not block for long.
pub trait CaptureSink: Send + Sync {
    fn on_capture(&self, capture: &RawCapture<'_>);
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl CaptureSink for NoOpSink {
    #[inline]
    fn on_capture(&self, _capture: &RawCapture<'_>) {}
}

/// Cheap-to-clone handle over one [`QueryLedger`].
///
/// Clones share the ledger, so a hook layer and the test body can each hold
/// one. Separate recorders are fully isolated.
#[derive(Debug, Clone, Default)]
pub struct QueryRecorder {
    ledger: Arc<QueryLedger>,
}

impl QueryRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder whose ledger remembers its golden reference path.
    #[must_use]
    pub fn with_reference_path(path: impl Into<PathBuf>) -> Self {
        Self {
            ledger: Arc::new(QueryLedger::with_reference_path(path)),
        }
    }

    #[must_use]
    pub fn ledger(&self) -> &QueryLedger {
        &self.ledger
    }

    #[must_use]
    pub fn reference_path(&self) -> Option<&Path> {
        self.ledger.reference_path()
    }

    /// Assemble a template with its bound values, canonicalize, and record.
    pub fn record_capture(&self, template: &str, values: &[SqlValue]) {
        self.on_capture(&RawCapture::new(template, values));
    }

    /// Canonicalize and record SQL that has nothing left to bind.
    pub fn record_sql(&self, sql: &str) {
        if !self.ledger.is_recording() {
            return;
        }
        self.ledger.add_query(canonicalize(sql));
    }

    pub fn enable(&self) {
        self.ledger.enable();
    }

    pub fn disable(&self) {
        self.ledger.disable();
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.ledger.is_recording()
    }

    pub fn clear(&self) {
        self.ledger.clear();
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.ledger.snapshot()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    #[must_use]
    pub fn serialize(&self) -> String {
        self.ledger.serialize()
    }

    #[must_use]
    pub fn serialize_sorted(&self) -> String {
        self.ledger.serialize_sorted()
    }

    /// Serialization matching `order`: append order, or sorted.
    #[must_use]
    pub fn serialize_for(&self, order: ComparisonOrder) -> String {
        match order {
            ComparisonOrder::Ordered => self.serialize(),
            ComparisonOrder::Unordered => self.serialize_sorted(),
        }
    }

    /// Whether two SQL strings are equivalent under comparison normalization.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn compare_keys(&self, a: &str, b: &str) -> bool {
        compare::compare_keys(a, b)
    }

    /// Compare the recording with a golden `blob`.
    #[must_use]
    pub fn assert_against_reference(&self, blob: &str, order: ComparisonOrder) -> GoldenOutcome {
        golden::compare(&self.snapshot(), blob, order)
    }
}

impl CaptureSink for QueryRecorder {
    fn on_capture(&self, capture: &RawCapture<'_>) {
        if !self.ledger.is_recording() {
            return;
        }
        self.ledger.add_query(canonicalize(&assemble_capture(capture)));
    }
}
