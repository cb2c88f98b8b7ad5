//! Query normalization and golden comparison.
//!
//! Captured statements flow through three stages:
//!
//! 1. [`assemble`] binds `?` placeholders to literal values,
//! 2. [`canonicalize`] reprints the statement in a stable display form,
//! 3. a [`QueryLedger`] records the result.
//!
//! At assertion time the recording is serialized and compared with a golden
//! reference; [`comparison_key`] explains differences that are formatting only.
//! Nothing in this crate touches the filesystem.

pub mod assemble;
pub mod canonical;
pub mod compare;
pub mod format;
pub mod golden;
pub mod ledger;
pub mod recorder;

pub use assemble::{assemble, assemble_capture};
pub use canonical::{basic_normalize, canonicalize};
pub use compare::{ComparisonKey, compare_keys, compare_keys_verbose, comparison_key};
pub use format::format_value;
pub use golden::{
    ComparisonOrder, ComparisonReport, GoldenOutcome, ReportRow, parse_reference, serialize,
};
pub use ledger::QueryLedger;
pub use recorder::{CaptureSink, NoOpSink, QueryRecorder};
pub use sqlgolden_types::{RawCapture, SqlValue};
