//! Golden files, assertions and capture hooks on top of `sqlgolden-core`.
//!
//! A test records through a [`QueryRecorder`] (directly, or via a
//! [`RecordingConnection`]) and finishes with [`assert_golden`]. Setting
//! `SQLGOLDEN_UPDATE_GOLDEN=1` rewrites the references instead.

pub mod assert;
pub mod capture;
pub mod config;
pub mod diff;
pub mod logging;
pub mod store;

pub use assert::{GoldenCheck, assert_golden, check_golden, check_golden_with, save_to_file};
pub use capture::{RecordingConnection, to_sqlite_value};
pub use config::GoldenConfig;
pub use diff::unified_diff;
pub use logging::{init_cli_logging, init_test_logging};
pub use sqlgolden_core::{ComparisonOrder, QueryRecorder};
pub use sqlgolden_error::{GoldenError, Result, UPDATE_ENV_VAR};
pub use store::GoldenStore;
