//! Golden assertions over a [`QueryRecorder`].

use std::path::{Path, PathBuf};

use sqlgolden_core::QueryRecorder;
use sqlgolden_core::golden::{self, ComparisonOrder, ComparisonReport};
use sqlgolden_error::{GoldenError, Result, UPDATE_ENV_VAR};
use tracing::{debug, info};

use crate::config::GoldenConfig;
use crate::diff::{change_counts, unified_diff};
use crate::store::{GoldenStore, write_creating_dirs};

/// Successful outcome of [`check_golden`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoldenCheck {
    /// Update mode rewrote the reference at this path.
    Updated(PathBuf),
    /// The recording equals the reference.
    Matched(ComparisonReport),
}

impl GoldenCheck {
    #[must_use]
    pub const fn is_updated(&self) -> bool {
        matches!(self, Self::Updated(_))
    }
}

/// Check the recording against the golden file `name` in `store`.
///
/// With `update` set the serialization for `order` is written and nothing is
/// compared. Otherwise a missing file is [`GoldenError::MissingReference`] and
/// a textual difference is [`GoldenError::Mismatch`], whose diagnostics hold
/// the normalized report followed by a unified diff.
pub fn check_golden(
    recorder: &QueryRecorder,
    store: &GoldenStore,
    name: impl AsRef<Path>,
    order: ComparisonOrder,
    update: bool,
) -> Result<GoldenCheck> {
    let name = name.as_ref();
    if update {
        let path = store.save(name, &recorder.serialize_for(order))?;
        info!(path = %path.display(), statements = recorder.len(), "golden reference updated");
        return Ok(GoldenCheck::Updated(path));
    }

    let path = store.resolve(name);
    let Some(blob) = store.load(name)? else {
        return Err(GoldenError::MissingReference {
            remediation: golden::missing_reference(&path, UPDATE_ENV_VAR),
            path,
        });
    };

    let outcome = recorder.assert_against_reference(&blob, order);
    if outcome.pass {
        debug!(path = %path.display(), "golden reference matched");
        return Ok(GoldenCheck::Matched(outcome.report));
    }

    let actual = recorder.serialize_for(order);
    let (removed, added) = change_counts(&blob, &actual);
    debug!(path = %path.display(), removed, added, "golden reference differs");
    let mut diagnostics = outcome.diagnostics();
    let diff = unified_diff(&blob, &actual);
    if !diff.is_empty() {
        diagnostics.push_str(&format!("\n\n  {removed} line(s) removed, {added} line(s) added\n"));
        diagnostics.push_str(&diff);
    }
    Err(GoldenError::Mismatch { path, diagnostics })
}

/// [`check_golden`] driven by a [`GoldenConfig`].
pub fn check_golden_with(
    recorder: &QueryRecorder,
    config: &GoldenConfig,
    name: impl AsRef<Path>,
) -> Result<GoldenCheck> {
    let store = GoldenStore::new(&config.testdata_dir);
    check_golden(recorder, &store, name, config.order, config.update)
}

/// Panicking form of [`check_golden_with`] using [`GoldenConfig::from_env`].
#[track_caller]
pub fn assert_golden(recorder: &QueryRecorder, name: impl AsRef<Path>) {
    if let Err(err) = check_golden_with(recorder, &GoldenConfig::from_env(), name) {
        panic!("{err}");
    }
}

/// Write the serialized recording to `path`, creating parent directories.
pub fn save_to_file(recorder: &QueryRecorder, path: impl AsRef<Path>) -> Result<()> {
    write_creating_dirs(path.as_ref(), &recorder.serialize())
}
