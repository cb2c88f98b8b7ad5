//! Golden blob format and ledger-versus-reference comparison.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::compare::{ComparisonKey, comparison_key};

/// Separator between statements in a golden blob.
pub const STATEMENT_SEPARATOR: &str = ";\n";

/// Join statements with `;\n`, adding a trailing `;` when non-empty.
#[must_use]
pub fn serialize<S: AsRef<str>>(entries: &[S]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut out = entries
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(STATEMENT_SEPARATOR);
    out.push(';');
    out
}

/// Split a golden blob back into statements. One trailing `;` (after any
/// trailing whitespace) is removed and blank fragments are dropped. Fragments
/// are otherwise kept byte for byte.
#[must_use]
pub fn parse_reference(blob: &str) -> Vec<String> {
    let body = blob.trim_end();
    let body = body.strip_suffix(';').unwrap_or(body);
    body.split(STATEMENT_SEPARATOR)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
        .collect()
}

/// Whether statement order matters for a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOrder {
    #[default]
    Ordered,
    Unordered,
}

/// Per-statement verdict of the key comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportRow {
    Match {
        key: ComparisonKey,
    },
    Diff {
        expected: Option<ComparisonKey>,
        actual: Option<ComparisonKey>,
    },
}

impl ReportRow {
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }
}

/// Key-level comparison of a recording against a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    pub order: ComparisonOrder,
    pub rows: Vec<ReportRow>,
    /// True when both sides have the same keys, i.e. any textual difference
    /// is formatting only.
    pub keys_match: bool,
}

impl ComparisonReport {
    /// Compare `actual` statements to `expected` ones by comparison key.
    #[must_use]
    pub fn build<A, E>(actual: &[A], expected: &[E], order: ComparisonOrder) -> Self
    where
        A: AsRef<str>,
        E: AsRef<str>,
    {
        let mut actual_keys: Vec<_> = actual.iter().map(|q| comparison_key(q.as_ref())).collect();
        let mut expected_keys: Vec<_> =
            expected.iter().map(|q| comparison_key(q.as_ref())).collect();
        if order == ComparisonOrder::Unordered {
            actual_keys.sort();
            expected_keys.sort();
        }

        let len = actual_keys.len().max(expected_keys.len());
        let rows: Vec<_> = (0..len)
            .map(|i| match (expected_keys.get(i), actual_keys.get(i)) {
                (Some(e), Some(a)) if e == a => ReportRow::Match { key: a.clone() },
                (e, a) => ReportRow::Diff {
                    expected: e.cloned(),
                    actual: a.cloned(),
                },
            })
            .collect();
        let keys_match =
            actual_keys.len() == expected_keys.len() && rows.iter().all(ReportRow::is_match);
        Self {
            order,
            rows,
            keys_match,
        }
    }

    /// Number of rows that differ.
    #[must_use]
    pub fn diff_count(&self) -> usize {
        self.rows.iter().filter(|row| !row.is_match()).count()
    }
}

fn key_or_missing(key: Option<&ComparisonKey>) -> &str {
    key.map_or("<missing>", ComparisonKey::as_str)
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order {
            ComparisonOrder::Ordered => writeln!(f, "=== NORMALIZED COMPARISON ===")?,
            ComparisonOrder::Unordered => writeln!(f, "=== NORMALIZED COMPARISON (SORTED) ===")?,
        }
        for (i, row) in self.rows.iter().enumerate() {
            let n = i + 1;
            match row {
                ReportRow::Match { key } => writeln!(f, "  [{n}] \u{2713} MATCH: {key}")?,
                ReportRow::Diff { expected, actual } => {
                    writeln!(f, "  [{n}] \u{2717} DIFF:")?;
                    writeln!(f, "       Expected: {}", key_or_missing(expected.as_ref()))?;
                    writeln!(f, "       Actual:   {}", key_or_missing(actual.as_ref()))?;
                }
            }
        }
        writeln!(f)?;
        if self.keys_match {
            write!(
                f,
                "  All normalized queries match; the difference is only in formatting."
            )
        } else {
            write!(f, "  Normalized queries have actual differences.")
        }
    }
}

/// Result of checking a recording against a golden blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoldenOutcome {
    /// Strict verdict: the serialized recording equals the reference text.
    pub pass: bool,
    pub report: ComparisonReport,
}

impl GoldenOutcome {
    /// Human-readable diagnostics for a failed check.
    #[must_use]
    pub fn diagnostics(&self) -> String {
        self.report.to_string()
    }
}

/// Remediation text for a reference that does not exist yet.
#[must_use]
pub fn missing_reference(path: &Path, update_env: &str) -> String {
    format!(
        "golden file '{}' does not exist.\n\n\
         To create the golden file:\n\
         1. Rerun the test with {update_env}=1\n   OR\n\
         2. Manually create the file with the expected SQL statements\n   OR\n\
         3. Call save_to_file() to write the recorded statements",
        path.display()
    )
}

/// Compare recorded `entries` with a golden `blob`.
///
/// The key report is diagnostic; `pass` is strict text equality of the
/// serialized recording (sorted first when `Unordered`) and the blob.
#[must_use]
pub fn compare<S: AsRef<str>>(entries: &[S], blob: &str, order: ComparisonOrder) -> GoldenOutcome {
    let expected = parse_reference(blob);
    let report = ComparisonReport::build(entries, &expected, order);

    let serialized = match order {
        ComparisonOrder::Ordered => serialize(entries),
        ComparisonOrder::Unordered => {
            let mut sorted: Vec<&str> = entries.iter().map(AsRef::as_ref).collect();
            sorted.sort_unstable();
            serialize(&sorted)
        }
    };
    let pass = serialized == blob;
    if !pass {
        warn!(
            keys_match = report.keys_match,
            differing = report.diff_count(),
            "recording differs from golden reference"
        );
    }
    GoldenOutcome { pass, report }
}
