//! Comparison keys: a normal form of SQL that ignores quoting style,
//! parenthesization, JOIN and WHERE-condition order, charset introducers and
//! `LIMIT` spelling.
//!
//! Passes, applied to each `;`-separated statement in order:
//!
//! 1. whitespace normalization
//! 2. backtick removal
//! 3. charset-prefix removal
//! 4. `LIMIT a,b` / `OFFSET 0` canonicalization
//! 5. JOIN ordering inside the top-level FROM
//! 6. condition ordering inside the top-level WHERE
//! 7. parenthesis removal
//!
//! Pass 7 destroys structure that passes 5 and 6 read, so the key is the
//! fixed point of the whole pipeline.

mod charset;
mod join;
mod limit;
mod predicate;
mod scan;

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::canonical::basic_normalize;

/// Upper bound on pipeline rounds before giving up on a fixed point.
pub const MAX_KEY_ROUNDS: usize = 8;

/// Normalized form of a SQL string used only for equivalence checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ComparisonKey(String);

impl ComparisonKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ComparisonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ComparisonKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the comparison key of `sql`.
#[must_use]
pub fn comparison_key(sql: &str) -> ComparisonKey {
    let mut current = run_pipeline(sql);
    for _ in 1..MAX_KEY_ROUNDS {
        let next = run_pipeline(&current);
        if next == current {
            return ComparisonKey(current);
        }
        current = next;
    }
    warn!(
        sql = %sql,
        rounds = MAX_KEY_ROUNDS,
        "comparison key did not converge"
    );
    ComparisonKey(current)
}

/// Whether two SQL strings are equivalent under comparison normalization.
#[must_use]
pub fn compare_keys(a: &str, b: &str) -> bool {
    comparison_key(a) == comparison_key(b)
}

/// Like [`compare_keys`], also returning both keys for diagnostics.
#[must_use]
pub fn compare_keys_verbose(a: &str, b: &str) -> (bool, ComparisonKey, ComparisonKey) {
    let (ka, kb) = (comparison_key(a), comparison_key(b));
    (ka == kb, ka, kb)
}

fn run_pipeline(sql: &str) -> String {
    let basic = basic_normalize(sql);
    scan::Layout::new(&basic)
        .split(";")
        .into_iter()
        .map(normalize_statement)
        .filter(|stmt| !stmt.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

fn normalize_statement(stmt: &str) -> String {
    let unquoted = stmt.replace('`', "");
    let plain = charset::strip_charset_prefixes(&unquoted);
    let limited = limit::normalize_limits(&plain);
    let joined = join::normalize_join_order(&limited);
    let filtered = predicate::normalize_where(&joined);
    let bare: String = filtered
        .chars()
        .filter(|c| !matches!(c, '(' | ')'))
        .collect();
    scan::collapse_whitespace(&bare)
}
