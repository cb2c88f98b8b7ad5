//! Line diffs between a golden reference and a recording.

use similar::{ChangeTag, TextDiff};

const CONTEXT_RADIUS: usize = 3;

/// Unified diff from `expected` to `actual`; empty when they are equal.
#[must_use]
pub fn unified_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::new();
    }
    TextDiff::from_lines(expected, actual)
        .unified_diff()
        .context_radius(CONTEXT_RADIUS)
        .header("expected", "actual")
        .to_string()
}

/// Count of (removed, added) lines.
#[must_use]
pub fn change_counts(expected: &str, actual: &str) -> (usize, usize) {
    let diff = TextDiff::from_lines(expected, actual);
    diff.iter_all_changes()
        .fold((0, 0), |(removed, added), change| match change.tag() {
            ChangeTag::Delete => (removed + 1, added),
            ChangeTag::Insert => (removed, added + 1),
            ChangeTag::Equal => (removed, added),
        })
}
