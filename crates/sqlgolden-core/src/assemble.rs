//! Placeholder substitution.

use memchr::memchr_iter;
use sqlgolden_types::{RawCapture, SqlValue};
use tracing::debug;

use crate::format::write_value;

/// Substitute `?` placeholders in `template` left to right.
///
/// Extra placeholders stay as `?`; surplus values are ignored. Literal text
/// inside quotes is not inspected, so a `?` in a string literal is consumed
/// like any other. Substituted values are never rescanned.
#[must_use]
pub fn assemble(template: &str, values: &[SqlValue]) -> String {
    let mut out = String::with_capacity(template.len() + values.len() * 8);
    let mut values = values.iter();
    let mut copied = 0;
    for at in memchr_iter(b'?', template.as_bytes()) {
        let Some(value) = values.next() else {
            break;
        };
        out.push_str(&template[copied..at]);
        write_value(&mut out, value);
        copied = at + 1;
    }
    out.push_str(&template[copied..]);
    out
}

/// Assemble a captured call, noting arity mismatches between the template
/// and its bound values.
#[must_use]
pub fn assemble_capture(capture: &RawCapture<'_>) -> String {
    let placeholders = capture.placeholder_count();
    if placeholders != capture.values.len() {
        debug!(
            template = capture.template,
            placeholders,
            values = capture.values.len(),
            "placeholder count differs from bound values"
        );
    }
    assemble(capture.template, capture.values)
}
