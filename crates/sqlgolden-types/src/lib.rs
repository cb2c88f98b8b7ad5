//! Value and capture types exchanged between capture hooks and the
//! normalization core.

pub mod value;

pub use value::SqlValue;

/// One intercepted database call: the statement template with `?`
/// placeholders and the values bound to it, in order.
///
/// Captures are consumed immediately by the statement assembler and never
/// stored, so the type only borrows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCapture<'a> {
    pub template: &'a str,
    pub values: &'a [SqlValue],
}

impl<'a> RawCapture<'a> {
    #[must_use]
    pub const fn new(template: &'a str, values: &'a [SqlValue]) -> Self {
        Self { template, values }
    }

    /// A capture of already-complete SQL with nothing bound.
    #[must_use]
    pub const fn sql(template: &'a str) -> Self {
        Self {
            template,
            values: &[],
        }
    }

    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.template.bytes().filter(|&b| b == b'?').count()
    }
}
