//! Rendering of bound values as SQL literals.

use std::fmt::Write as _;

use sqlgolden_types::SqlValue;

/// Timestamp layout used for literals.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render one value as SQL literal text. Never fails.
#[must_use]
pub fn format_value(value: &SqlValue) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

/// Append the literal form of `value` to `out`.
pub fn write_value(out: &mut String, value: &SqlValue) {
    let Some(value) = value.unwrap_optional() else {
        out.push_str("NULL");
        return;
    };
    match value {
        SqlValue::Null | SqlValue::Optional(_) => out.push_str("NULL"),
        SqlValue::Text(text) => push_quoted(out, text),
        SqlValue::Bytes(bytes) => push_quoted(out, &String::from_utf8_lossy(bytes)),
        SqlValue::Timestamp(ts) => {
            let _ = write!(out, "'{}'", ts.format(TIMESTAMP_FORMAT));
        }
        SqlValue::Bool(true) => out.push_str("TRUE"),
        SqlValue::Bool(false) => out.push_str("FALSE"),
        SqlValue::Integer(n) => {
            let _ = write!(out, "{n}");
        }
        SqlValue::Unsigned(n) => {
            let _ = write!(out, "{n}");
        }
        SqlValue::Real(n) => {
            let _ = write!(out, "{n}");
        }
        SqlValue::Other(text) => out.push_str(text),
    }
}

fn push_quoted(out: &mut String, text: &str) {
    out.reserve(text.len() + 2);
    out.push('\'');
    for ch in text.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn null_and_absent_optional() {
        assert_eq!(format_value(&SqlValue::Null), "NULL");
        assert_eq!(format_value(&SqlValue::optional(None)), "NULL");
        assert_eq!(
            format_value(&SqlValue::optional(Some(SqlValue::Integer(4)))),
            "4"
        );
    }

    #[test]
    fn text_escapes_single_quotes() {
        assert_eq!(format_value(&"O'Brien".into()), "'O''Brien'");
        assert_eq!(format_value(&SqlValue::Bytes(b"a'b".to_vec())), "'a''b'");
    }

    #[test]
    fn timestamps_use_second_precision() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_milli_opt(3, 4, 5, 678)
            .unwrap();
        assert_eq!(format_value(&ts.into()), "'2024-01-02 03:04:05'");
    }

    #[test]
    fn scalars_use_display() {
        assert_eq!(format_value(&true.into()), "TRUE");
        assert_eq!(format_value(&false.into()), "FALSE");
        assert_eq!(format_value(&(-12_i64).into()), "-12");
        assert_eq!(format_value(&u64::MAX.into()), "18446744073709551615");
        assert_eq!(format_value(&1.5_f64.into()), "1.5");
        assert_eq!(format_value(&2.0_f64.into()), "2");
        assert_eq!(format_value(&SqlValue::Other("ROW(1)".into())), "ROW(1)");
    }
}
