//! Removal of charset introducers such as `_UTF8MB4'abc'`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Longer names come first so `_UTF8MB4` is never read as `_UTF8` + `MB4`.
/// The payload character is optional so a bare name matches as a whole
/// instead of backtracking to a shorter one.
static CHARSET_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b_(?:UTF8MB4|UTF8MB3|UTF16LE|UTF16|UTF32|UTF8|UCS2|LATIN1|ASCII|BINARY|GB18030|GBK|BIG5|SJIS|EUCJPMS)([0-9A-Za-z'])?",
    )
    .unwrap_or_else(|err| unreachable!("charset pattern is valid: {err}"))
});

/// Strip every charset prefix at a token boundary until none remain. A name
/// with no payload right after it is left alone.
pub(crate) fn strip_charset_prefixes(sql: &str) -> String {
    let mut current = sql.to_owned();
    loop {
        let next = CHARSET_PREFIX
            .replace_all(&current, |caps: &Captures<'_>| {
                caps.get(1)
                    .map_or_else(|| caps[0].to_owned(), |payload| payload.as_str().to_owned())
            })
            .into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}
