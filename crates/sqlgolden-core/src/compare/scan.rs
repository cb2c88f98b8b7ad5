//! Depth- and quote-aware text scanning shared by the comparison passes.

/// Byte-level layout of a SQL string.
///
/// A byte is *top-level* when it sits at parenthesis depth zero and outside
/// single- or double-quoted text.
pub(crate) struct Layout<'a> {
    text: &'a str,
    top: Vec<bool>,
    unquoted: Vec<bool>,
}

impl<'a> Layout<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let mut top = Vec::with_capacity(text.len());
        let mut unquoted = Vec::with_capacity(text.len());
        let mut depth = 0_usize;
        let mut quote: Option<u8> = None;
        for b in text.bytes() {
            match quote {
                Some(q) => {
                    top.push(false);
                    unquoted.push(false);
                    if b == q {
                        quote = None;
                    }
                }
                None => {
                    top.push(depth == 0);
                    unquoted.push(true);
                    match b {
                        b'\'' | b'"' => quote = Some(b),
                        b'(' => depth += 1,
                        b')' => depth = depth.saturating_sub(1),
                        _ => {}
                    }
                }
            }
        }
        Self {
            text,
            top,
            unquoted,
        }
    }

    pub(crate) const fn text(&self) -> &'a str {
        self.text
    }

    pub(crate) fn is_top(&self, at: usize) -> bool {
        self.top.get(at).copied().unwrap_or(false)
    }

    /// First top-level occurrence of `pat` at or after `from`.
    pub(crate) fn find(&self, pat: &str, from: usize) -> Option<usize> {
        self.text
            .get(from..)?
            .match_indices(pat)
            .map(|(i, _)| from + i)
            .find(|&i| self.is_top(i))
    }

    /// First occurrence of `pat` at or after `from` that is outside quotes,
    /// at any depth.
    pub(crate) fn find_unquoted(&self, pat: &str, from: usize) -> Option<usize> {
        self.text
            .get(from..)?
            .match_indices(pat)
            .map(|(i, _)| from + i)
            .find(|&i| self.unquoted.get(i).copied().unwrap_or(false))
    }

    /// Start of the body of the first top-level clause introduced by
    /// `keyword`, written with its surrounding spaces (`" WHERE "`). The
    /// keyword may also open the text.
    pub(crate) fn clause_body(&self, keyword: &str) -> Option<usize> {
        let bare = keyword.trim_start();
        if self.text.starts_with(bare) {
            return Some(bare.len());
        }
        self.find(keyword, 0).map(|at| at + keyword.len())
    }

    /// Earliest top-level occurrence of any of `pats` at or after `from`.
    pub(crate) fn find_any(&self, pats: &[&str], from: usize) -> Option<usize> {
        pats.iter().filter_map(|pat| self.find(pat, from)).min()
    }

    /// Split on every top-level `sep`, trimming pieces and dropping empty
    /// ones.
    pub(crate) fn split(&self, sep: &str) -> Vec<&'a str> {
        let mut pieces = Vec::new();
        let mut start = 0;
        while let Some(at) = self.find(sep, start) {
            pieces.push(self.text[start..at].trim());
            start = at + sep.len();
        }
        pieces.push(self.text[start..].trim());
        pieces.retain(|p| !p.is_empty());
        pieces
    }
}

/// Remove parenthesis pairs that wrap the whole of `s`, repeatedly.
///
/// A pair wraps only when the opening paren's match is the final character;
/// `(a) AND (b)` is left alone.
pub(crate) fn strip_wrapping_parens(mut s: &str) -> &str {
    s = s.trim();
    while s.len() >= 2 && s.starts_with('(') && s.ends_with(')') && closes_at_end(s) {
        s = s[1..s.len() - 1].trim();
    }
    s
}

fn closes_at_end(s: &str) -> bool {
    let layout = Layout::new(s);
    let last = s.len() - 1;
    // Depth returns to zero right after the matching close, so the byte
    // after it is the first top-level byte past index 0.
    !(1..=last).any(|i| layout.is_top(i))
}

/// Trim orphaned `)` at the start and `(` at the end of a fragment.
pub(crate) fn clean_fragment(mut s: &str) -> &str {
    loop {
        let trimmed = s
            .trim()
            .trim_start_matches(')')
            .trim_end_matches('(')
            .trim();
        if trimmed.len() == s.len() {
            return trimmed;
        }
        s = trimmed;
    }
}

/// Collapse whitespace runs to single spaces and trim.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clause_body_accepts_leading_keyword() {
        assert_eq!(Layout::new("WHERE a=1").clause_body(" WHERE "), Some(6));
        assert_eq!(Layout::new("SELECT 1 WHERE a=1").clause_body(" WHERE "), Some(15));
        assert_eq!(Layout::new("SELECT (1 WHERE a)").clause_body(" WHERE "), None);
        assert_eq!(Layout::new("WHEREVER").clause_body(" WHERE "), None);
    }

    #[test]
    fn top_level_ignores_parens_and_quotes() {
        let layout = Layout::new("a AND (b AND c) AND 'd AND e'");
        let hits: Vec<_> = (0..layout.text().len())
            .filter(|&i| layout.text()[i..].starts_with(" AND ") && layout.is_top(i))
            .collect();
        assert_eq!(hits, vec![1, 15]);
    }

    #[test]
    fn split_respects_depth() {
        let layout = Layout::new("a=1 AND (b=2 AND c=3) AND d IN (SELECT x FROM t WHERE y AND z)");
        assert_eq!(
            layout.split(" AND "),
            vec!["a=1", "(b=2 AND c=3)", "d IN (SELECT x FROM t WHERE y AND z)"]
        );
    }

    #[test]
    fn wrapping_parens() {
        assert_eq!(strip_wrapping_parens("((a AND b))"), "a AND b");
        assert_eq!(strip_wrapping_parens("(a) AND (b)"), "(a) AND (b)");
        assert_eq!(strip_wrapping_parens("( a )"), "a");
        assert_eq!(strip_wrapping_parens("(')')"), "')'");
    }

    #[test]
    fn fragments_lose_orphans() {
        assert_eq!(clean_fragment(") a=1 ("), "a=1");
        assert_eq!(clean_fragment("))b"), "b");
        assert_eq!(clean_fragment("c"), "c");
    }

    #[test]
    fn find_unquoted_sees_nested() {
        let layout = Layout::new("(SELECT 1 LIMIT 2) AND ' LIMIT '");
        assert_eq!(layout.find_unquoted(" LIMIT ", 0), Some(9));
        assert_eq!(layout.find_unquoted(" LIMIT ", 10), None);
        assert_eq!(layout.find(" LIMIT ", 0), None);
    }
}
