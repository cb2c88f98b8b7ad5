//! JOIN-order canonicalization of the top-level FROM clause.

use super::scan::Layout;

const FROM: &str = " FROM ";

/// Clauses that end the FROM span.
const FROM_TERMINATORS: &[&str] = &[
    " WHERE ",
    " GROUP BY ",
    " HAVING ",
    " ORDER BY ",
    " LIMIT ",
    " UNION ",
    " EXCEPT ",
    " INTERSECT ",
];

/// Join introducers, longest first so `LEFT OUTER JOIN` is not read as a
/// bare `JOIN`.
const JOIN_KEYWORDS: &[(&str, JoinType)] = &[
    (" LEFT OUTER JOIN ", JoinType::Left),
    (" RIGHT OUTER JOIN ", JoinType::Right),
    (" LEFT JOIN ", JoinType::Left),
    (" RIGHT JOIN ", JoinType::Right),
    (" INNER JOIN ", JoinType::Inner),
    (" CROSS JOIN ", JoinType::Inner),
    (" JOIN ", JoinType::Inner),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum JoinType {
    Inner,
    Left,
    Right,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct JoinClause<'a> {
    kind: JoinType,
    table: &'a str,
    text: &'a str,
}

impl<'a> JoinClause<'a> {
    fn parse(text: &'a str, keyword: &str, kind: JoinType) -> Self {
        let target = text.strip_prefix(keyword.trim()).unwrap_or(text).trim_start();
        let layout = Layout::new(target);
        let end = layout
            .find_any(&[" ON ", " USING "], 0)
            .unwrap_or(target.len());
        let reference = &target[..end];
        let table = reference
            .find(" AS ")
            .map_or(reference, |at| &reference[..at])
            .trim();
        Self {
            kind,
            table,
            text,
        }
    }
}

/// Sort the JOIN clauses of the top-level FROM span by
/// `(join type, table, clause text)`. The leading table reference stays put.
pub(crate) fn normalize_join_order(sql: &str) -> String {
    let layout = Layout::new(sql);
    let Some(span_start) = layout.clause_body(FROM) else {
        return sql.to_owned();
    };
    let span_end = layout
        .find_any(FROM_TERMINATORS, span_start)
        .unwrap_or(sql.len());

    let starts = join_starts(&layout, span_start, span_end);
    let Some(&(first, _, _)) = starts.first() else {
        return sql.to_owned();
    };

    let mut clauses: Vec<JoinClause<'_>> = starts
        .iter()
        .enumerate()
        .map(|(i, &(at, keyword, kind))| {
            let end = starts.get(i + 1).map_or(span_end, |next| next.0);
            JoinClause::parse(sql[at..end].trim(), keyword, kind)
        })
        .collect();
    clauses.sort();

    let mut out = String::with_capacity(sql.len());
    out.push_str(&sql[..span_start]);
    out.push_str(sql[span_start..first].trim());
    for clause in &clauses {
        out.push(' ');
        out.push_str(clause.text);
    }
    out.push_str(&sql[span_end..]);
    out
}

/// Top-level join keyword positions inside `[start, end)`, scanning left to
/// right and taking the longest keyword at each position.
fn join_starts(
    layout: &Layout<'_>,
    start: usize,
    end: usize,
) -> Vec<(usize, &'static str, JoinType)> {
    let bytes = layout.text().as_bytes();
    let mut found = Vec::new();
    let mut at = start;
    while at < end {
        let hit = JOIN_KEYWORDS.iter().find(|(keyword, _)| {
            at + keyword.len() <= end
                && bytes[at..].starts_with(keyword.as_bytes())
                && layout.is_top(at)
        });
        match hit {
            Some(&(keyword, kind)) => {
                found.push((at, keyword, kind));
                at += keyword.len() - 1;
            }
            None => at += 1,
        }
    }
    found
}
