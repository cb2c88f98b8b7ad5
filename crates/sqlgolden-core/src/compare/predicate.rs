//! Condition ordering of the top-level WHERE clause.

use std::collections::HashSet;

use super::scan::{Layout, clean_fragment, strip_wrapping_parens};

const WHERE: &str = " WHERE ";
const AND: &str = " AND ";
const OR: &str = " OR ";
const BETWEEN: &str = " BETWEEN ";

/// Clauses that end the WHERE body.
const WHERE_TERMINATORS: &[&str] = &[
    " GROUP BY ",
    " HAVING ",
    " WINDOW ",
    " ORDER BY ",
    " LIMIT ",
    " UNION ",
    " EXCEPT ",
    " INTERSECT ",
    " FOR UPDATE",
    " FOR SHARE",
    " LOCK IN SHARE MODE",
    " RETURNING ",
];

/// Flatten, deduplicate and sort the AND-conditions of the top-level WHERE.
///
/// Conditions are ordered and deduplicated by their parenthesis-free form,
/// so `(a=1)` and `a=1` count as the same condition.
pub(crate) fn normalize_where(sql: &str) -> String {
    let layout = Layout::new(sql);
    let Some(body_start) = layout.clause_body(WHERE) else {
        return sql.to_owned();
    };
    let body_end = layout
        .find_any(WHERE_TERMINATORS, body_start)
        .unwrap_or(sql.len());

    let mut conditions = Vec::new();
    flatten_into(&sql[body_start..body_end], &mut conditions);

    let mut seen = HashSet::new();
    let mut keyed: Vec<(String, &str)> = conditions
        .into_iter()
        .filter_map(|cond| {
            let key = without_parens(cond);
            seen.insert(key.clone()).then_some((key, cond))
        })
        .collect();
    keyed.sort_unstable();

    let joined = keyed
        .iter()
        .map(|(_, cond)| *cond)
        .collect::<Vec<_>>()
        .join(AND);
    format!("{}{joined}{}", &sql[..body_start], &sql[body_end..])
}

/// Split `cond` on top-level `AND`, recursing into wrapped groups. A
/// condition with a top-level `OR` is kept whole.
fn flatten_into<'a>(cond: &'a str, out: &mut Vec<&'a str>) {
    let cond = clean_fragment(strip_wrapping_parens(cond));
    if cond.is_empty() {
        return;
    }
    let layout = Layout::new(cond);
    if layout.find(OR, 0).is_some() {
        out.push(cond);
        return;
    }
    let parts = split_conjuncts(&layout);
    if parts.len() == 1 {
        out.push(cond);
        return;
    }
    for part in parts {
        flatten_into(part, out);
    }
}

/// Split on top-level ` AND `, except the `AND` that closes a top-level
/// `BETWEEN`.
fn split_conjuncts<'a>(layout: &Layout<'a>) -> Vec<&'a str> {
    let text = layout.text();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut cursor = 0;
    let mut in_between = false;
    while let Some(and) = layout.find(AND, cursor) {
        if let Some(between) = layout.find(BETWEEN, cursor).filter(|&b| b < and) {
            in_between = true;
            cursor = between + BETWEEN.len();
            continue;
        }
        cursor = and + AND.len();
        if in_between {
            in_between = false;
            continue;
        }
        parts.push(text[start..and].trim());
        start = cursor;
    }
    parts.push(text[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

fn without_parens(cond: &str) -> String {
    let stripped: String = cond.chars().filter(|c| !matches!(c, '(' | ')')).collect();
    super::scan::collapse_whitespace(&stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditions_are_sorted() {
        assert_eq!(
            normalize_where("SELECT * FROM t WHERE name='x' AND id=1"),
            "SELECT * FROM t WHERE id=1 AND name='x'"
        );
    }

    #[test]
    fn wrapped_groups_are_flattened() {
        assert_eq!(
            normalize_where("SELECT * FROM t WHERE ((b=2) AND (a=1 AND c=3))"),
            "SELECT * FROM t WHERE a=1 AND b=2 AND c=3"
        );
    }

    #[test]
    fn duplicates_compare_without_parens() {
        assert_eq!(
            normalize_where("DELETE FROM t WHERE (a=1) AND b=2 AND a=1"),
            "DELETE FROM t WHERE a=1 AND b=2"
        );
    }

    #[test]
    fn or_conditions_stay_whole() {
        assert_eq!(
            normalize_where("SELECT * FROM t WHERE (z=1 OR a=2) AND b=3"),
            "SELECT * FROM t WHERE b=3 AND z=1 OR a=2"
        );
    }

    #[test]
    fn between_keeps_its_and() {
        assert_eq!(
            normalize_where("SELECT * FROM t WHERE x BETWEEN 1 AND 5 AND a=1"),
            "SELECT * FROM t WHERE a=1 AND x BETWEEN 1 AND 5"
        );
    }

    #[test]
    fn body_stops_at_trailing_clauses() {
        assert_eq!(
            normalize_where("SELECT * FROM t WHERE b=1 AND a=1 ORDER BY id LIMIT 5"),
            "SELECT * FROM t WHERE a=1 AND b=1 ORDER BY id LIMIT 5"
        );
    }

    #[test]
    fn subquery_where_is_not_the_main_one() {
        let sql = "SELECT * FROM (SELECT * FROM u WHERE b=1 AND a=1) AS s";
        assert_eq!(normalize_where(sql), sql);
    }

    #[test]
    fn leading_where_fragment_is_sorted() {
        assert_eq!(
            normalize_where("WHERE (name='x') AND (id=1)"),
            "WHERE id=1 AND name='x'"
        );
    }

    #[test]
    fn string_literals_hide_and() {
        assert_eq!(
            normalize_where("SELECT * FROM t WHERE n='x AND y' AND a=1"),
            "SELECT * FROM t WHERE a=1 AND n='x AND y'"
        );
    }
}
