//! `LIMIT` spelling canonicalization.

use super::scan::Layout;

const LIMIT: &str = " LIMIT ";

/// Rewrite every `LIMIT offset,count` as `LIMIT count OFFSET offset` and drop
/// `OFFSET 0`. Each clause body runs to the next `;`, `)` or end of text.
pub(crate) fn normalize_limits(sql: &str) -> String {
    let layout = Layout::new(sql);
    let mut out = String::with_capacity(sql.len());
    let mut copied = 0;
    let leading = LIMIT.trim_start();
    let next_body = |from: usize| {
        if from == 0 && sql.starts_with(leading) {
            return Some(leading.len());
        }
        layout
            .find_unquoted(LIMIT, from)
            .map(|at| at + LIMIT.len())
    };
    while let Some(body_start) = next_body(copied) {
        let body_end = [";", ")"]
            .iter()
            .filter_map(|end| layout.find_unquoted(end, body_start))
            .min()
            .unwrap_or(sql.len());
        out.push_str(&sql[copied..body_start]);
        out.push_str(&rewrite_body(sql[body_start..body_end].trim()));
        copied = body_end;
    }
    out.push_str(&sql[copied..]);
    out
}

fn rewrite_body(body: &str) -> String {
    let layout = Layout::new(body);
    let (count, offset) = if let Some(comma) = layout.find(",", 0) {
        let (offset, count) = (&body[..comma], &body[comma + 1..]);
        if count.contains(',') {
            return body.to_owned();
        }
        (count.trim(), offset.trim())
    } else if let Some(at) = layout.find(" OFFSET ", 0) {
        (body[..at].trim(), body[at + " OFFSET ".len()..].trim())
    } else {
        return body.to_owned();
    };
    if offset == "0" {
        count.to_owned()
    } else {
        format!("{count} OFFSET {offset}")
    }
}
