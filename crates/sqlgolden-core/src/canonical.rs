//! Display canonicalization of captured SQL.

use sqlgolden_parser::{format_canonical, strip_comments};
use tracing::debug;

/// Canonical form of `sql`: comments removed, then a structured reprint, or
/// [`basic_normalize`] when the text does not parse. Never fails.
#[must_use]
pub fn canonicalize(sql: &str) -> String {
    if sql.trim().is_empty() {
        return String::new();
    }
    let stripped = strip_comments(sql);
    if stripped.trim().is_empty() {
        return String::new();
    }
    match format_canonical(&stripped) {
        Ok(canonical) => canonical,
        Err(err) => {
            debug!(error = %err, "structured parse failed, using basic normalization");
            basic_normalize(&stripped)
        }
    }
}

/// Trim, collapse whitespace runs to one space, and drop the space just
/// inside parentheses.
#[must_use]
pub fn basic_normalize(sql: &str) -> String {
    sql.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("( ", "(")
        .replace(" )", ")")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_reprint() {
        assert_eq!(
            canonicalize("select * from users where id = '5'"),
            "SELECT * FROM `users` WHERE `id`='5'"
        );
        assert_eq!(
            canonicalize("SELECT * FROM users WHERE ( id > ? )"),
            "SELECT * FROM `users` WHERE (`id`>?)"
        );
    }

    #[test]
    fn blank_and_comment_only_inputs_are_empty() {
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize("  \n\t "), "");
        assert_eq!(canonicalize("-- nothing here"), "");
        assert_eq!(canonicalize("/* a */ # b"), "");
    }

    #[test]
    fn comments_are_removed_before_parsing() {
        assert_eq!(
            canonicalize("SELECT id /* pk */ FROM t -- all rows"),
            "SELECT `id` FROM `t`"
        );
    }

    #[test]
    fn unparsable_input_falls_back() {
        assert_eq!(
            canonicalize("  FROBNICATE   the ( widgets )\n"),
            "FROBNICATE the (widgets)"
        );
        assert_eq!(canonicalize("SELECT 'open"), "SELECT 'open");
        assert_eq!(canonicalize("SELECT 1 /* open"), "SELECT 1 /* open");
    }

    #[test]
    fn basic_normalize_examples() {
        assert_eq!(
            basic_normalize("SELECT * FROM users WHERE ( id > ? ) AND ( name = ? )"),
            "SELECT * FROM users WHERE (id > ?) AND (name = ?)"
        );
        assert_eq!(basic_normalize("a\n\tb  c"), "a b c");
    }
}
