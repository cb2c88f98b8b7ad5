//! Canonical printer.
//!
//! Output conventions: uppercase keywords and function names, backtick-quoted
//! identifiers, no spaces around operators, commas or dots, and `AS` before
//! implicit aliases in DML.

use crate::keywords;
use crate::parser::{Node, Statement, StatementKind};
use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    /// Keyword that is not value-like.
    Word,
    Value,
    Function,
    Operator,
    Comma,
    Dot,
    Group,
    Introducer,
}

struct Piece {
    text: String,
    class: Class,
    /// May be followed by an implicit alias.
    alias_capable: bool,
    /// Plain identifier that would be an alias if it follows a value.
    alias_target: bool,
}

impl Piece {
    const fn new(text: String, class: Class) -> Self {
        Self {
            text,
            class,
            alias_capable: false,
            alias_target: false,
        }
    }
}

/// Print statements joined with `"; "`.
#[must_use]
pub fn print_statements(statements: &[Statement]) -> String {
    statements
        .iter()
        .map(print_statement)
        .collect::<Vec<_>>()
        .join("; ")
}

#[must_use]
pub fn print_statement(statement: &Statement) -> String {
    print_sequence(&statement.nodes, statement.kind)
}

fn print_sequence(nodes: &[Node], kind: StatementKind) -> String {
    let mut out = String::new();
    let mut prev: Option<Piece> = None;
    for index in 0..nodes.len() {
        let piece = render(nodes, index, prev.as_ref(), kind);
        if let Some(p) = &prev {
            if kind.is_dml() && p.alias_capable && piece.alias_target {
                out.push_str(" AS ");
            } else {
                out.push_str(separator(p, &piece));
            }
        }
        out.push_str(&piece.text);
        prev = Some(piece);
    }
    out
}

fn separator(prev: &Piece, next: &Piece) -> &'static str {
    use Class::{Comma, Dot, Function, Group, Introducer, Operator, Word};

    if matches!(prev.class, Comma | Dot | Introducer) || matches!(next.class, Comma | Dot) {
        return "";
    }
    if next.class == Group {
        return if matches!(prev.class, Function | Operator) {
            ""
        } else {
            " "
        };
    }
    if prev.class == Operator {
        // Keep `- -1` and `/ *` from fusing into comment markers.
        let fuses = (prev.text.ends_with('-') && next.text.starts_with('-'))
            || (prev.text.ends_with('/') && next.text.starts_with('*'));
        return if fuses { " " } else { "" };
    }
    if next.class == Operator {
        return if prev.class == Word { " " } else { "" };
    }
    " "
}

fn token_at(nodes: &[Node], index: usize) -> Option<&Token> {
    nodes.get(index).and_then(Node::as_token)
}

fn next_group_is_adjacent(nodes: &[Node], index: usize) -> Option<bool> {
    match nodes.get(index + 1) {
        Some(Node::Group(group)) => Some(!group.open.leading_space),
        _ => None,
    }
}

fn render(nodes: &[Node], index: usize, prev: Option<&Piece>, kind: StatementKind) -> Piece {
    match &nodes[index] {
        Node::Group(group) => {
            let text = format!("({})", print_sequence(&group.nodes, kind));
            Piece {
                alias_capable: true,
                ..Piece::new(text, Class::Group)
            }
        }
        Node::Token(tok) => render_token(nodes, index, tok, prev, kind),
    }
}

fn render_token(
    nodes: &[Node],
    index: usize,
    tok: &Token,
    prev: Option<&Piece>,
    kind: StatementKind,
) -> Piece {
    match tok.kind {
        TokenKind::Keyword => {
            let word = tok.text.as_str();
            let is_call = next_group_is_adjacent(nodes, index).is_some_and(|adjacent| {
                keywords::is_call_keyword(word)
                    || (adjacent && keywords::is_adjacent_call_keyword(word))
            });
            if is_call {
                Piece::new(tok.text.clone(), Class::Function)
            } else if keywords::is_value_keyword(word) {
                Piece {
                    alias_capable: word == "END",
                    ..Piece::new(tok.text.clone(), Class::Value)
                }
            } else {
                Piece::new(tok.text.clone(), Class::Word)
            }
        }
        TokenKind::Identifier | TokenKind::QuotedIdentifier => {
            render_identifier(nodes, index, tok, kind)
        }
        TokenKind::String => Piece {
            alias_capable: true,
            ..Piece::new(format!("'{}'", tok.text), Class::Value)
        },
        TokenKind::Number | TokenKind::Placeholder => Piece {
            alias_capable: true,
            ..Piece::new(tok.text.clone(), Class::Value)
        },
        TokenKind::PrefixedString | TokenKind::Variable => {
            Piece::new(tok.text.clone(), Class::Value)
        }
        TokenKind::Introducer => Piece::new(tok.text.clone(), Class::Introducer),
        TokenKind::Operator => {
            let star = tok.text == "*"
                && prev.is_none_or(|p| matches!(p.class, Class::Comma | Class::Dot | Class::Word));
            let class = if star { Class::Value } else { Class::Operator };
            Piece::new(tok.text.clone(), class)
        }
        TokenKind::Comma => Piece::new(",".to_owned(), Class::Comma),
        TokenKind::Dot => Piece::new(".".to_owned(), Class::Dot),
        // Parens and semicolons never survive into the statement tree.
        TokenKind::LeftParen | TokenKind::RightParen | TokenKind::Semicolon => {
            Piece::new(tok.text.clone(), Class::Operator)
        }
    }
}

fn render_identifier(nodes: &[Node], index: usize, tok: &Token, kind: StatementKind) -> Piece {
    let bare = tok.kind == TokenKind::Identifier;
    if bare && next_group_is_adjacent(nodes, index).is_some() && !names_table(nodes, index, kind) {
        return Piece::new(tok.text.to_ascii_uppercase(), Class::Function);
    }
    if bare && is_interval_unit(nodes, index, tok) {
        return Piece::new(tok.text.to_ascii_uppercase(), Class::Value);
    }
    Piece {
        alias_capable: true,
        alias_target: true,
        ..Piece::new(quote_identifier(&tok.text), Class::Value)
    }
}

/// Whether the (possibly qualified) name ending at `index` is a table that
/// takes a column list, as in `INSERT INTO t(a, b)` or `REFERENCES t(id)`.
fn names_table(nodes: &[Node], index: usize, kind: StatementKind) -> bool {
    let mut start = index;
    while start >= 2
        && token_at(nodes, start - 1).is_some_and(|t| t.kind == TokenKind::Dot)
        && token_at(nodes, start - 2).is_some_and(Token::is_identifier)
    {
        start -= 2;
    }
    let Some(before) = start.checked_sub(1).and_then(|i| token_at(nodes, i)) else {
        return false;
    };
    before.kind == TokenKind::Keyword
        && (keywords::introduces_table(&before.text)
            || (kind == StatementKind::Ddl && before.text == "ON"))
}

/// `DAY` in `INTERVAL 1 DAY` or `INTERVAL -? DAY`.
fn is_interval_unit(nodes: &[Node], index: usize, tok: &Token) -> bool {
    if !keywords::is_interval_unit(&tok.text.to_ascii_uppercase()) {
        return false;
    }
    for back in 2..=4 {
        let Some(at) = index.checked_sub(back) else {
            return false;
        };
        match nodes.get(at) {
            Some(Node::Token(t)) if t.is_keyword("INTERVAL") => return true,
            Some(Node::Token(t)) if t.kind == TokenKind::Keyword => return false,
            _ => {}
        }
    }
    false
}

/// Backtick-quote an identifier, doubling embedded backticks.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
