//! Recursive-descent grouping of a token stream into statements.
//!
//! The tree is intentionally shallow: a statement is a sequence of tokens and
//! parenthesized groups. That is enough structure to validate balance, split
//! statements and drive the printer, without committing to a dialect grammar.

use crate::keywords;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Reasons the structured path rejects an input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unterminated string literal at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("unterminated quoted identifier at byte {offset}")]
    UnterminatedIdentifier { offset: usize },

    #[error("unterminated block comment at byte {offset}")]
    UnterminatedComment { offset: usize },

    #[error("unexpected character {found:?} at byte {offset}")]
    UnexpectedCharacter { found: char, offset: usize },

    #[error("unmatched ')' at byte {offset}")]
    UnmatchedParen { offset: usize },

    #[error("'(' at byte {offset} is never closed")]
    UnclosedParen { offset: usize },

    #[error("';' inside parentheses at byte {offset}")]
    SemicolonInGroup { offset: usize },

    #[error("'{word}' at byte {offset} does not start a statement")]
    UnknownStatement { word: String, offset: usize },

    #[error("statement ends with dangling '{token}' at byte {offset}")]
    IncompleteStatement { token: String, offset: usize },

    #[error("input contains no statement")]
    Empty,
}

/// Broad statement category; decides which printing rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Query,
    Insert,
    Update,
    Delete,
    Ddl,
    Utility,
}

impl StatementKind {
    fn from_keyword(word: &str) -> Self {
        match word {
            "SELECT" | "WITH" | "VALUES" => Self::Query,
            "INSERT" | "REPLACE" => Self::Insert,
            "UPDATE" => Self::Update,
            "DELETE" => Self::Delete,
            "CREATE" | "DROP" | "ALTER" | "TRUNCATE" => Self::Ddl,
            _ => Self::Utility,
        }
    }

    #[must_use]
    pub const fn is_dml(self) -> bool {
        matches!(
            self,
            Self::Query | Self::Insert | Self::Update | Self::Delete
        )
    }
}

/// A parenthesized run of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub open: Token,
    pub nodes: Vec<Node>,
    pub close: Token,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Token(Token),
    Group(Group),
}

impl Node {
    #[must_use]
    pub const fn as_token(&self) -> Option<&Token> {
        match self {
            Self::Token(tok) => Some(tok),
            Self::Group(_) => None,
        }
    }

    /// First token in source order, descending into groups.
    #[must_use]
    pub fn first_token(&self) -> &Token {
        match self {
            Self::Token(tok) => tok,
            Self::Group(group) => group.nodes.first().map_or(&group.open, Self::first_token),
        }
    }
}

/// One `;`-separated statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub kind: StatementKind,
    pub nodes: Vec<Node>,
}

impl Statement {
    fn from_nodes(nodes: Vec<Node>) -> Result<Self, ParseError> {
        let kind = match nodes.first() {
            Some(Node::Token(tok))
                if tok.kind == TokenKind::Keyword && keywords::is_statement_keyword(&tok.text) =>
            {
                StatementKind::from_keyword(&tok.text)
            }
            Some(node @ Node::Group(_))
                if matches!(node.first_token().text.as_str(), "SELECT" | "WITH") =>
            {
                StatementKind::Query
            }
            Some(node) => {
                let tok = node.first_token();
                return Err(ParseError::UnknownStatement {
                    word: tok.text.clone(),
                    offset: tok.offset,
                });
            }
            None => return Err(ParseError::Empty),
        };

        if let Some(Node::Token(last)) = nodes.last() {
            if is_dangling(last) {
                return Err(ParseError::IncompleteStatement {
                    token: last.text.clone(),
                    offset: last.offset,
                });
            }
        }
        Ok(Self { kind, nodes })
    }
}

fn is_dangling(tok: &Token) -> bool {
    match tok.kind {
        TokenKind::Operator => tok.text != "*",
        TokenKind::Comma | TokenKind::Dot | TokenKind::Introducer => true,
        TokenKind::Keyword => keywords::is_dangling(&tok.text),
        _ => false,
    }
}

/// Groups tokens into statements.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    #[must_use]
    pub const fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Lex `sql` and return a parser over its tokens.
    pub fn from_sql(sql: &str) -> Result<Self, ParseError> {
        Ok(Self::new(Lexer::new(sql).tokenize()?))
    }

    /// Parse every statement. Empty statements between semicolons are
    /// skipped; an input with none at all is an error.
    pub fn parse_statements(mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();
        loop {
            let nodes = self.parse_sequence(false)?;
            if !nodes.is_empty() {
                statements.push(Statement::from_nodes(nodes)?);
            }
            match self.advance() {
                None => break,
                Some(tok) if tok.kind == TokenKind::RightParen => {
                    return Err(ParseError::UnmatchedParen { offset: tok.offset });
                }
                Some(_) => {}
            }
        }
        if statements.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(statements)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Collect nodes until `)`, `;` or end of input, leaving the terminator
    /// unconsumed.
    fn parse_sequence(&mut self, in_group: bool) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        while let Some(tok) = self.peek() {
            match tok.kind {
                TokenKind::RightParen => break,
                TokenKind::Semicolon if in_group => {
                    return Err(ParseError::SemicolonInGroup { offset: tok.offset });
                }
                TokenKind::Semicolon => break,
                TokenKind::LeftParen => {
                    let group = self.parse_group()?;
                    nodes.push(Node::Group(group));
                }
                _ => {
                    if let Some(tok) = self.advance() {
                        nodes.push(Node::Token(tok));
                    }
                }
            }
        }
        Ok(nodes)
    }

    fn parse_group(&mut self) -> Result<Group, ParseError> {
        let open = self.advance().ok_or(ParseError::Empty)?;
        let nodes = self.parse_sequence(true)?;
        match self.advance() {
            Some(close) if close.kind == TokenKind::RightParen => Ok(Group { open, nodes, close }),
            _ => Err(ParseError::UnclosedParen {
                offset: open.offset,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(sql: &str) -> Result<Vec<Statement>, ParseError> {
        Parser::from_sql(sql)?.parse_statements()
    }

    #[test]
    fn groups_nest() {
        let stmts = parse("SELECT COUNT(*) FROM t WHERE (a IN (1, 2))").unwrap();
        assert_eq!(stmts.len(), 1);
        let Some(Node::Group(outer)) = stmts[0].nodes.last() else {
            panic!("expected trailing group");
        };
        assert!(matches!(outer.nodes.last(), Some(Node::Group(_))));
    }

    #[test]
    fn statements_split_and_classify() {
        let stmts = parse("INSERT INTO t VALUES (1);; UPDATE t SET a = 1; DELETE FROM t").unwrap();
        let kinds: Vec<_> = stmts.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StatementKind::Insert,
                StatementKind::Update,
                StatementKind::Delete
            ]
        );
    }

    #[test]
    fn parenthesized_select_is_a_query() {
        let stmts = parse("(SELECT 1) UNION (SELECT 2)").unwrap();
        assert_eq!(stmts[0].kind, StatementKind::Query);
        assert!(stmts[0].kind.is_dml());
    }

    #[test]
    fn ddl_is_not_dml() {
        let stmts = parse("CREATE TABLE t (id INTEGER)").unwrap();
        assert_eq!(stmts[0].kind, StatementKind::Ddl);
        assert!(!stmts[0].kind.is_dml());
    }

    #[test]
    fn unbalanced_parens_are_rejected() {
        assert!(matches!(
            parse("SELECT (1"),
            Err(ParseError::UnclosedParen { offset: 7 })
        ));
        assert!(matches!(
            parse("SELECT 1)"),
            Err(ParseError::UnmatchedParen { offset: 8 })
        ));
        assert!(matches!(
            parse("SELECT (1; 2)"),
            Err(ParseError::SemicolonInGroup { .. })
        ));
    }

    #[test]
    fn unknown_leading_word_is_rejected() {
        let err = parse("this is not sql").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownStatement {
                word: "this".to_owned(),
                offset: 0
            }
        );
    }

    #[test]
    fn dangling_tail_is_rejected() {
        assert!(matches!(
            parse("SELECT * FROM t WHERE"),
            Err(ParseError::IncompleteStatement { .. })
        ));
        assert!(matches!(
            parse("SELECT a,"),
            Err(ParseError::IncompleteStatement { .. })
        ));
        assert!(matches!(
            parse("SELECT a ="),
            Err(ParseError::IncompleteStatement { .. })
        ));
        assert!(parse("SELECT *").is_ok());
    }

    #[test]
    fn only_semicolons_is_empty() {
        assert_eq!(parse(" ; ;").unwrap_err(), ParseError::Empty);
        assert_eq!(parse("").unwrap_err(), ParseError::Empty);
    }
}
