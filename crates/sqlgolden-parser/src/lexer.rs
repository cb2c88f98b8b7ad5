//! Byte-level SQL lexer.
//!
//! The lexer is deliberately permissive about dialect: it accepts MySQL
//! backticks, ANSI double-quoted identifiers, `?`/`$n`/`:name` placeholders
//! and charset introducers, and only rejects input it cannot tokenize at all.

use memchr::{memchr, memmem};
use tracing::{debug, trace};

use crate::keywords;
use crate::parser::ParseError;
use crate::token::{Token, TokenKind};

/// Multi-byte operators, longest first so `<=>` wins over `<=`.
const MULTI_OPERATORS: &[&str] = &[
    "<=>", "->>", "<>", "!=", "<=", ">=", "==", "||", "&&", "<<", ">>", "->", "::", ":=",
];

const SINGLE_OPERATORS: &[u8] = b"=<>+-*/%&|^~!";

/// Remove `/* */`, `--` and `#` comments, replacing each with one space.
///
/// Markers inside quoted strings and identifiers are left alone. An
/// unterminated block comment is kept verbatim, and so is everything after an
/// unterminated quote.
#[must_use]
pub fn strip_comments(sql: &str) -> String {
    let bytes = sql.as_bytes();
    let mut out = String::with_capacity(sql.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'\'' | b'"' | b'`') => match closing_quote(bytes, i + 1, quote) {
                Some(end) => i = end + 1,
                None => break,
            },
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let Some(rel) = memmem::find(&bytes[i + 2..], b"*/") else {
                    break;
                };
                out.push_str(&sql[copied..i]);
                out.push(' ');
                i += 2 + rel + 2;
                copied = i;
            }
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                out.push_str(&sql[copied..i]);
                out.push(' ');
                i = line_end(bytes, i);
                copied = i;
            }
            b'#' => {
                out.push_str(&sql[copied..i]);
                out.push(' ');
                i = line_end(bytes, i);
                copied = i;
            }
            _ => i += 1,
        }
    }
    out.push_str(&sql[copied..]);
    out
}

/// Index of the closing `quote` for a quoted run whose body starts at
/// `from`, honouring doubled-quote escapes.
fn closing_quote(bytes: &[u8], from: usize, quote: u8) -> Option<usize> {
    let mut pos = from;
    loop {
        let end = pos + memchr(quote, bytes.get(pos..)?)?;
        if bytes.get(end + 1) == Some(&quote) {
            pos = end + 2;
        } else {
            return Some(end);
        }
    }
}

/// Position of the newline ending the line that contains `from`, or the end
/// of input. The newline itself is not consumed.
fn line_end(bytes: &[u8], from: usize) -> usize {
    memchr(b'\n', &bytes[from..]).map_or(bytes.len(), |rel| from + rel)
}

const fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

const fn is_word_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

/// Tokenizer over one SQL text.
pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
    space: bool,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
            space: false,
        }
    }

    /// Tokenize the whole input. Comments are skipped like whitespace.
    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        match self.run() {
            Ok(()) => {
                trace!(bytes = self.src.len(), tokens = self.tokens.len(), "tokenized");
                Ok(self.tokens)
            }
            Err(err) => {
                debug!(error = %err, "tokenize failed");
                Err(err)
            }
        }
    }

    fn run(&mut self) -> Result<(), ParseError> {
        while let Some(&b) = self.bytes.get(self.pos) {
            let start = self.pos;
            match b {
                _ if b.is_ascii_whitespace() => {
                    self.pos += 1;
                    self.space = true;
                }
                b'/' if self.peek(1) == Some(b'*') => self.skip_block_comment()?,
                b'-' if self.peek(1) == Some(b'-') => self.skip_line_comment(),
                b'#' => self.skip_line_comment(),
                b'\'' => {
                    let body = self.quoted_body(b'\'')?;
                    self.push(TokenKind::String, body.to_owned(), start);
                }
                b'"' | b'`' => {
                    let body = self.quoted_body(b)?;
                    let quote = char::from(b);
                    let name = body.replace(&format!("{quote}{quote}"), &quote.to_string());
                    self.push(TokenKind::QuotedIdentifier, name, start);
                }
                b'0'..=b'9' => self.number_or_word(),
                b'.' if self.peek(1).is_some_and(|n| n.is_ascii_digit())
                    && !self.follows_value() =>
                {
                    self.number_or_word();
                }
                b'x' | b'X' | b'b' | b'B' | b'n' | b'N' if self.peek(1) == Some(b'\'') => {
                    self.pos += 1;
                    let body = self.quoted_body(b'\'')?;
                    let text = format!("{}'{body}'", char::from(b).to_ascii_uppercase());
                    self.push(TokenKind::PrefixedString, text, start);
                }
                _ if is_word_start(b) => self.word(),
                b'?' => {
                    self.pos += 1;
                    self.push(TokenKind::Placeholder, "?".to_owned(), start);
                }
                b'$' if self.peek(1).is_some_and(|n| n.is_ascii_digit()) => {
                    self.pos += 1;
                    self.eat_while(|c| c.is_ascii_digit());
                    self.push_slice(TokenKind::Placeholder, start);
                }
                b':' if self.peek(1).is_some_and(is_word_start) => {
                    self.pos += 1;
                    self.eat_while(is_word_continue);
                    self.push_slice(TokenKind::Placeholder, start);
                }
                b'@' => {
                    self.pos += 1;
                    if self.peek(0) == Some(b'@') {
                        self.pos += 1;
                    }
                    self.eat_while(|c| is_word_continue(c) || c == b'.');
                    self.push_slice(TokenKind::Variable, start);
                }
                b',' => self.punct(TokenKind::Comma),
                b'.' => self.punct(TokenKind::Dot),
                b'(' => self.punct(TokenKind::LeftParen),
                b')' => self.punct(TokenKind::RightParen),
                b';' => self.punct(TokenKind::Semicolon),
                _ => self.operator()?,
            }
        }
        Ok(())
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek(0).is_some_and(&pred) {
            self.pos += 1;
        }
    }

    fn push(&mut self, kind: TokenKind, text: String, offset: usize) {
        self.tokens
            .push(Token::new(kind, text, offset, std::mem::take(&mut self.space)));
    }

    fn push_slice(&mut self, kind: TokenKind, start: usize) {
        let text = self.src[start..self.pos].to_owned();
        self.push(kind, text, start);
    }

    fn punct(&mut self, kind: TokenKind) {
        let start = self.pos;
        self.pos += 1;
        self.push_slice(kind, start);
    }

    /// Whether a `.` at the cursor qualifies the previous token (`t.5col`)
    /// instead of starting a number (`.5`).
    fn follows_value(&self) -> bool {
        self.tokens.last().is_some_and(|prev| {
            !self.space
                && matches!(
                    prev.kind,
                    TokenKind::Identifier | TokenKind::QuotedIdentifier | TokenKind::RightParen
                )
        })
    }

    fn skip_block_comment(&mut self) -> Result<(), ParseError> {
        let from = self.pos + 2;
        let rel = memmem::find(&self.bytes[from..], b"*/").ok_or(
            ParseError::UnterminatedComment { offset: self.pos },
        )?;
        self.pos = from + rel + 2;
        self.space = true;
        Ok(())
    }

    fn skip_line_comment(&mut self) {
        self.pos = line_end(self.bytes, self.pos);
        self.space = true;
    }

    /// Consume a quoted run starting at the cursor and return its raw body.
    fn quoted_body(&mut self, quote: u8) -> Result<&'a str, ParseError> {
        let open = self.pos;
        let close = closing_quote(self.bytes, open + 1, quote).ok_or(if quote == b'\'' {
            ParseError::UnterminatedString { offset: open }
        } else {
            ParseError::UnterminatedIdentifier { offset: open }
        })?;
        self.pos = close + 1;
        Ok(&self.src[open + 1..close])
    }

    fn number_or_word(&mut self) {
        let start = self.pos;
        if self.peek(0) == Some(b'0')
            && matches!(self.peek(1), Some(b'x' | b'X'))
            && self.peek(2).is_some_and(|c| c.is_ascii_hexdigit())
        {
            self.pos += 2;
            self.eat_while(|c| c.is_ascii_hexdigit());
        } else {
            self.eat_while(|c| c.is_ascii_digit());
            if self.peek(0) == Some(b'.') {
                self.pos += 1;
                self.eat_while(|c| c.is_ascii_digit());
            }
            if matches!(self.peek(0), Some(b'e' | b'E')) {
                let digits_at = if matches!(self.peek(1), Some(b'+' | b'-')) { 2 } else { 1 };
                if self.peek(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += digits_at;
                    self.eat_while(|c| c.is_ascii_digit());
                }
            }
        }
        if self.peek(0).is_some_and(is_word_continue) {
            // MySQL allows identifiers that start with digits, e.g. `1st_place`.
            self.pos = start;
            self.word();
        } else {
            self.push_slice(TokenKind::Number, start);
        }
    }

    fn word(&mut self) {
        let start = self.pos;
        self.eat_while(is_word_continue);
        let text = &self.src[start..self.pos];
        let upper = text.to_ascii_uppercase();
        if self.peek(0) == Some(b'\'')
            && upper
                .strip_prefix('_')
                .is_some_and(keywords::is_charset)
        {
            self.push(TokenKind::Introducer, upper, start);
        } else if keywords::is_keyword(&upper) {
            self.push(TokenKind::Keyword, upper, start);
        } else {
            self.push_slice(TokenKind::Identifier, start);
        }
    }

    fn operator(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let rest = &self.bytes[start..];
        if let Some(op) = MULTI_OPERATORS
            .iter()
            .find(|op| rest.starts_with(op.as_bytes()))
        {
            self.pos += op.len();
            self.push_slice(TokenKind::Operator, start);
            return Ok(());
        }
        if SINGLE_OPERATORS.contains(&rest[0]) {
            self.pos += 1;
            self.push_slice(TokenKind::Operator, start);
            return Ok(());
        }
        let found = self.src[start..].chars().next().unwrap_or('\u{fffd}');
        Err(ParseError::UnexpectedCharacter {
            found,
            offset: start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(sql: &str) -> Vec<(TokenKind, String)> {
        Lexer::new(sql)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn keywords_are_uppercased_and_identifiers_kept() {
        let toks = kinds("select Name from Users");
        assert_eq!(
            toks,
            vec![
                (TokenKind::Keyword, "SELECT".to_owned()),
                (TokenKind::Identifier, "Name".to_owned()),
                (TokenKind::Keyword, "FROM".to_owned()),
                (TokenKind::Identifier, "Users".to_owned()),
            ]
        );
    }

    #[test]
    fn strings_keep_doubled_quotes() {
        let toks = kinds("'it''s'");
        assert_eq!(toks, vec![(TokenKind::String, "it''s".to_owned())]);
    }

    #[test]
    fn quoted_identifiers_unescape() {
        let toks = kinds("`a``b` \"c\"\"d\"");
        assert_eq!(
            toks,
            vec![
                (TokenKind::QuotedIdentifier, "a`b".to_owned()),
                (TokenKind::QuotedIdentifier, "c\"d".to_owned()),
            ]
        );
    }

    #[test]
    fn multi_byte_operators_win() {
        let toks = kinds("a<=>b c<>d e->>'$.x'");
        let ops: Vec<_> = toks
            .into_iter()
            .filter(|(k, _)| *k == TokenKind::Operator)
            .map(|(_, t)| t)
            .collect();
        assert_eq!(ops, vec!["<=>", "<>", "->>"]);
    }

    #[test]
    fn numbers_and_qualified_names() {
        let toks = kinds("1.5e3 .5 t.c 0x1F");
        assert_eq!(
            toks,
            vec![
                (TokenKind::Number, "1.5e3".to_owned()),
                (TokenKind::Number, ".5".to_owned()),
                (TokenKind::Identifier, "t".to_owned()),
                (TokenKind::Dot, ".".to_owned()),
                (TokenKind::Identifier, "c".to_owned()),
                (TokenKind::Number, "0x1F".to_owned()),
            ]
        );
    }

    #[test]
    fn introducer_requires_adjacent_string() {
        let toks = kinds("_utf8mb4'abc' _utf8mb4");
        assert_eq!(toks[0], (TokenKind::Introducer, "_UTF8MB4".to_owned()));
        assert_eq!(toks[1], (TokenKind::String, "abc".to_owned()));
        assert_eq!(toks[2], (TokenKind::Identifier, "_utf8mb4".to_owned()));
    }

    #[test]
    fn placeholders_and_variables() {
        let toks = kinds("? $2 :name @x @@session.y");
        assert_eq!(
            toks,
            vec![
                (TokenKind::Placeholder, "?".to_owned()),
                (TokenKind::Placeholder, "$2".to_owned()),
                (TokenKind::Placeholder, ":name".to_owned()),
                (TokenKind::Variable, "@x".to_owned()),
                (TokenKind::Variable, "@@session.y".to_owned()),
            ]
        );
    }

    #[test]
    fn leading_space_tracks_whitespace_and_comments() {
        let toks = Lexer::new("a /* c */b(c)").tokenize().unwrap();
        assert!(!toks[0].leading_space);
        assert!(toks[1].leading_space);
        assert!(!toks[2].leading_space);
    }

    #[test]
    fn lexer_errors() {
        assert!(matches!(
            Lexer::new("'abc").tokenize(),
            Err(ParseError::UnterminatedString { offset: 0 })
        ));
        assert!(matches!(
            Lexer::new("a `b").tokenize(),
            Err(ParseError::UnterminatedIdentifier { offset: 2 })
        ));
        assert!(matches!(
            Lexer::new("a /* b").tokenize(),
            Err(ParseError::UnterminatedComment { offset: 2 })
        ));
        assert!(matches!(
            Lexer::new("a \\ b").tokenize(),
            Err(ParseError::UnexpectedCharacter { found: '\\', .. })
        ));
    }

    #[test]
    fn strip_comments_variants() {
        assert_eq!(strip_comments("SELECT 1 -- tail"), "SELECT 1  ");
        assert_eq!(strip_comments("SELECT /* x */1"), "SELECT  1");
        assert_eq!(strip_comments("SELECT 1 # c\nFROM t"), "SELECT 1  \nFROM t");
    }

    #[test]
    fn strip_comments_respects_quotes() {
        let sql = "SELECT '-- not' , \"/* no */\" , `#x`";
        assert_eq!(strip_comments(sql), sql);
    }

    #[test]
    fn strip_comments_keeps_unterminated_block() {
        assert_eq!(strip_comments("SELECT 1 /* open"), "SELECT 1 /* open");
        assert_eq!(strip_comments("SELECT 'open -- x"), "SELECT 'open -- x");
    }
}
