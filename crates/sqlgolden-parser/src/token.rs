//! Token types produced by the lexer.

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Reserved word; `text` is uppercased.
    Keyword,
    /// Bare identifier; `text` keeps the source spelling.
    Identifier,
    /// Backtick- or double-quoted identifier; `text` is the unescaped name.
    QuotedIdentifier,
    /// Single-quoted literal; `text` is the raw body with `''` escapes kept.
    String,
    /// `X'..'`, `B'..'` or `N'..'` literal; `text` is the full source form.
    PrefixedString,
    /// Charset introducer such as `_utf8mb4` directly before a string.
    Introducer,
    Number,
    /// `?`, `$1` or `:name`.
    Placeholder,
    /// `@name` or `@@name`.
    Variable,
    Operator,
    Comma,
    Dot,
    LeftParen,
    RightParen,
    Semicolon,
}

/// A single lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Byte offset of the token in the lexed input.
    pub offset: usize,
    /// Whether whitespace separated this token from the previous one.
    pub leading_space: bool,
}

impl Token {
    #[must_use]
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        offset: usize,
        leading_space: bool,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
            leading_space,
        }
    }

    /// True when this is the keyword `kw` (expects an uppercase argument).
    #[must_use]
    pub fn is_keyword(&self, kw: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == kw
    }

    #[must_use]
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }

    /// Identifiers of either spelling.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Identifier | TokenKind::QuotedIdentifier
        )
    }
}
