//! Tokens produced by the [`Lexer`](crate::Lexer).

use std::fmt;

use strum::Display;

/// The kind of a query token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum TokenKind {
    /// A reserved word such as `def`, `call` or `import`.
    Keyword,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `=`
    Equals,
    /// `,`
    Comma,
    /// `^`
    Caret,
    /// `@`
    Decorator,
    /// `...`
    Ellipsis,
    /// A `$`-prefixed identifier pattern, such as `$name*` or `$*`.
    Sigil,
    /// A run of ASCII digits.
    Number,
}

/// One token of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    literal: String,
    column: usize,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(kind: TokenKind, literal: impl Into<String>, column: usize) -> Self {
        Self {
            kind,
            literal: literal.into(),
            column,
        }
    }

    /// Returns the token kind.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the exact query text of the token.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Returns the one-based column at which the token starts.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.literal)
    }
}
