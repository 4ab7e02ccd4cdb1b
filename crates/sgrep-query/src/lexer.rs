//! On-demand tokenisation of query text.
//!
//! The lexer hands out one [`Token`] at a time so the parser can stop at the
//! first problem without tokenising the rest of the query.

use crate::error::QuerySyntaxError;
use crate::keywords::{is_python_keyword, is_reserved};
use crate::token::{Token, TokenKind};

/// Splits a query into tokens.
///
/// # Example
///
/// ```
/// use sgrep_query::{Lexer, TokenKind};
///
/// let kinds: Vec<_> = Lexer::new("def $name*")?
///     .map(|token| token.map(|t| t.kind()))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(kinds, vec![TokenKind::Keyword, TokenKind::Sigil]);
/// # Ok::<(), sgrep_query::QuerySyntaxError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    failed: bool,
}

impl Lexer {
    /// Creates a lexer over `query`.
    ///
    /// # Errors
    ///
    /// Returns [`QuerySyntaxError`] when the query is empty.
    pub fn new(query: &str) -> Result<Self, QuerySyntaxError> {
        if query.is_empty() {
            return Err(QuerySyntaxError::general("expected a query"));
        }
        Ok(Self {
            chars: query.chars().collect(),
            pos: 0,
            failed: false,
        })
    }

    /// Produces the next token, or `None` at the end of the query.
    ///
    /// # Errors
    ///
    /// Returns [`QuerySyntaxError`] for characters or words that cannot start
    /// a token.
    pub fn next_token(&mut self) -> Result<Option<Token>, QuerySyntaxError> {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        let Some(current) = self.peek() else {
            return Ok(None);
        };
        let column = self.pos + 1;

        let token = match current {
            '$' => self.sigil(column)?,
            c if c.is_ascii_digit() => self.number(column)?,
            c if c.is_alphabetic() || c == '_' => self.keyword(column)?,
            '.' => self.ellipsis(column)?,
            c => {
                let kind = punctuation(c).ok_or_else(|| {
                    QuerySyntaxError::at(column, format!("unexpected character `{c}`"))
                })?;
                self.pos += 1;
                Token::new(kind, c, column)
            }
        };
        Ok(Some(token))
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, expected: char) -> bool {
        let found = self.peek() == Some(expected);
        if found {
            self.pos += 1;
        }
        found
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut taken = String::new();
        while let Some(c) = self.peek().filter(|c| predicate(*c)) {
            taken.push(c);
            self.pos += 1;
        }
        taken
    }

    fn number(&mut self, column: usize) -> Result<Token, QuerySyntaxError> {
        let digits = self.take_while(|c| c.is_ascii_digit());
        digits
            .parse::<usize>()
            .map_err(|_| QuerySyntaxError::at(column, format!("number `{digits}` is too large")))?;
        Ok(Token::new(TokenKind::Number, digits, column))
    }

    fn keyword(&mut self, column: usize) -> Result<Token, QuerySyntaxError> {
        let word = self.take_while(is_identifier_char);
        if !is_reserved(&word) {
            return Err(QuerySyntaxError::at(
                column,
                format!("expected a keyword or `$` pattern, found `{word}`"),
            ));
        }
        Ok(Token::new(TokenKind::Keyword, word, column))
    }

    fn ellipsis(&mut self, column: usize) -> Result<Token, QuerySyntaxError> {
        let dots = self.take_while(|c| c == '.');
        if dots.len() != 3 {
            return Err(QuerySyntaxError::at(
                column,
                format!("expected `...`, found `{dots}`"),
            ));
        }
        Ok(Token::new(TokenKind::Ellipsis, dots, column))
    }

    fn sigil(&mut self, column: usize) -> Result<Token, QuerySyntaxError> {
        self.pos += 1;
        let prefix = self.eat('*');
        let name = self.take_while(is_identifier_char);

        if name.is_empty() {
            if prefix {
                return Ok(Token::new(TokenKind::Sigil, "$*", column));
            }
            return Err(QuerySyntaxError::at(
                column,
                "expected an identifier or `*` after `$`",
            ));
        }
        if is_python_keyword(&name) {
            return Err(QuerySyntaxError::at(
                column,
                format!("`{name}` is a keyword and cannot be used as an identifier pattern"),
            ));
        }

        let suffix = self.eat('*');
        let mut literal = String::from("$");
        if prefix {
            literal.push('*');
        }
        literal.push_str(&name);
        if suffix {
            literal.push('*');
        }
        Ok(Token::new(TokenKind::Sigil, literal, column))
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, QuerySyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let next = self.next_token().transpose();
        self.failed = matches!(next, Some(Err(_)));
        next
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

const fn punctuation(c: char) -> Option<TokenKind> {
    match c {
        '(' => Some(TokenKind::LeftParen),
        ')' => Some(TokenKind::RightParen),
        '=' => Some(TokenKind::Equals),
        ',' => Some(TokenKind::Comma),
        '^' => Some(TokenKind::Caret),
        '@' => Some(TokenKind::Decorator),
        _ => None,
    }
}
