//! Recursive-descent parser for the query language.
//!
//! Grammar, one token of lookahead:
//!
//! ```text
//! query     := "@"* pattern
//! pattern   := "def" sigil? arguments?
//!            | "call" sigil? arguments?
//!            | "class" sigil?
//!            | keyword
//!            | sigil
//! arguments := "(" (entry ("," entry)* ","?)? ")"
//! entry     := "args" "=" number | "^" sigil | sigil | "..."
//! ```

use crate::error::QuerySyntaxError;
use crate::lexer::Lexer;
use crate::model::{
    ArgumentsPattern, ClassPattern, FunctionPattern, IdentifierPattern, KeywordPattern, Query,
};
use crate::token::{Token, TokenKind};

const PATTERN_START: &str = "a keyword or `$` pattern";
const ARGUMENT_ENTRY: &str = "`args=N`, `^$name`, `$name`, `...` or `)`";

/// Parses query text into a [`Query`].
///
/// # Errors
///
/// Returns [`QuerySyntaxError`] when the query is empty, contains a token the
/// lexer rejects, ends early, or has anything left over after the pattern.
///
/// # Example
///
/// ```
/// use sgrep_query::{PatternKind, parse_query};
///
/// let query = parse_query("def $get* (^$self)")?;
/// assert_eq!(query.kind(), PatternKind::Function);
/// # Ok::<(), sgrep_query::QuerySyntaxError>(())
/// ```
pub fn parse_query(text: &str) -> Result<Query, QuerySyntaxError> {
    let mut parser = QueryParser::new(Lexer::new(text)?)?;
    let query = parser.query()?;
    parser.finish()?;
    Ok(query)
}

struct QueryParser {
    lexer: Lexer,
    current: Option<Token>,
}

impl QueryParser {
    fn new(mut lexer: Lexer) -> Result<Self, QuerySyntaxError> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    fn peek(&self) -> Option<TokenKind> {
        self.current.as_ref().map(Token::kind)
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token, QuerySyntaxError> {
        let Some(token) = self.current.take_if(|token| token.kind() == kind) else {
            return Err(self.unexpected(&format!("{kind}")));
        };
        self.current = self.lexer.next_token()?;
        Ok(token)
    }

    fn unexpected(&self, expected: &str) -> QuerySyntaxError {
        match &self.current {
            Some(token) => {
                QuerySyntaxError::at(token.column(), format!("expected {expected}, found {token}"))
            }
            None => QuerySyntaxError::general(format!("expected {expected}, found end of query")),
        }
    }

    fn finish(&self) -> Result<(), QuerySyntaxError> {
        match &self.current {
            None => Ok(()),
            Some(token) => Err(QuerySyntaxError::at(
                token.column(),
                format!("unexpected {token} after the pattern"),
            )),
        }
    }

    fn query(&mut self) -> Result<Query, QuerySyntaxError> {
        while self.peek() == Some(TokenKind::Decorator) {
            self.consume(TokenKind::Decorator)?;
        }

        match self.peek() {
            Some(TokenKind::Keyword) => self.keyword(),
            Some(TokenKind::Sigil) => Ok(Query::Identifier(self.identifier()?)),
            _ => Err(self.unexpected(PATTERN_START)),
        }
    }

    fn keyword(&mut self) -> Result<Query, QuerySyntaxError> {
        let keyword = self.consume(TokenKind::Keyword)?;
        match keyword.literal() {
            "def" => self.function(false),
            "call" => self.function(true),
            "class" => {
                let name = self.optional_identifier()?;
                Ok(Query::Class(ClassPattern::new(name, Vec::new())))
            }
            other => Ok(Query::Keyword(KeywordPattern::new(other))),
        }
    }

    fn function(&mut self, is_call: bool) -> Result<Query, QuerySyntaxError> {
        let name = self.optional_identifier()?;
        let args = if self.peek() == Some(TokenKind::LeftParen) {
            Some(self.arguments()?)
        } else {
            None
        };
        Ok(Query::Function(FunctionPattern::new(name, args, is_call)))
    }

    fn arguments(&mut self) -> Result<ArgumentsPattern, QuerySyntaxError> {
        self.consume(TokenKind::LeftParen)?;

        let mut count = None;
        let mut first_arg = None;
        let mut contains = Vec::new();

        loop {
            let Some(token) = &self.current else {
                return Err(self.unexpected(ARGUMENT_ENTRY));
            };
            let is_count = token.kind() == TokenKind::Keyword && token.literal() == "args";

            match token.kind() {
                TokenKind::RightParen => break,
                TokenKind::Keyword if is_count => count = Some(self.count()?),
                TokenKind::Caret => {
                    self.consume(TokenKind::Caret)?;
                    if self.peek() != Some(TokenKind::Sigil) {
                        return Err(self.unexpected("a `$` pattern after `^`"));
                    }
                    first_arg = Some(self.identifier()?);
                }
                TokenKind::Sigil => contains.push(self.identifier()?),
                TokenKind::Ellipsis => {
                    self.consume(TokenKind::Ellipsis)?;
                }
                _ => return Err(self.unexpected(ARGUMENT_ENTRY)),
            }

            match self.peek() {
                Some(TokenKind::Comma) => {
                    self.consume(TokenKind::Comma)?;
                }
                Some(TokenKind::RightParen) => {}
                _ => return Err(self.unexpected("`,` or `)`")),
            }
        }

        self.consume(TokenKind::RightParen)?;
        Ok(ArgumentsPattern::new(count, first_arg, contains))
    }

    fn count(&mut self) -> Result<usize, QuerySyntaxError> {
        self.consume(TokenKind::Keyword)?;
        self.consume(TokenKind::Equals)?;
        let number = self.consume(TokenKind::Number)?;
        number.literal().parse().map_err(|_| {
            QuerySyntaxError::at(
                number.column(),
                format!("number `{}` is too large", number.literal()),
            )
        })
    }

    fn optional_identifier(&mut self) -> Result<Option<IdentifierPattern>, QuerySyntaxError> {
        if self.peek() == Some(TokenKind::Sigil) {
            self.identifier().map(Some)
        } else {
            Ok(None)
        }
    }

    fn identifier(&mut self) -> Result<IdentifierPattern, QuerySyntaxError> {
        let sigil = self.consume(TokenKind::Sigil)?;
        let body = sigil.literal().strip_prefix('$').unwrap_or(sigil.literal());
        if body == IdentifierPattern::WILDCARD_NAME {
            return Ok(IdentifierPattern::wildcard());
        }
        Ok(IdentifierPattern::named(
            body.trim_matches('*'),
            body.starts_with('*'),
            body.ends_with('*'),
        ))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn ident(name: &str) -> IdentifierPattern {
        IdentifierPattern::named(name, false, false)
    }

    #[rstest]
    #[case("$*", Query::Identifier(IdentifierPattern::wildcard()))]
    #[case("$sgrep", Query::Identifier(ident("sgrep")))]
    #[case("$*sgrep", Query::Identifier(IdentifierPattern::named("sgrep", true, false)))]
    #[case("$sgrep*", Query::Identifier(IdentifierPattern::named("sgrep", false, true)))]
    #[case("def", Query::Function(FunctionPattern::new(None, None, false)))]
    #[case("call", Query::Function(FunctionPattern::new(None, None, true)))]
    #[case("class", Query::Class(ClassPattern::new(None, vec![])))]
    #[case("class $Other", Query::Class(ClassPattern::new(Some(ident("Other")), vec![])))]
    #[case("if", Query::Keyword(KeywordPattern::new("if")))]
    #[case("@ @ def", Query::Function(FunctionPattern::new(None, None, false)))]
    fn parses_top_level_patterns(#[case] text: &str, #[case] expected: Query) {
        assert_eq!(parse_query(text).expect("parse"), expected);
    }

    #[rstest]
    #[case("def (args=5, ^$self)", Some(5), Some(ident("self")), vec![])]
    #[case("def (args=0)", Some(0), None, vec![])]
    #[case("def ($a, ..., $b,)", None, None, vec![ident("a"), ident("b")])]
    #[case("def (^$a, ^$b)", None, Some(ident("b")), vec![])]
    #[case("def ()", None, None, vec![])]
    #[case("def (args=10)", Some(10), None, vec![])]
    fn parses_argument_lists(
        #[case] text: &str,
        #[case] count: Option<usize>,
        #[case] first_arg: Option<IdentifierPattern>,
        #[case] contains: Vec<IdentifierPattern>,
    ) {
        let expected = Query::Function(FunctionPattern::new(
            None,
            Some(ArgumentsPattern::new(count, first_arg, contains)),
            false,
        ));
        assert_eq!(parse_query(text).expect("parse"), expected);
    }

    #[rstest]
    #[case("@")]
    #[case("..")]
    #[case("$class")]
    #[case("   ")]
    #[case("def $a $b")]
    #[case("def (args)")]
    #[case("def (args=)")]
    #[case("def (^)")]
    #[case("def (^args)")]
    #[case("def ($a,, $b)")]
    #[case("def ($a $b)")]
    #[case("def (, $a)")]
    #[case("def (if)")]
    #[case("def ($a")]
    #[case("( def")]
    fn rejects_malformed_queries(#[case] text: &str) {
        assert!(parse_query(text).is_err(), "{text} should not parse");
    }

    #[test]
    fn parsing_is_deterministic() {
        let text = "call $print* (args=2, ^$*msg, $end)";
        assert_eq!(
            parse_query(text).expect("parse"),
            parse_query(text).expect("parse")
        );
    }

    #[test]
    fn errors_point_at_the_offending_token() {
        let error = parse_query("def $a $b").expect_err("trailing sigil");
        assert_eq!(error.column(), Some(8));
    }
}
