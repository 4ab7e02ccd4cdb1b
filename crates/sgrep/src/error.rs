//! Errors raised while compiling or running a query.

use sgrep_query::{PatternKind, QuerySyntaxError};
use sgrep_syntax::SyntaxError;
use thiserror::Error;

/// Errors from the match engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The query text is malformed.
    #[error(transparent)]
    Query(#[from] QuerySyntaxError),

    /// A source file could not be parsed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// No matcher is registered for the query's pattern kind.
    #[error("pattern not implemented: {kind}")]
    PatternNotImplemented {
        /// The kind without a registered matcher.
        kind: PatternKind,
    },

    /// A matcher constructor was handed a query of another kind.
    #[error("{expected} matcher cannot be built from a {found} pattern")]
    PatternMismatch {
        /// The kind the constructor builds matchers for.
        expected: PatternKind,
        /// The kind of the query it received.
        found: PatternKind,
    },
}

impl EngineError {
    /// Creates a registry-miss error.
    #[must_use]
    pub const fn pattern_not_implemented(kind: PatternKind) -> Self {
        Self::PatternNotImplemented { kind }
    }

    /// Creates a constructor mismatch error.
    #[must_use]
    pub const fn pattern_mismatch(expected: PatternKind, found: PatternKind) -> Self {
        Self::PatternMismatch { expected, found }
    }
}
