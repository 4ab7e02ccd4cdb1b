//! Errors raised while turning query text into a [`Query`](crate::Query).

use thiserror::Error;

/// A malformed query.
///
/// Raised by both the lexer and the parser. A query error aborts the run
/// before any source file is read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuerySyntaxError {
    /// The problem can be pinned to a character of the query.
    #[error("invalid query at column {column}: {message}")]
    At {
        /// One-based character offset into the query.
        column: usize,
        /// Description of the problem.
        message: String,
    },

    /// The problem concerns the query as a whole, such as premature end of
    /// input.
    #[error("invalid query: {message}")]
    General {
        /// Description of the problem.
        message: String,
    },
}

impl QuerySyntaxError {
    /// Creates an error located at a one-based column.
    #[must_use]
    pub fn at(column: usize, message: impl Into<String>) -> Self {
        Self::At {
            column,
            message: message.into(),
        }
    }

    /// Creates an error without a location.
    #[must_use]
    pub fn general(message: impl Into<String>) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Returns the description of the problem.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::At { message, .. } | Self::General { message } => message,
        }
    }

    /// Returns the one-based column of the problem, when known.
    #[must_use]
    pub const fn column(&self) -> Option<usize> {
        match self {
            Self::At { column, .. } => Some(*column),
            Self::General { .. } => None,
        }
    }
}
