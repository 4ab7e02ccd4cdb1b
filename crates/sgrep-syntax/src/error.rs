//! Failures while selecting a grammar or building a source tree.
//!
//! When many files are searched, each of these is a per-file failure; none
//! of them stops the search.

use std::path::PathBuf;

use thiserror::Error;

use crate::language::SupportedLanguage;

/// Everything that can go wrong in this crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// The grammar could not be loaded into a Tree-sitter parser.
    #[error("failed to initialise parser for {language}: {message}")]
    ParserInitError {
        /// Language whose grammar was rejected.
        language: SupportedLanguage,
        /// Reason reported by Tree-sitter.
        message: String,
    },

    /// A path was given whose extension sgrep does not parse.
    #[error("unsupported file extension: {extension}")]
    UnsupportedExtension {
        /// Extension, without the dot.
        extension: String,
    },

    /// A path was given without any extension to go on.
    #[error("could not determine language for path: {}", path.display())]
    UnknownLanguage {
        /// The offending path.
        path: PathBuf,
    },

    /// Tree-sitter produced no tree at all.
    #[error("failed to parse {language}: {message}")]
    ParseError {
        /// Grammar in use.
        language: SupportedLanguage,
        /// What went wrong.
        message: String,
    },

    /// A tree was produced but needed error recovery, and the caller asked
    /// for clean source.
    #[error("invalid {language} source at {line}:{column}: {message}")]
    InvalidSource {
        /// Grammar in use.
        language: SupportedLanguage,
        /// One-based line of the first error site.
        line: u32,
        /// One-based column of the first error site.
        column: u32,
        /// Description of the first error site.
        message: String,
    },
}

impl SyntaxError {
    /// Builds [`Self::ParserInitError`].
    #[must_use]
    pub fn parser_init(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParserInitError {
            language,
            message: message.into(),
        }
    }

    /// Builds [`Self::UnsupportedExtension`].
    #[must_use]
    pub fn unsupported_extension(extension: impl Into<String>) -> Self {
        Self::UnsupportedExtension {
            extension: extension.into(),
        }
    }

    /// Builds [`Self::UnknownLanguage`].
    #[must_use]
    pub const fn unknown_language(path: PathBuf) -> Self {
        Self::UnknownLanguage { path }
    }

    /// Builds [`Self::ParseError`].
    #[must_use]
    pub fn parse(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParseError {
            language,
            message: message.into(),
        }
    }

    /// Builds [`Self::InvalidSource`] at a one-based `(line, column)`.
    #[must_use]
    pub fn invalid_source(
        language: SupportedLanguage,
        (line, column): (u32, u32),
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidSource {
            language,
            line,
            column,
            message: message.into(),
        }
    }
}
