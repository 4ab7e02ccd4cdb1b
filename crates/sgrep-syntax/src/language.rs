//! The languages sgrep can parse, and how files are mapped onto them.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::error::SyntaxError;

/// A language with a bundled Tree-sitter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SupportedLanguage {
    /// Python (`.py`, `.pyi`).
    #[default]
    Python,
    /// Rust (`.rs`).
    Rust,
    /// TypeScript, including TSX (`.ts`, `.tsx`, `.mts`, `.cts`).
    TypeScript,
}

impl SupportedLanguage {
    const ALL: [Self; 3] = [Self::Python, Self::Rust, Self::TypeScript];

    /// Every supported language, Python first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &Self::ALL
    }

    /// File extensions (without the dot) that select this language.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Python => &["py", "pyi"],
            Self::Rust => &["rs"],
            Self::TypeScript => &["ts", "tsx", "mts", "cts"],
        }
    }

    /// Canonical lower-case name, as accepted by `--language`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Rust => "rust",
            Self::TypeScript => "typescript",
        }
    }

    /// Maps an extension, compared case-insensitively, onto a language.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgrep_syntax::SupportedLanguage;
    ///
    /// assert_eq!(
    ///     SupportedLanguage::from_extension("PYI"),
    ///     Some(SupportedLanguage::Python)
    /// );
    /// assert_eq!(SupportedLanguage::from_extension("ipynb"), None);
    /// ```
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|language| {
            language
                .extensions()
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
    }

    /// Maps a path onto a language by its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str().and_then(Self::from_extension)
    }

    /// Like [`Self::from_path`], but explains why a path was rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnknownLanguage`] when the path has no
    /// extension and [`SyntaxError::UnsupportedExtension`] when the
    /// extension is not one sgrep parses.
    pub fn detect(path: &Path) -> Result<Self, SyntaxError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| SyntaxError::unknown_language(path.to_path_buf()))?;
        Self::from_extension(ext).ok_or_else(|| SyntaxError::unsupported_extension(ext))
    }

    /// Returns the grammar for this language.
    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            // TSX is a superset, so plain `.ts` files parse with it too.
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `--language` value that names no supported language.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported language: '{input}' (expected python, rust or typescript)")]
pub struct LanguageParseError {
    input: String,
}

impl LanguageParseError {
    /// Returns the rejected input, trimmed and lower-cased.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for SupportedLanguage {
    type Err = LanguageParseError;

    /// Accepts the canonical name or any extension of a language.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let wanted = input.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|language| language.as_str() == wanted)
            .or_else(|| Self::from_extension(&wanted))
            .ok_or(LanguageParseError { input: wanted })
    }
}
