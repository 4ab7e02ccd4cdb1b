//! Turns source text into searchable trees.
//!
//! Tree-sitter recovers from broken input, so parsing only fails when no tree
//! can be built at all. Recovered trees are searchable as they are; callers
//! that want clean input use [`SourceTree::check`].

use std::fmt;
use std::ops::Range;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::node::NodeHandle;
use crate::position::point_to_one_based;

/// Longest snippet, in characters, kept for an [`ErrorSite`].
const SNIPPET_CHARS: usize = 48;

/// A parsed file: the syntax tree together with the text it covers.
#[derive(Debug)]
pub struct SourceTree {
    tree: tree_sitter::Tree,
    source: String,
    language: SupportedLanguage,
}

impl SourceTree {
    /// Returns the Tree-sitter tree.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Returns the parsed text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the grammar the text was parsed with.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns a handle to the root node.
    #[must_use]
    pub fn root(&self) -> NodeHandle<'_> {
        NodeHandle::new(self.tree.root_node(), &self.source)
    }

    /// Returns whether recovery inserted ERROR or MISSING nodes.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Lists every ERROR and MISSING node, in source order.
    ///
    /// Subtrees without errors are not descended into.
    #[must_use]
    pub fn errors(&self) -> Vec<ErrorSite> {
        let mut sites = Vec::new();
        let mut cursor = self.tree.walk();

        loop {
            let node = cursor.node();
            if node.is_error() || node.is_missing() {
                sites.push(ErrorSite::new(node, &self.source));
            }
            if node.has_error() && cursor.goto_first_child() {
                continue;
            }
            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    return sites;
                }
            }
        }
    }

    /// Rejects trees that needed error recovery.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::InvalidSource`] located at the first error
    /// site.
    pub fn check(&self) -> Result<(), SyntaxError> {
        self.errors().first().map_or(Ok(()), |site| {
            Err(SyntaxError::invalid_source(
                self.language,
                (site.line, site.column),
                site.to_string(),
            ))
        })
    }
}

/// Where error recovery kicked in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSite {
    /// Byte range covered by the error node.
    pub byte_range: Range<usize>,
    /// One-based line of the error.
    pub line: u32,
    /// One-based column of the error.
    pub column: u32,
    /// The offending text, shortened to a few dozen characters.
    pub snippet: String,
    /// Grammar kind the parser had to invent, for MISSING nodes.
    pub missing: Option<&'static str>,
}

impl ErrorSite {
    fn new(node: tree_sitter::Node<'_>, source: &str) -> Self {
        let byte_range = node.byte_range();
        let snippet = shorten(source.get(byte_range.clone()).unwrap_or_default());
        let (line, column) = point_to_one_based(node.start_position());

        Self {
            byte_range,
            line,
            column,
            snippet,
            missing: node.is_missing().then_some(node.kind()),
        }
    }
}

fn shorten(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_CHARS) {
        Some((cut, _)) => format!("{}...", text.get(..cut).unwrap_or(text)),
        None => text.to_owned(),
    }
}

impl fmt::Display for ErrorSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.missing {
            Some(kind) => write!(f, "missing {kind}"),
            None if self.snippet.is_empty() => f.write_str("syntax error"),
            None => write!(f, "syntax error near `{}`", self.snippet),
        }
    }
}

/// A Tree-sitter parser bound to one language.
///
/// Parsers hold mutable state and are not shared between threads; keep one
/// per worker.
pub struct Parser {
    inner: tree_sitter::Parser,
    language: SupportedLanguage,
}

impl Parser {
    /// Creates a parser for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParserInitError`] when the grammar is
    /// incompatible with the linked Tree-sitter runtime.
    pub fn new(language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&language.tree_sitter_language())
            .map_err(|error| SyntaxError::parser_init(language, error.to_string()))?;
        Ok(Self { inner, language })
    }

    /// Returns the language this parser reads.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Parses `source`, copying it into the returned tree.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParseError`] when Tree-sitter gives up without
    /// producing a tree. Broken source still yields a tree.
    pub fn parse(&mut self, source: &str) -> Result<SourceTree, SyntaxError> {
        let Some(tree) = self.inner.parse(source, None) else {
            return Err(SyntaxError::parse(self.language, "no tree was produced"));
        };
        Ok(SourceTree {
            tree,
            source: source.to_owned(),
            language: self.language,
        })
    }
}
