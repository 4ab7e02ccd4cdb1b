//! Query compilation and execution.
//!
//! The [`Engine`] runs the query pipeline once (lex, parse, pick a matcher)
//! and hands back a [`CompiledQuery`] that can be run against any number of
//! source trees.

use sgrep_query::{NameMatching, Query, parse_query};
use sgrep_syntax::{NodeHandle, SourceTree};
use tracing::debug;

use crate::error::EngineError;
use crate::matchers::Matcher;
use crate::registry::PatternRegistry;

/// Options shared by every matcher an engine builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// How identifier patterns compare against names in the source.
    pub name_matching: NameMatching,
}

impl MatchOptions {
    /// Options with anchored identifier matching switched on or off.
    #[must_use]
    pub const fn anchored(anchored: bool) -> Self {
        let name_matching = if anchored {
            NameMatching::Anchored
        } else {
            NameMatching::Substring
        };
        Self { name_matching }
    }
}

/// A query paired with the matcher built for it.
#[derive(Debug)]
pub struct CompiledQuery {
    query: Query,
    matcher: Box<dyn Matcher>,
}

impl CompiledQuery {
    /// Returns the parsed query.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    /// Returns every match in `tree`, in traversal order.
    #[must_use]
    pub fn find_all<'t>(&self, tree: &'t SourceTree) -> Vec<NodeHandle<'t>> {
        self.matcher.find_all(tree)
    }
}

/// Compiles query text into runnable matchers.
///
/// # Example
///
/// ```
/// use sgrep::{Engine, MatchOptions};
/// use sgrep_syntax::{Parser, SupportedLanguage};
///
/// let engine = Engine::new(MatchOptions::default());
/// let query = engine.compile("def $one")?;
///
/// let mut parser = Parser::new(SupportedLanguage::Python)?;
/// let tree = parser.parse("def one():\n    pass\n")?;
/// assert_eq!(query.find_all(&tree).len(), 1);
/// # Ok::<(), sgrep::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    registry: PatternRegistry,
    options: MatchOptions,
}

impl Engine {
    /// Creates an engine using the built-in matchers.
    #[must_use]
    pub fn new(options: MatchOptions) -> Self {
        Self::with_registry(PatternRegistry::with_builtins(), options)
    }

    /// Creates an engine using a caller-supplied registry.
    #[must_use]
    pub const fn with_registry(registry: PatternRegistry, options: MatchOptions) -> Self {
        Self { registry, options }
    }

    /// Parses `text` and builds its matcher.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Query`] for malformed query text and
    /// [`EngineError::PatternNotImplemented`] when the registry has no
    /// matcher for the query.
    pub fn compile(&self, text: &str) -> Result<CompiledQuery, EngineError> {
        let query = parse_query(text)?;
        let matcher = self.registry.create(&query, &self.options)?;
        debug!(
            query = text,
            kind = %query.kind(),
            name_matching = ?self.options.name_matching,
            "compiled query"
        );
        Ok(CompiledQuery { query, matcher })
    }
}
