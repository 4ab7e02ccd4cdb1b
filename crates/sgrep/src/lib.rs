//! sgrep: structural code search backed by Tree-sitter.
//!
//! This facade crate ties the query language in [`sgrep_query`] to the
//! source trees of [`sgrep_syntax`]:
//!
//! - [`PatternRegistry`] maps each [`PatternKind`] to a matcher constructor
//! - [`Matcher`] implementations walk a tree and collect matching nodes
//! - [`Engine`] compiles query text into a reusable [`CompiledQuery`]
//!
//! # Example
//!
//! ```
//! use sgrep::{Engine, MatchOptions};
//! use sgrep_syntax::{Parser, SupportedLanguage};
//!
//! let query = Engine::new(MatchOptions::default()).compile("$*")?;
//! let mut parser = Parser::new(SupportedLanguage::Python)?;
//! let tree = parser.parse("four = 4\n")?;
//!
//! let names: Vec<_> = query.find_all(&tree).iter().map(|n| n.text()).collect();
//! assert_eq!(names, vec!["four"]);
//! # Ok::<(), sgrep::EngineError>(())
//! ```

mod engine;
mod error;
mod matchers;
mod registry;

pub use sgrep_query::{
    ArgumentsPattern, ClassPattern, FunctionPattern, IdentifierPattern, KeywordPattern,
    NameMatching, PatternKind, Query, QuerySyntaxError, parse_query,
};
pub use sgrep_syntax::{NodeHandle, SourceTree};

pub use engine::{CompiledQuery, Engine, MatchOptions};
pub use error::EngineError;
pub use matchers::{ClassMatcher, FunctionMatcher, IdentifierMatcher, KeywordMatcher, Matcher};
pub use registry::{MatcherConstructor, PatternRegistry};

#[cfg(test)]
mod tests;
