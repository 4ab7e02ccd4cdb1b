//! Per-variant matchers.
//!
//! A matcher is built once per query and is immutable afterwards. Each call
//! to [`Matcher::find_all`] walks one tree with a private accumulator, so a
//! single matcher can serve many trees on many threads at once.

mod class;
mod function;
mod identifier;
mod keyword;

use std::collections::HashSet;
use std::fmt;

use sgrep_query::PatternKind;
use sgrep_syntax::{NodeHandle, SourceTree};

pub use class::ClassMatcher;
pub use function::FunctionMatcher;
pub use identifier::IdentifierMatcher;
pub use keyword::KeywordMatcher;

/// A compiled query ready to run against source trees.
pub trait Matcher: fmt::Debug + Send + Sync {
    /// Returns the pattern kind this matcher implements.
    fn kind(&self) -> PatternKind;

    /// Returns every matching node of `tree` in pre-order traversal order.
    /// A node appears at most once.
    fn find_all<'t>(&self, tree: &'t SourceTree) -> Vec<NodeHandle<'t>>;
}

/// Matched nodes of one traversal, deduplicated by node identity.
#[derive(Debug, Default)]
pub(crate) struct Matches<'t> {
    nodes: Vec<NodeHandle<'t>>,
    seen: HashSet<usize>,
}

impl<'t> Matches<'t> {
    pub(crate) fn record(&mut self, node: NodeHandle<'t>) {
        if self.seen.insert(node.id()) {
            self.nodes.push(node);
        }
    }

    pub(crate) fn into_nodes(self) -> Vec<NodeHandle<'t>> {
        self.nodes
    }
}
