use sgrep_query::{IdentifierPattern, NameMatching, PatternKind};
use sgrep_syntax::{NodeHandle, SourceTree, Visitor, walk};

use super::{Matcher, Matches};

/// Matches identifiers used as values.
#[derive(Debug, Clone)]
pub struct IdentifierMatcher {
    pattern: IdentifierPattern,
    matching: NameMatching,
}

impl IdentifierMatcher {
    /// Creates a matcher for `pattern`.
    #[must_use]
    pub const fn new(pattern: IdentifierPattern, matching: NameMatching) -> Self {
        Self { pattern, matching }
    }
}

impl Matcher for IdentifierMatcher {
    fn kind(&self) -> PatternKind {
        PatternKind::Identifier
    }

    fn find_all<'t>(&self, tree: &'t SourceTree) -> Vec<NodeHandle<'t>> {
        let mut run = Run {
            matcher: self,
            matches: Matches::default(),
        };
        walk(tree, &mut run);
        run.matches.into_nodes()
    }
}

struct Run<'m, 't> {
    matcher: &'m IdentifierMatcher,
    matches: Matches<'t>,
}

impl<'t> Visitor<'t> for Run<'_, 't> {
    fn visit_name(&mut self, node: NodeHandle<'t>) {
        if self
            .matcher
            .pattern
            .matches(node.text(), self.matcher.matching)
        {
            self.matches.record(node);
        }
    }
}
