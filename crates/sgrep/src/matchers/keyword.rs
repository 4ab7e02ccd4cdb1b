use sgrep_query::{KeywordPattern, PatternKind};
use sgrep_syntax::{NodeHandle, SourceTree, Visitor, walk};

use super::{Matcher, Matches};

/// Matches the constructs that carry a reserved word.
///
/// A node matches when one of its direct anonymous children is the keyword
/// token (`import_statement` for `import`), or when it is a named leaf
/// spelled as the keyword (`none` for `None`).
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    pattern: KeywordPattern,
}

impl KeywordMatcher {
    /// Creates a matcher for `pattern`.
    #[must_use]
    pub const fn new(pattern: KeywordPattern) -> Self {
        Self { pattern }
    }

    fn accepts(&self, node: NodeHandle<'_>) -> bool {
        node.bears_keyword(self.pattern.keyword())
    }
}

impl Matcher for KeywordMatcher {
    fn kind(&self) -> PatternKind {
        PatternKind::Keyword
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
    matcher: &'m KeywordMatcher,
    matches: Matches<'t>,
}

impl<'t> Visitor<'t> for Run<'_, 't> {
    fn visit_node(&mut self, node: NodeHandle<'t>) {
        if self.matcher.accepts(node) {
            self.matches.record(node);
        }
    }
}
