use sgrep_query::{ClassPattern, NameMatching, PatternKind};
use sgrep_syntax::{ClassNode, NodeHandle, SourceTree, Visitor, walk};

use super::{Matcher, Matches};

/// Matches class definitions by name. Base classes are not checked.
#[derive(Debug, Clone)]
pub struct ClassMatcher {
    pattern: ClassPattern,
    matching: NameMatching,
}

impl ClassMatcher {
    /// Creates a matcher for `pattern`.
    #[must_use]
    pub const fn new(pattern: ClassPattern, matching: NameMatching) -> Self {
        Self { pattern, matching }
    }

    fn accepts(&self, class: &ClassNode<'_>) -> bool {
        self.pattern.name().is_none_or(|wanted| {
            class
                .name()
                .is_some_and(|name| wanted.matches(name, self.matching))
        })
    }
}

impl Matcher for ClassMatcher {
    fn kind(&self) -> PatternKind {
        PatternKind::Class
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
    matcher: &'m ClassMatcher,
    matches: Matches<'t>,
}

impl<'t> Visitor<'t> for Run<'_, 't> {
    fn visit_class(&mut self, node: ClassNode<'t>) {
        if self.matcher.accepts(&node) {
            self.matches.record(node.handle());
        }
    }
}
