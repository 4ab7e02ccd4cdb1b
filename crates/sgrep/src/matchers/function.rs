use sgrep_query::{FunctionPattern, NameMatching, PatternKind};
use sgrep_syntax::{CallNode, Entry, FunctionNode, NodeHandle, SourceTree, Visitor, walk};

use super::{Matcher, Matches};

/// Matches function definitions or call sites.
///
/// With neither a name nor an argument list every candidate matches.
/// Otherwise a candidate matches when its name matches **or** its
/// parameter/argument list satisfies the argument constraints. An empty
/// argument list in the query is satisfied by every candidate.
#[derive(Debug, Clone)]
pub struct FunctionMatcher {
    pattern: FunctionPattern,
    matching: NameMatching,
}

impl FunctionMatcher {
    /// Creates a matcher for `pattern`.
    #[must_use]
    pub const fn new(pattern: FunctionPattern, matching: NameMatching) -> Self {
        Self { pattern, matching }
    }

    // `()` and `(...)` are present but empty, so they accept every list.
    fn accepts<'t>(&self, name: Option<&str>, entries: impl FnOnce() -> Vec<Entry<'t>>) -> bool {
        let wanted_name = self.pattern.name();
        let wanted_args = self.pattern.args();
        if wanted_name.is_none() && wanted_args.is_none() {
            return true;
        }

        let name_matches = wanted_name
            .zip(name)
            .is_some_and(|(wanted, actual)| wanted.matches(actual, self.matching));
        name_matches
            || wanted_args.is_some_and(|args| {
                let list = entries();
                let names: Vec<&str> = list.iter().map(Entry::name).collect();
                args.matches(&names, self.matching)
            })
    }
}

impl Matcher for FunctionMatcher {
    fn kind(&self) -> PatternKind {
        PatternKind::Function
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
    matcher: &'m FunctionMatcher,
    matches: Matches<'t>,
}

impl<'t> Visitor<'t> for Run<'_, 't> {
    fn visit_function(&mut self, node: FunctionNode<'t>) {
        if self.matcher.pattern.is_call() {
            return;
        }
        if self.matcher.accepts(node.name(), || node.parameters()) {
            self.matches.record(node.handle());
        }
    }

    fn visit_call(&mut self, node: CallNode<'t>) {
        if !self.matcher.pattern.is_call() {
            return;
        }
        if self.matcher.accepts(node.name(), || node.arguments()) {
            self.matches.record(node.handle());
        }
    }
}
