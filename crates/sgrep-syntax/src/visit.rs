//! Pre-order traversal of a [`SourceTree`].
//!
//! [`walk`] visits every node of the tree, nested ones included, and
//! dispatches each to the [`Visitor`] method for its structural role. All
//! methods default to doing nothing, so a visitor only implements the hooks
//! it needs.

use crate::node::NodeHandle;
use crate::parser::SourceTree;
use crate::structure::{CallNode, ClassNode, FunctionNode, StructuralKind, classify};

/// Callbacks invoked by [`walk`].
pub trait Visitor<'t> {
    /// Called for every identifier used as a name reference.
    fn visit_name(&mut self, _node: NodeHandle<'t>) {}

    /// Called for every function or method definition.
    fn visit_function(&mut self, _node: FunctionNode<'t>) {}

    /// Called for every call expression.
    fn visit_call(&mut self, _node: CallNode<'t>) {}

    /// Called for every class-like definition.
    fn visit_class(&mut self, _node: ClassNode<'t>) {}

    /// Called for every named node, before any structural hook for it.
    fn visit_node(&mut self, _node: NodeHandle<'t>) {}
}

/// Walks `tree` depth-first in source order.
pub fn walk<'t, V>(tree: &'t SourceTree, visitor: &mut V)
where
    V: Visitor<'t> + ?Sized,
{
    let language = tree.language();
    let source = tree.source();
    let mut cursor = tree.tree().walk();

    loop {
        let node = cursor.node();
        if node.is_named() && !node.is_extra() {
            let handle = NodeHandle::new(node, source);
            visitor.visit_node(handle);
            match classify(language, handle) {
                Some(StructuralKind::NameReference) => visitor.visit_name(handle),
                Some(StructuralKind::FunctionDefinition) => {
                    visitor.visit_function(FunctionNode::new(handle, language));
                }
                Some(StructuralKind::Call) => visitor.visit_call(CallNode::new(handle, language)),
                Some(StructuralKind::ClassDefinition) => {
                    visitor.visit_class(ClassNode::new(handle));
                }
                None => {}
            }
        }

        if cursor.goto_first_child() || cursor.goto_next_sibling() {
            continue;
        }
        loop {
            if !cursor.goto_parent() {
                return;
            }
            if cursor.goto_next_sibling() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Parser, SupportedLanguage};

    #[derive(Default)]
    struct Kinds(Vec<&'static str>);

    impl<'t> Visitor<'t> for Kinds {
        fn visit_node(&mut self, node: NodeHandle<'t>) {
            self.0.push(node.kind());
        }
    }

    #[test]
    fn walk_visits_named_nodes_in_pre_order() {
        let mut parser = Parser::new(SupportedLanguage::Python).expect("parser init");
        let tree = parser.parse("x = f(y)\n").expect("parse");
        let mut kinds = Kinds::default();

        walk(&tree, &mut kinds);

        assert_eq!(
            kinds.0,
            vec![
                "module",
                "expression_statement",
                "assignment",
                "identifier",
                "call",
                "identifier",
                "argument_list",
                "identifier",
            ]
        );
    }

    #[test]
    fn walk_skips_comments() {
        let mut parser = Parser::new(SupportedLanguage::Python).expect("parser init");
        let tree = parser.parse("# note\n").expect("parse");
        let mut kinds = Kinds::default();

        walk(&tree, &mut kinds);

        assert_eq!(kinds.0, vec!["module"]);
    }
}
