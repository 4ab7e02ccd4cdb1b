//! Opaque node handles handed from the tree walker to matchers and on to
//! reporting.

use std::fmt;
use std::ops::Range;

use crate::position::point_to_one_based;

/// A reference to one node of a [`SourceTree`](crate::SourceTree).
///
/// Handles are cheap to copy. Two handles are equal when they point at the
/// same node of the same tree; node contents are never compared.
#[derive(Clone, Copy)]
pub struct NodeHandle<'t> {
    node: tree_sitter::Node<'t>,
    source: &'t str,
}

impl<'t> NodeHandle<'t> {
    pub(crate) const fn new(node: tree_sitter::Node<'t>, source: &'t str) -> Self {
        Self { node, source }
    }

    /// Returns the identity of the node within its tree.
    #[must_use]
    pub fn id(&self) -> usize {
        self.node.id()
    }

    /// Returns the grammar kind of the node, such as `function_definition`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    /// Returns the byte range of the node in the source.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.node.byte_range()
    }

    /// Returns the one-based line on which the node starts.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.start_position().0
    }

    /// Returns the one-based (line, column) where the node starts.
    #[must_use]
    pub fn start_position(&self) -> (u32, u32) {
        point_to_one_based(self.node.start_position())
    }

    /// Returns the exact source text covered by the node.
    #[must_use]
    pub fn text(&self) -> &'t str {
        self.source.get(self.byte_range()).unwrap_or_default()
    }

    /// Renders the node as a standalone snippet.
    ///
    /// The first line starts at the node itself; continuation lines lose
    /// the indentation the node inherited from its position in the file,
    /// so a nested method renders as if it were written at top level.
    #[must_use]
    pub fn render(&self) -> String {
        let indent = self.node.start_position().column;
        let mut lines = self.text().lines();
        let mut rendered = String::with_capacity(self.byte_range().len());

        if let Some(first) = lines.next() {
            rendered.push_str(first);
        }
        for line in lines {
            rendered.push('\n');
            let leading = line.len() - line.trim_start_matches([' ', '\t']).len();
            rendered.push_str(line.get(leading.min(indent)..).unwrap_or(line));
        }

        rendered
    }

    /// Returns whether the node is a construct introduced or spelled by
    /// `keyword`.
    ///
    /// That is either a named node with a direct anonymous child token
    /// spelled as the keyword (`import_statement` for `import`) or a named
    /// leaf whose text is the keyword (`none` for `None`). Plain identifiers
    /// never qualify.
    #[must_use]
    pub fn bears_keyword(&self, keyword: &str) -> bool {
        if !self.is_named() {
            return false;
        }
        let children = self.children();
        if children.is_empty() {
            return self.kind() != "identifier" && self.text() == keyword;
        }
        children
            .iter()
            .any(|child| !child.is_named() && child.kind() == keyword)
    }

    pub(crate) fn field(&self, name: &str) -> Option<Self> {
        self.node
            .child_by_field_name(name)
            .map(|child| Self::new(child, self.source))
    }

    pub(crate) fn parent(&self) -> Option<Self> {
        self.node
            .parent()
            .map(|parent| Self::new(parent, self.source))
    }

    pub(crate) fn is_field_of(&self, parent: &Self, name: &str) -> bool {
        parent.field(name).is_some_and(|child| child == *self)
    }

    /// Named children, skipping comments (Tree-sitter "extras").
    pub(crate) fn named_children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .named_children(&mut cursor)
            .filter(|child| !child.is_extra())
            .map(|child| Self::new(child, self.source))
            .collect()
    }

    /// Direct children, named and anonymous.
    pub(crate) fn children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .children(&mut cursor)
            .map(|child| Self::new(child, self.source))
            .collect()
    }

    pub(crate) fn is_named(&self) -> bool {
        self.node.is_named()
    }
}

impl PartialEq for NodeHandle<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for NodeHandle<'_> {}

impl fmt::Debug for NodeHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, column) = self.start_position();
        f.debug_struct("NodeHandle")
            .field("kind", &self.kind())
            .field("line", &line)
            .field("column", &column)
            .field("text", &self.text())
            .finish()
    }
}
