//! Stack-based syntax tree traversal.
//!
//! Deep or adversarial inputs can nest far enough to overflow the call
//! stack, so every walk in the engine goes through [`Descendants`], which
//! keeps pending nodes on a heap-allocated work stack.

use tree_sitter::{Node, TreeCursor};

/// Pre-order iterator over a node and all of its descendants.
pub struct Descendants<'tree> {
    stack: Vec<Node<'tree>>,
    cursor: TreeCursor<'tree>,
}

impl<'tree> Descendants<'tree> {
    /// Start a traversal rooted at `root` (yielded first).
    pub fn new(root: Node<'tree>) -> Self {
        Self {
            stack: vec![root],
            cursor: root.walk(),
        }
    }
}

impl<'tree> Iterator for Descendants<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Node<'tree>> {
        let node = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(node.children(&mut self.cursor));
        // Children are popped from the end; keep source order.
        self.stack[start..].reverse();
        Some(node)
    }
}

/// Convenience constructor for [`Descendants`].
pub fn descendants(root: Node<'_>) -> Descendants<'_> {
    Descendants::new(root)
}
