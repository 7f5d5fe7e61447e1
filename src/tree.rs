//! Path-addressed binary tree
//!
//! Nodes live in an arena owned by the tree and are addressed by [`NodeId`].
//! A path is a slice of bits where `false` (0) selects the left child and
//! `true` (1) the right child. Traversal state is kept outside the tree in a
//! [`Cursor`], so any number of decoders can walk the same tree.

use crate::error::CodecError;

/// Index of a node inside the arena of the tree that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Node<T> {
    value: Option<T>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<T> Node<T> {
    fn empty() -> Self {
        Self {
            value: None,
            left: None,
            right: None,
        }
    }

    pub(crate) fn leaf(value: T) -> Self {
        Self {
            value: Some(value),
            left: None,
            right: None,
        }
    }

    pub(crate) fn internal(left: NodeId, right: NodeId) -> Self {
        Self {
            value: None,
            left: Some(left),
            right: Some(right),
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn child(&self, bit: bool) -> Option<NodeId> {
        if bit {
            self.right
        } else {
            self.left
        }
    }

    /// Leafhood is payload presence. A node without children but also
    /// without a value is still internal.
    pub fn is_leaf(&self) -> bool {
        self.value.is_some()
    }

    fn set_child(&mut self, bit: bool, id: NodeId) {
        if bit {
            self.right = Some(id);
        } else {
            self.left = Some(id);
        }
    }
}

#[derive(Debug, Clone)]
pub struct BinaryTree<T> {
    nodes: Vec<Node<T>>,
    root: NodeId,
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BinaryTree<T> {
    /// A tree holding a single root without payload or children.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::empty()],
            root: NodeId(0),
        }
    }

    /// Adopt an arena built bottom-up. `root` must index into `nodes`.
    pub(crate) fn from_arena(nodes: Vec<Node<T>>, root: NodeId) -> Self {
        debug_assert!(root.0 < nodes.len());
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, internal and leaves.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|n| n.value.is_none())
    }

    /// Set the payload at the end of `path`, creating missing internal
    /// nodes on the way. An existing payload is overwritten.
    pub fn insert(&mut self, path: &[bool], value: T) -> Result<(), CodecError> {
        if path.is_empty() {
            return Err(CodecError::InvalidPath(
                "empty path would turn the root into a leaf".into(),
            ));
        }

        let mut at = self.root;
        for &bit in path {
            at = match self.nodes[at.0].child(bit) {
                Some(next) => next,
                None => {
                    let next = NodeId(self.nodes.len());
                    self.nodes.push(Node::empty());
                    self.nodes[at.0].set_child(bit, next);
                    next
                }
            };
        }
        self.nodes[at.0].value = Some(value);
        Ok(())
    }

    pub fn search(&self, path: &[bool]) -> Option<&Node<T>> {
        let mut node = self.get(self.root)?;
        for &bit in path {
            node = self.get(node.child(bit)?)?;
        }
        Some(node)
    }

    /// A fresh traversal positioned at the root.
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor {
            tree: self,
            at: self.root,
        }
    }
}

/// Traversal position over a borrowed tree. Stepping never changes the
/// tree shape.
#[derive(Debug, Clone)]
pub struct Cursor<'a, T> {
    tree: &'a BinaryTree<T>,
    at: NodeId,
}

impl<'a, T> Cursor<'a, T> {
    /// Move to the child selected by `bit`. Returns `None` and stays put
    /// when that child does not exist.
    pub fn step(&mut self, bit: bool) -> Option<&'a Node<T>> {
        let tree = self.tree;
        let next = tree.get(self.at)?.child(bit)?;
        let node = tree.get(next)?;
        self.at = next;
        Some(node)
    }

    pub fn reset(&mut self) {
        self.at = self.tree.root;
    }

    pub fn position(&self) -> NodeId {
        self.at
    }

    pub fn at_root(&self) -> bool {
        self.at == self.tree.root
    }
}
