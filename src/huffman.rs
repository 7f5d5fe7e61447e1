//! Huffman tree construction
//!
//! Builds a single prefix tree from byte frequencies by repeatedly merging
//! the two lightest partial trees taken from a min-priority queue.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::frequency::Frequencies;
use crate::tree::{BinaryTree, Node, NodeId};

/// Prefix tree whose leaves carry byte values.
pub type HuffmanTree = BinaryTree<u8>;

#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    weight: u64,
    id: NodeId,
}

impl Eq for QueueEntry {}
impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.id == other.id
    }
}
impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for QueueEntry {
    // min-heap on weight; among equal weights the earliest-created node
    // (lowest arena index) is dequeued first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.id.index().cmp(&self.id.index()))
    }
}

/// Build the Huffman tree for `freq`.
///
/// Leaves are created in ascending byte order, so the result depends only on
/// the counts. Each merge puts the first dequeued node on the left and the
/// second on the right. A single distinct symbol yields a root that is
/// itself the only leaf; no symbols yield an empty tree.
pub fn build_tree(freq: &Frequencies) -> HuffmanTree {
    let distinct = freq.distinct();
    if distinct == 0 {
        return HuffmanTree::new();
    }

    let mut nodes: Vec<Node<u8>> = Vec::with_capacity(2 * distinct - 1);
    let mut heap = BinaryHeap::with_capacity(distinct);
    for (symbol, count) in freq.iter() {
        let id = NodeId::from_index(nodes.len());
        nodes.push(Node::leaf(symbol));
        heap.push(QueueEntry { weight: count, id });
    }

    while heap.len() > 1 {
        let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
            break;
        };
        let id = NodeId::from_index(nodes.len());
        nodes.push(Node::internal(left.id, right.id));
        heap.push(QueueEntry {
            weight: left.weight + right.weight,
            id,
        });
    }

    let root = match heap.pop() {
        Some(entry) => entry.id,
        None => return HuffmanTree::new(),
    };
    debug!(distinct, nodes = nodes.len(), "built huffman tree");
    HuffmanTree::from_arena(nodes, root)
}
