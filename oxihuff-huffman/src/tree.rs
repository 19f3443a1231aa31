//! Huffman tree construction.
//!
//! The tree is built by repeatedly merging the two lightest nodes taken from
//! a min-priority queue until a single root remains.
//!
//! # Tie-breaking
//!
//! Every node entering the queue receives a sequence number: leaves are
//! numbered in ascending byte order, merged nodes take the next number when
//! they are created. Among nodes of equal weight the lowest sequence number
//! is removed first. The first node removed in a merge becomes the left
//! child, the second the right child. The same frequency table therefore
//! always yields the same tree.

use crate::code::CodeTable;
use crate::frequency::FrequencyTable;
use oxihuff_core::error::{HuffError, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Write as _;

/// A node of a Huffman tree.
///
/// Weights are construction-time bookkeeping only: they are not stored in
/// the compressed header and do not take part in equality. Trees read back
/// from a header carry weight 0.
#[derive(Debug, Clone)]
pub enum Node {
    /// A single byte value.
    Leaf {
        /// The byte this leaf stands for.
        byte: u8,
        /// Occurrence count of the byte.
        weight: u64,
    },
    /// A fork with exactly two children.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Subtree reached with bit `0`.
        left: Box<Node>,
        /// Subtree reached with bit `1`.
        right: Box<Node>,
    },
}

impl Node {
    /// Create a leaf.
    pub fn leaf(byte: u8, weight: u64) -> Self {
        Node::Leaf { byte, weight }
    }

    /// Create an internal node whose weight is the sum of its children,
    /// saturating at `u64::MAX`.
    pub fn internal(left: Node, right: Node) -> Self {
        Node::Internal {
            weight: left.weight().saturating_add(right.weight()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Weight of this node.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    /// Returns true for a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Byte value of a leaf; `None` for an internal node.
    pub fn byte(&self) -> Option<u8> {
        match self {
            Node::Leaf { byte, .. } => Some(*byte),
            Node::Internal { .. } => None,
        }
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path (0 for a lone leaf).
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Leaf { byte: a, .. }, Node::Leaf { byte: b, .. }) => a == b,
            (
                Node::Internal {
                    left: l1, right: r1, ..
                },
                Node::Internal {
                    left: l2, right: r2, ..
                },
            ) => l1 == l2 && r1 == r2,
            _ => false,
        }
    }
}

impl Eq for Node {}

/// Priority queue entry. Ordered so that `BinaryHeap` pops the lightest
/// node first and, among equal weights, the oldest one.
#[derive(Debug)]
struct QueueEntry {
    weight: u64,
    seq: usize,
    node: Node,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        (other.weight, other.seq).cmp(&(self.weight, self.seq))
    }
}

/// A complete Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build a tree from byte frequencies.
    ///
    /// A table with a single byte yields a tree whose root is a leaf.
    ///
    /// # Errors
    ///
    /// Returns [`HuffError::EmptyInput`] if `freq` is empty, and
    /// [`HuffError::InvariantViolation`] if the counts sum past `u64::MAX`.
    pub fn build(freq: &FrequencyTable) -> Result<Self> {
        let mut heap = BinaryHeap::with_capacity(freq.distinct());
        let mut seq = 0usize;

        for (byte, weight) in freq.iter() {
            heap.push(QueueEntry {
                weight,
                seq,
                node: Node::leaf(byte, weight),
            });
            seq += 1;
        }

        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                return Err(HuffError::invariant("priority queue drained during merge"));
            };
            let weight = left.weight.checked_add(right.weight).ok_or_else(|| {
                HuffError::invariant("total weight of the frequency table exceeds u64::MAX")
            })?;
            heap.push(QueueEntry {
                weight,
                seq,
                node: Node::internal(left.node, right.node),
            });
            seq += 1;
        }

        let root = heap.pop().map(|entry| entry.node).ok_or(HuffError::EmptyInput)?;
        log::debug!(
            "built Huffman tree: {} leaves, depth {}, weight {}",
            root.leaf_count(),
            root.depth(),
            root.weight()
        );

        Ok(Self { root })
    }

    /// Count the bytes of `input` and build a tree from the counts.
    pub fn from_bytes(input: &[u8]) -> Result<Self> {
        Self::build(&FrequencyTable::count(input))
    }

    /// Wrap an existing root node.
    pub fn from_root(root: Node) -> Self {
        Self { root }
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of distinct bytes (leaves).
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Height of the tree (0 when the root is a leaf).
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Derive the byte-to-code mapping.
    pub fn code_table(&self) -> Result<CodeTable> {
        CodeTable::derive(&self.root)
    }

    /// Render the tree sideways: the right subtree above a node, the left
    /// subtree below it, three spaces of indentation per level.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_node(&self.root, 0, &mut out);
        out
    }
}

fn render_node(node: &Node, level: usize, out: &mut String) {
    let indent = "   ".repeat(level);
    match node {
        Node::Leaf { byte, weight } => {
            let _ = writeln!(out, "{indent}{}: {weight}", describe_byte(*byte));
        }
        Node::Internal {
            weight,
            left,
            right,
        } => {
            render_node(right, level + 1, out);
            let _ = writeln!(out, "{indent}*: {weight}");
            render_node(left, level + 1, out);
        }
    }
}

/// Printable form of a byte: the quoted character for graphic ASCII and
/// space, a C-style escape for common whitespace, hex otherwise.
pub fn describe_byte(byte: u8) -> String {
    match byte {
        b'\n' => "\\n".to_string(),
        b'\r' => "\\r".to_string(),
        b'\t' => "\\t".to_string(),
        b' ' => "' '".to_string(),
        b if b.is_ascii_graphic() => format!("'{}'", b as char),
        b => format!("0x{b:02x}"),
    }
}
