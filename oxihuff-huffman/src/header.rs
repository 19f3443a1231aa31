//! Tree header serialization.
//!
//! The tree is written in pre-order:
//!
//! ```text
//! leaf     := 1 b7 b6 b5 b4 b3 b2 b1 b0     (9 bits, byte value MSB first)
//! internal := 0 <left subtree> <right subtree>
//! ```
//!
//! The encoding is self-delimiting, so no length field precedes it. A tree
//! with `n` leaves has `n - 1` internal nodes and costs `10n - 1` bits.

use crate::tree::Node;
use oxihuff_core::bitstream::{BitReader, BitWriter};
use oxihuff_core::error::{HuffError, Result};
use std::io::{Read, Write};

/// Deepest tree a header may describe. 256 leaves never need more than 255
/// levels, so anything deeper is corrupt.
pub const MAX_TREE_DEPTH: usize = 255;

/// Size in bits of the header for a tree with `distinct` leaves.
pub fn tree_bits(distinct: usize) -> u64 {
    match distinct {
        0 => 0,
        n => 10 * n as u64 - 1,
    }
}

/// Write `node` and its subtrees in pre-order.
pub fn write_tree<W: Write>(node: &Node, writer: &mut BitWriter<W>) -> Result<()> {
    match node {
        Node::Leaf { byte, .. } => {
            writer.write_bit(true)?;
            writer.write_bits(*byte as u32, 8)
        }
        Node::Internal { left, right, .. } => {
            writer.write_bit(false)?;
            write_tree(left, writer)?;
            write_tree(right, writer)
        }
    }
}

/// Read a tree written by [`write_tree`], consuming exactly its bits.
///
/// # Errors
///
/// Returns [`HuffError::CorruptHeader`] if the stream ends before the tree
/// is complete, if the tree is deeper than [`MAX_TREE_DEPTH`], or if a byte
/// value appears in more than one leaf.
pub fn read_tree<R: Read>(reader: &mut BitReader<R>) -> Result<Node> {
    let mut seen = [false; 256];
    let root = read_node(reader, 0, &mut seen)?;
    log::trace!(
        "read tree header: {} leaves, {} bits consumed",
        root.leaf_count(),
        reader.bits_read()
    );
    Ok(root)
}

fn read_node<R: Read>(
    reader: &mut BitReader<R>,
    depth: usize,
    seen: &mut [bool; 256],
) -> Result<Node> {
    let position = reader.bits_read();
    let is_leaf = reader
        .read_bit()?
        .ok_or_else(|| HuffError::corrupt_header(position, "tree ended before a node flag"))?;

    if is_leaf {
        let byte = match reader.read_bits(8) {
            Ok(value) => value as u8,
            Err(HuffError::UnexpectedEof { position }) => {
                return Err(HuffError::corrupt_header(
                    position,
                    "tree ended inside a leaf value",
                ));
            }
            Err(e) => return Err(e),
        };
        if std::mem::replace(&mut seen[byte as usize], true) {
            return Err(HuffError::corrupt_header(
                position,
                format!("byte {byte:#04x} appears in two leaves"),
            ));
        }
        return Ok(Node::leaf(byte, 0));
    }

    if depth >= MAX_TREE_DEPTH {
        return Err(HuffError::corrupt_header(
            position,
            format!("tree deeper than {MAX_TREE_DEPTH} levels"),
        ));
    }

    let left = read_node(reader, depth + 1, seen)?;
    let right = read_node(reader, depth + 1, seen)?;
    Ok(Node::internal(left, right))
}
