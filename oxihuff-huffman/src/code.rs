//! Huffman codes and the byte-to-code table.

use crate::frequency::FrequencyTable;
use crate::tree::Node;
use oxihuff_core::bitstream::BitWriter;
use oxihuff_core::error::{HuffError, Result};
use std::fmt;
use std::io::Write;

/// Maximum code length in bits.
///
/// A tree built from `u64` counts is at most 92 levels deep, since a depth
/// of `d` needs a total weight of at least the `(d + 2)`-th Fibonacci number.
pub const MAX_CODE_BITS: u8 = 128;

/// A Huffman code: `len` bits stored right-aligned in `bits`, first bit most
/// significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u128,
    len: u8,
}

impl Code {
    /// The empty code at the root of a tree.
    pub const ROOT: Code = Code { bits: 0, len: 0 };

    /// Create a code from its right-aligned bits and length.
    pub fn new(bits: u128, len: u8) -> Self {
        debug_assert!(len <= MAX_CODE_BITS);
        let mask = if len >= 128 {
            u128::MAX
        } else {
            (1u128 << len) - 1
        };
        Self {
            bits: bits & mask,
            len,
        }
    }

    /// Number of bits in the code.
    pub fn len(&self) -> u8 {
        self.len
    }

    /// Returns true for the zero-length code.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The code bits, right-aligned.
    pub fn bits(&self) -> u128 {
        self.bits
    }

    /// The code extended by one bit.
    pub fn child(&self, bit: bool) -> Result<Code> {
        if self.len >= MAX_CODE_BITS {
            return Err(HuffError::invariant(format!(
                "code longer than {MAX_CODE_BITS} bits"
            )));
        }
        Ok(Code {
            bits: (self.bits << 1) | bit as u128,
            len: self.len + 1,
        })
    }

    /// The `index`-th bit, counting from the first bit written.
    pub fn bit(&self, index: u8) -> bool {
        debug_assert!(index < self.len);
        (self.bits >> (self.len - 1 - index)) & 1 == 1
    }

    /// Iterate the bits in transmission order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bit(i))
    }

    /// Returns true if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        let shift = (other.len - self.len) as u32;
        other.bits.checked_shr(shift).unwrap_or(0) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Append `code` to `writer`, first bit first.
pub fn write_code<W: Write>(writer: &mut BitWriter<W>, code: &Code) -> Result<()> {
    writer.write_bits_wide(code.bits(), code.len())
}

/// Mapping from byte value to its Huffman code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
}

impl CodeTable {
    /// Derive the codes of every leaf under `root` by a pre-order walk:
    /// descending left appends `0`, descending right appends `1`.
    ///
    /// A root that is itself a leaf gets the one-bit code `0`, so every
    /// symbol still costs one payload bit.
    pub fn derive(root: &Node) -> Result<Self> {
        let mut table = Self {
            codes: [None; 256],
        };

        match root {
            Node::Leaf { byte, .. } => table.codes[*byte as usize] = Some(Code::new(0, 1)),
            Node::Internal { .. } => table.assign(root, Code::ROOT)?,
        }

        log::trace!(
            "derived {} codes, longest {} bits",
            table.len(),
            table.max_len()
        );
        Ok(table)
    }

    fn assign(&mut self, node: &Node, code: Code) -> Result<()> {
        match node {
            Node::Leaf { byte, .. } => {
                let slot = &mut self.codes[*byte as usize];
                if slot.is_some() {
                    return Err(HuffError::invariant(format!(
                        "byte {byte:#04x} appears in two leaves"
                    )));
                }
                *slot = Some(code);
            }
            Node::Internal { left, right, .. } => {
                self.assign(left, code.child(false)?)?;
                self.assign(right, code.child(true)?)?;
            }
        }
        Ok(())
    }

    /// Code of `byte`, if the byte occurs in the tree.
    pub fn get(&self, byte: u8) -> Option<Code> {
        self.codes[byte as usize]
    }

    /// Number of bytes with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// Returns true if no byte has a code.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    /// Length of the longest code.
    pub fn max_len(&self) -> u8 {
        self.codes.iter().flatten().map(Code::len).max().unwrap_or(0)
    }

    /// Iterate `(byte, code)` pairs in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(byte, code)| code.map(|c| (byte as u8, c)))
    }

    /// Total payload bits needed to encode an input with these frequencies.
    ///
    /// # Errors
    ///
    /// Returns [`HuffError::InvariantViolation`] if a counted byte has no code
    /// or the total does not fit in a `u64`.
    pub fn encoded_bits(&self, freq: &FrequencyTable) -> Result<u64> {
        freq.iter().try_fold(0u64, |total, (byte, count)| {
            let code = self.get(byte).ok_or_else(|| {
                HuffError::invariant(format!("byte {byte:#04x} missing from code table"))
            })?;
            count
                .checked_mul(code.len() as u64)
                .and_then(|bits| total.checked_add(bits))
                .ok_or_else(|| HuffError::invariant("payload size exceeds u64::MAX bits"))
        })
    }
}
