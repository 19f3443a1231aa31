//! # OxiHuff Huffman
//!
//! Pure Rust byte-oriented Huffman compression.
//!
//! The compressed stream is self-describing: it carries the symbol count
//! and the Huffman tree in front of the bit-packed payload, so no side
//! channel is needed to decode it.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Deterministic trees**: Equal weights are merged in insertion order
//! - **Exact termination**: A stored symbol count keeps padding bits from
//!   ever being decoded as data
//! - **Hardened decoder**: Truncated or hostile headers are reported as
//!   errors, never as silently wrong output
//!
//! ## Pipeline
//!
//! ```text
//! encode: bytes ─► FrequencyTable ─► HuffmanTree ─► CodeTable
//!                                        │             │
//!                                   tree header     payload ─► BitWriter ─► stream
//!
//! decode: stream ─► BitReader ─► symbol count ─► tree header ─► tree walk ─► bytes
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_huffman::{decode, encode};
//!
//! let original = b"The bird is the word";
//!
//! let encoded = encode(original).unwrap();
//! assert_eq!(encoded.stats.original_size, 20);
//!
//! let decoded = decode(&encoded.data).unwrap();
//! assert_eq!(decoded, original);
//! ```
//!
//! ## Small Inputs
//!
//! The header costs `64 + 10n - 1` bits for `n` distinct bytes, so tiny
//! inputs usually grow:
//!
//! ```rust
//! use oxihuff_huffman::{decode, encode};
//!
//! let encoded = encode(b"aabbc").unwrap();
//! assert!(encoded.data.len() > 5);
//! assert_eq!(decode(&encoded.data).unwrap(), b"aabbc");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod code;
pub mod codec;
pub mod frequency;
pub mod header;
pub mod tree;

pub use code::{Code, CodeTable, write_code};
pub use codec::{
    DecodeStats, EncodeStats, Encoded, Model, StreamHeader, decode, decode_file,
    decode_with_stats, encode, encode_file, read_header,
};
pub use frequency::FrequencyTable;
pub use header::{read_tree, write_tree};
pub use oxihuff_core::error::{HuffError, Result};
pub use tree::{HuffmanTree, Node};
