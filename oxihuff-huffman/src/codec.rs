//! Stream encoding and decoding.
//!
//! # Stream Layout
//!
//! ```text
//! ┌──────────────────┬───────────────────────┬──────────────────┬─────────┐
//! │ symbol count     │ tree header           │ payload          │ padding │
//! │ 64 bits, MSB 1st │ 10n - 1 bits          │ one code / byte  │ 0..7    │
//! └──────────────────┴───────────────────────┴──────────────────┴─────────┘
//! ```
//!
//! All regions are bit-packed back to back, MSB-first, with no alignment
//! between them. The symbol count tells the decoder exactly how many codes
//! to read, so zero padding in the final byte is never mistaken for a
//! symbol. An empty input is stored as the count alone: eight zero bytes.

use crate::code::{CodeTable, write_code};
use crate::frequency::FrequencyTable;
use crate::header;
use crate::tree::{HuffmanTree, Node};
use oxihuff_core::bitstream::{BitReader, BitWriter};
use oxihuff_core::error::{HuffError, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Width of the symbol count field that opens every stream.
pub const SYMBOL_COUNT_BITS: u8 = 64;

/// Statistics reported by [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeStats {
    /// Input size in bytes.
    pub original_size: u64,
    /// Output size in bytes, padding included.
    pub compressed_size: u64,
    /// Size of the tree header in bits.
    pub header_bits: u64,
    /// Size of the payload in bits, padding excluded.
    pub payload_bits: u64,
}

impl EncodeStats {
    /// Compressed size divided by original size (0.0 for empty input).
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.compressed_size as f64 / self.original_size as f64
    }

    /// Space saved as a percentage of the original size. Negative when the
    /// header overhead outweighs the savings, which is normal for tiny inputs.
    pub fn space_savings(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (1.0 - self.ratio()) * 100.0
    }

    /// Tree header size rounded up to whole bytes.
    pub fn header_bytes(&self) -> u64 {
        self.header_bits.div_ceil(8)
    }
}

/// Statistics reported by [`decode_with_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeStats {
    /// Input size in bytes.
    pub compressed_size: u64,
    /// Output size in bytes.
    pub decompressed_size: u64,
    /// Size of the tree header in bits.
    pub header_bits: u64,
}

/// The symbol count and tree that open a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHeader {
    /// Number of symbols announced by the stream.
    pub symbol_count: u64,
    /// The decoded tree, absent for an empty stream. Leaf weights are not
    /// stored in the stream and read back as zero.
    pub tree: Option<HuffmanTree>,
    /// Size of the tree header in bits.
    pub header_bits: u64,
}

/// Output of [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// The compressed stream.
    pub data: Vec<u8>,
    /// Sizes of the stream and its parts.
    pub stats: EncodeStats,
}

/// Everything derived from an input before any bit is written.
#[derive(Debug, Clone)]
pub struct Model {
    /// Byte counts of the input.
    pub frequencies: FrequencyTable,
    /// Tree built from the counts.
    pub tree: HuffmanTree,
    /// Codes derived from the tree.
    pub codes: CodeTable,
}

impl Model {
    /// Count, build and derive codes for `input`.
    ///
    /// # Errors
    ///
    /// Returns [`HuffError::EmptyInput`] for an empty input.
    pub fn analyze(input: &[u8]) -> Result<Self> {
        let frequencies = FrequencyTable::count(input);
        let tree = HuffmanTree::build(&frequencies)?;
        let codes = tree.code_table()?;
        Ok(Self {
            frequencies,
            tree,
            codes,
        })
    }

    /// Payload size in bits for the analyzed input.
    pub fn payload_bits(&self) -> Result<u64> {
        self.codes.encoded_bits(&self.frequencies)
    }
}

/// Compress `input` into a self-describing stream.
///
/// # Example
///
/// ```rust
/// use oxihuff_huffman::{decode, encode};
///
/// let encoded = encode(b"aaaabbbccd").unwrap();
/// assert_eq!(encoded.stats.original_size, 10);
/// assert_eq!(decode(&encoded.data).unwrap(), b"aaaabbbccd");
/// ```
pub fn encode(input: &[u8]) -> Result<Encoded> {
    let mut data = Vec::with_capacity(input.len() / 2 + 16);
    let mut writer = BitWriter::new(&mut data);

    writer.write_bits_wide(input.len() as u128, SYMBOL_COUNT_BITS)?;

    let mut header_bits = 0;
    if !input.is_empty() {
        let model = Model::analyze(input)?;

        header::write_tree(model.tree.root(), &mut writer)?;
        header_bits = writer.bits_written() - SYMBOL_COUNT_BITS as u64;

        for &byte in input {
            let code = model.codes.get(byte).ok_or_else(|| {
                HuffError::invariant(format!("byte {byte:#04x} missing from code table"))
            })?;
            write_code(&mut writer, &code)?;
        }
    }

    let total_bits = writer.finish()?;
    let stats = EncodeStats {
        original_size: input.len() as u64,
        compressed_size: data.len() as u64,
        header_bits,
        payload_bits: total_bits - SYMBOL_COUNT_BITS as u64 - header_bits,
    };

    log::debug!(
        "encoded {} bytes into {} bytes (header {} bits, payload {} bits)",
        stats.original_size,
        stats.compressed_size,
        stats.header_bits,
        stats.payload_bits
    );

    Ok(Encoded { data, stats })
}

/// Reconstruct the original bytes from a stream produced by [`encode`].
///
/// # Errors
///
/// - [`HuffError::CorruptHeader`] if the stream ends inside the symbol count
///   or the tree header, or the header is malformed.
/// - [`HuffError::TruncatedPayload`] if the payload holds fewer symbols than
///   announced.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    decode_with_stats(data).map(|(output, _)| output)
}

/// Like [`decode`], also reporting sizes.
pub fn decode_with_stats(data: &[u8]) -> Result<(Vec<u8>, DecodeStats)> {
    let mut reader = BitReader::new(data);

    let header = read_stream_header(&mut reader)?;
    let mut stats = DecodeStats {
        compressed_size: data.len() as u64,
        header_bits: header.header_bits,
        ..DecodeStats::default()
    };
    let (count, Some(tree)) = (header.symbol_count, header.tree) else {
        return Ok((Vec::new(), stats));
    };

    // Every code is at least one bit long, so the remaining input bounds the
    // output size regardless of what the count field claims.
    let remaining_bits = (data.len() as u64 * 8).saturating_sub(reader.bits_read());
    let mut output = Vec::with_capacity(count.min(remaining_bits) as usize);

    for decoded in 0..count {
        match decode_symbol(tree.root(), &mut reader)? {
            Some(byte) => output.push(byte),
            None => return Err(HuffError::truncated_payload(decoded, count)),
        }
    }

    let unused = (data.len() as u64 * 8) - reader.bits_read();
    if unused >= 8 {
        log::debug!("ignoring {unused} trailing bits after the payload");
    }

    stats.decompressed_size = output.len() as u64;
    log::debug!(
        "decoded {} bytes from {} bytes (header {} bits)",
        stats.decompressed_size,
        stats.compressed_size,
        stats.header_bits
    );

    Ok((output, stats))
}

/// Read only the symbol count and tree of a stream, without decoding the
/// payload.
///
/// # Errors
///
/// Returns [`HuffError::CorruptHeader`] under the same conditions as
/// [`decode`].
pub fn read_header(data: &[u8]) -> Result<StreamHeader> {
    read_stream_header(&mut BitReader::new(data))
}

fn read_stream_header<R: Read>(reader: &mut BitReader<R>) -> Result<StreamHeader> {
    let symbol_count = read_symbol_count(reader)?;
    if symbol_count == 0 {
        return Ok(StreamHeader {
            symbol_count,
            tree: None,
            header_bits: 0,
        });
    }

    let root = header::read_tree(reader)?;
    Ok(StreamHeader {
        symbol_count,
        tree: Some(HuffmanTree::from_root(root)),
        header_bits: reader.bits_read() - SYMBOL_COUNT_BITS as u64,
    })
}

fn read_symbol_count<R: Read>(reader: &mut BitReader<R>) -> Result<u64> {
    let mut count = 0u64;
    for _ in 0..SYMBOL_COUNT_BITS / 32 {
        let half = reader.read_bits(32).map_err(|e| match e {
            HuffError::UnexpectedEof { position } => {
                HuffError::corrupt_header(position, "stream ended inside the symbol count")
            }
            other => other,
        })?;
        count = (count << 32) | half as u64;
    }
    Ok(count)
}

/// Walk from the root to a leaf. `None` if the input runs out first.
///
/// A root that is a leaf consumes one bit per symbol.
fn decode_symbol<R: Read>(root: &Node, reader: &mut BitReader<R>) -> Result<Option<u8>> {
    if let Node::Leaf { byte, .. } = root {
        return Ok(reader.read_bit()?.map(|_| *byte));
    }

    let mut node = root;
    loop {
        match node {
            Node::Leaf { byte, .. } => return Ok(Some(*byte)),
            Node::Internal { left, right, .. } => {
                let Some(bit) = reader.read_bit()? else {
                    return Ok(None);
                };
                node = if bit { right } else { left };
            }
        }
    }
}

/// Compress the file at `input` into `output`.
///
/// The output file only appears once compression has fully succeeded.
pub fn encode_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<EncodeStats> {
    let data = fs::read(input.as_ref())?;
    let encoded = encode(&data)?;
    write_whole(output.as_ref(), &encoded.data)?;
    Ok(encoded.stats)
}

/// Decompress the file at `input` into `output`.
///
/// The output file only appears once decompression has fully succeeded.
pub fn decode_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<DecodeStats> {
    let data = fs::read(input.as_ref())?;
    let (decoded, stats) = decode_with_stats(&data)?;
    write_whole(output.as_ref(), &decoded)?;
    Ok(stats)
}

/// Write through a sibling temporary file and rename it into place.
fn write_whole(path: &Path, bytes: &[u8]) -> Result<()> {
    let partial = partial_path(path);
    if let Err(e) = fs::write(&partial, bytes) {
        let _ = fs::remove_file(&partial);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&partial, path) {
        let _ = fs::remove_file(&partial);
        return Err(e.into());
    }
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}
