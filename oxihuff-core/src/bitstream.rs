//! Bit-level I/O operations for the Huffman codec.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! data at the bit level.
//!
//! # Bit Ordering
//!
//! OxiHuff packs bits MSB-first (Most Significant Bit first): the first bit
//! written lands in bit 7 of the first byte. Multi-bit values are written with
//! their most significant bit first, so a code read back one bit at a time
//! comes out in the order it was assigned.
//!
//! # Padding
//!
//! The final partial byte is padded with zero bits when the writer is
//! flushed. A reader cannot tell padding from data by length alone, so the
//! stream format must carry enough information to stop before the padding.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! // Writing bits
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write_bits(0b101, 3).unwrap();  // Write 3 bits
//!     writer.write_bits(0b1100, 4).unwrap(); // Write 4 bits
//!     writer.finish().unwrap();
//! }
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! // Reading bits
//! let mut reader = BitReader::new(Cursor::new(&output));
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{HuffError, Result};
use std::io::{ErrorKind, Read, Write};

/// A bit-level reader that wraps any `Read` implementation.
///
/// `BitReader` keeps up to 64 bits buffered so that reads across byte
/// boundaries do not touch the underlying reader for every bit.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Bit buffer (MSB-first, valid bits in the low `bits_in_buffer` bits).
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Try to buffer at least `count` bits.
    ///
    /// Returns `Ok(false)` when the underlying reader is exhausted first.
    fn fill_buffer(&mut self, count: u8) -> Result<bool> {
        debug_assert!(count <= 32, "Cannot fill more than 32 bits at once");

        while self.bits_in_buffer < count {
            let bits_needed = count - self.bits_in_buffer;
            let room = (64 - self.bits_in_buffer) / 8;
            let bytes_needed = bits_needed.div_ceil(8).min(room) as usize;

            let mut temp_buf = [0u8; 8];
            match self.reader.read(&mut temp_buf[..bytes_needed]) {
                Ok(0) => return Ok(false),
                Ok(n) => {
                    for &byte in &temp_buf[..n] {
                        self.buffer = (self.buffer << 8) | byte as u64;
                        self.bits_in_buffer += 8;
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(true)
    }

    /// Take `count` already-buffered bits from the front of the buffer.
    #[inline]
    fn take_bits(&mut self, count: u8) -> u32 {
        let shift = self.bits_in_buffer - count;
        let mask = (1u64 << count).wrapping_sub(1);
        let value = (self.buffer >> shift) & mask;

        self.bits_in_buffer -= count;
        self.total_bits_read += count as u64;

        value as u32
    }

    /// Read up to 32 bits from the stream.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of bits to read (0-32)
    ///
    /// # Returns
    ///
    /// The bits read as a u32, with the first bit read in the most
    /// significant position of the result.
    ///
    /// # Errors
    ///
    /// Returns [`HuffError::UnexpectedEof`] if the stream ends first.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        if count == 0 {
            return Ok(0);
        }

        if !self.fill_buffer(count)? {
            return Err(HuffError::unexpected_eof(self.total_bits_read));
        }

        Ok(self.take_bits(count))
    }

    /// Read a single bit, or `None` once every input byte has been consumed.
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        if !self.fill_buffer(1)? {
            return Ok(None);
        }
        Ok(Some(self.take_bits(1) != 0))
    }

    /// Check if the reader is at end of stream.
    ///
    /// This may pull one more chunk from the underlying reader.
    pub fn is_eof(&mut self) -> Result<bool> {
        Ok(!self.fill_buffer(1)?)
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` emits each byte as soon as eight bits have accumulated. Call
/// [`finish`](Self::finish) (or [`flush`](Self::flush)) exactly once when
/// done; it zero-pads the final partial byte. A writer dropped without being
/// flushed flushes itself on a best-effort basis.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit buffer (MSB-first, pending bits in the low `bits_in_buffer` bits).
    buffer: u64,
    /// Number of bits in buffer. Always below 8 between calls.
    bits_in_buffer: u8,
    /// Total bits written, excluding padding.
    total_bits_written: u64,
    /// Whether the session has been flushed.
    finished: bool,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
            finished: false,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get the total number of bits written so far (padding excluded).
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Check whether this writer has already been flushed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn ensure_open(&self) -> Result<()> {
        if self.finished {
            return Err(HuffError::invariant("write to a flushed BitWriter"));
        }
        Ok(())
    }

    /// Emit every complete byte held in the buffer.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        let mut bytes = [0u8; 8];
        let mut n = 0;
        while self.bits_in_buffer >= 8 {
            bytes[n] = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.bits_in_buffer -= 8;
            n += 1;
        }
        if n > 0 {
            self.writer.write_all(&bytes[..n])?;
        }
        Ok(())
    }

    /// Write up to 32 bits to the stream.
    ///
    /// # Arguments
    ///
    /// * `value` - The bits to write, right-aligned; the most significant of
    ///   the `count` low bits is written first
    /// * `count` - Number of bits to write (0-32)
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");
        self.ensure_open()?;

        if count == 0 {
            return Ok(());
        }

        let mask = (1u64 << count).wrapping_sub(1);
        self.buffer = (self.buffer << count) | (value as u64 & mask);
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        self.flush_bytes()
    }

    /// Write up to 128 bits, most significant first.
    ///
    /// Used for long Huffman codes and 64-bit length fields.
    pub fn write_bits_wide(&mut self, value: u128, count: u8) -> Result<()> {
        debug_assert!(count <= 128, "Cannot write more than 128 bits at once");

        let mut remaining = count;
        while remaining > 0 {
            let chunk = remaining.min(32);
            remaining -= chunk;
            let bits = (value >> remaining) as u32;
            self.write_bits(bits, chunk)?;
        }
        Ok(())
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.ensure_open()?;

        self.buffer = (self.buffer << 1) | bit as u64;
        self.bits_in_buffer += 1;
        self.total_bits_written += 1;

        if self.bits_in_buffer >= 8 {
            self.flush_bytes()?;
        }

        Ok(())
    }

    /// Pad the final partial byte with zeros and flush the underlying writer.
    ///
    /// Only the first call has any effect.
    pub fn flush(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        if self.bits_in_buffer > 0 {
            let padding = 8 - self.bits_in_buffer;
            self.buffer <<= padding;
            self.bits_in_buffer += padding;
            self.flush_bytes()?;
        }

        self.writer.flush()?;
        Ok(())
    }

    /// Flush the session and return the number of bits written, padding
    /// excluded.
    pub fn finish(mut self) -> Result<u64> {
        self.flush()?;
        Ok(self.total_bits_written)
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        // Best-effort flush on drop
        let _ = self.flush();
    }
}
