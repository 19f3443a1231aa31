//! Byte frequency counting.

use oxihuff_core::error::{HuffError, Result};

/// Occurrence count for every byte value in an input.
///
/// Backed by a fixed 256-entry array; a count of zero means the byte does
/// not occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count every byte of `input` in a single pass.
    pub fn count(input: &[u8]) -> Self {
        let mut table = Self::new();
        table.update(input);
        table
    }

    /// Build a table from explicit `(byte, count)` pairs.
    ///
    /// Later pairs for the same byte are added to earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`HuffError::InvariantViolation`] if a byte's count exceeds
    /// `u64::MAX`.
    pub fn from_counts(pairs: impl IntoIterator<Item = (u8, u64)>) -> Result<Self> {
        let mut table = Self::new();
        for (byte, count) in pairs {
            let slot = &mut table.counts[byte as usize];
            *slot = slot.checked_add(count).ok_or_else(|| {
                HuffError::invariant(format!("count of byte {byte:#04x} exceeds u64::MAX"))
            })?;
        }
        Ok(table)
    }

    /// Add the bytes of `input` to the existing counts.
    pub fn update(&mut self, input: &[u8]) {
        for &byte in input {
            self.counts[byte as usize] += 1;
        }
    }

    /// Occurrence count of `byte`.
    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Number of distinct byte values present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Sum of all counts, i.e. the length of the counted input. Saturates
    /// at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |sum, &c| sum.saturating_add(c))
    }

    /// Returns true if no byte is present.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Iterate present bytes in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
