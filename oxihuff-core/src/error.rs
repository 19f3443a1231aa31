//! Error types for OxiHuff operations.
//!
//! Every failure the codec can report is a variant of [`HuffError`]. Header
//! and payload corruption are kept apart so callers can tell a damaged tree
//! from a stream that was cut short after the tree.

use std::io;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum HuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Tree construction was attempted on an empty frequency table.
    #[error("Cannot build a Huffman tree from empty input")]
    EmptyInput,

    /// The serialized tree header is truncated or malformed.
    #[error("Corrupt header at bit position {bit_position}: {message}")]
    CorruptHeader {
        /// Bit position where the problem was detected.
        bit_position: u64,
        /// Description of the corruption.
        message: String,
    },

    /// The payload ended before every symbol was decoded.
    #[error("Truncated payload: decoded {decoded} of {expected} symbols")]
    TruncatedPayload {
        /// Number of symbols successfully decoded.
        decoded: u64,
        /// Number of symbols announced by the stream.
        expected: u64,
    },

    /// An internal invariant was broken. Indicates a bug, not bad input.
    #[error("Internal invariant violated: {message}")]
    InvariantViolation {
        /// Description of the broken invariant.
        message: String,
    },

    /// The bit reader ran out of input.
    #[error("Unexpected end of data at bit position {position}")]
    UnexpectedEof {
        /// Bit position where EOF occurred.
        position: u64,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, HuffError>;

impl HuffError {
    /// Create a corrupt header error.
    pub fn corrupt_header(bit_position: u64, message: impl Into<String>) -> Self {
        Self::CorruptHeader {
            bit_position,
            message: message.into(),
        }
    }

    /// Create a truncated payload error.
    pub fn truncated_payload(decoded: u64, expected: u64) -> Self {
        Self::TruncatedPayload { decoded, expected }
    }

    /// Create an invariant violation error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(position: u64) -> Self {
        Self::UnexpectedEof { position }
    }

    /// Returns true if this error means the compressed input is damaged.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::CorruptHeader { .. } | Self::TruncatedPayload { .. } | Self::UnexpectedEof { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HuffError::corrupt_header(17, "tree ended early");
        assert!(err.to_string().contains("Corrupt header"));
        assert!(err.to_string().contains("17"));

        let err = HuffError::truncated_payload(3, 10);
        assert!(err.to_string().contains("3 of 10"));

        let err = HuffError::EmptyInput;
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: HuffError = io_err.into();
        assert!(matches!(err, HuffError::Io(_)));
        assert!(!err.is_corruption());
    }

    #[test]
    fn test_corruption_classification() {
        assert!(HuffError::corrupt_header(0, "x").is_corruption());
        assert!(HuffError::truncated_payload(0, 1).is_corruption());
        assert!(HuffError::unexpected_eof(8).is_corruption());
        assert!(!HuffError::invariant("bug").is_corruption());
        assert!(!HuffError::EmptyInput.is_corruption());
    }
}
