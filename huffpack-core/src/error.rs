//! Error types for HuffPack operations.
//!
//! A single error enum covers every failure mode of the codec: I/O failures,
//! empty input, header parse failures, symbols outside the encodable
//! alphabet, and corrupted packed streams.

use std::io;
use thiserror::Error;

/// The main error type for HuffPack operations.
#[derive(Debug, Error)]
pub enum HuffPackError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source has zero bytes, so no frequency table can be built.
    #[error("Empty source: nothing to compress")]
    EmptySource,

    /// The compressed header could not be parsed.
    #[error("Malformed header: {message}")]
    MalformedHeader {
        /// Description of the header error.
        message: String,
    },

    /// A source byte has no entry in the code table.
    #[error("Unknown symbol {symbol} at byte offset {offset}")]
    UnknownSymbol {
        /// The byte value that has no code.
        symbol: u8,
        /// Byte offset in the source where it was encountered.
        offset: u64,
    },

    /// The packed body contains bits that resolve to no valid code.
    #[error("Corrupt stream at byte offset {offset}: {message}")]
    CorruptStream {
        /// Byte offset into the packed body where corruption was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },
}

/// Result type alias for HuffPack operations.
pub type Result<T> = std::result::Result<T, HuffPackError>;

impl HuffPackError {
    /// Create a malformed header error.
    pub fn malformed_header(message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            message: message.into(),
        }
    }

    /// Create an unknown symbol error.
    pub fn unknown_symbol(symbol: u8, offset: u64) -> Self {
        Self::UnknownSymbol { symbol, offset }
    }

    /// Create a corrupt stream error.
    pub fn corrupt_stream(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptStream {
            offset,
            message: message.into(),
        }
    }
}
