//! # HuffPack Codec
//!
//! Pure Rust Huffman compression and decompression over byte values.
//!
//! Compression scans the source once to count symbol frequencies, builds an
//! optimal prefix-code tree through a binary min-heap, writes the code table
//! as a length-prefixed textual header, and packs the per-symbol codes into
//! self-framing bytes (five data bits plus a 3-bit valid-count per byte).
//! Decompression parses the header, inverts the table, and walks the packed
//! bits back to the original symbols.
//!
//! ## Compressed layout
//!
//! ```text
//! <decimal header length>\n
//! <symbol>:<code>\n          (header block, one line per symbol)
//! <packed body bytes>        (each byte = (data << 3) | valid-bit count)
//! ```
//!
//! ## Alphabet restriction
//!
//! The zero byte is outside the encodable alphabet: it is never counted
//! during frequency analysis, and compressing a source that contains it
//! fails with [`HuffPackError::UnknownSymbol`] at the first occurrence
//! rather than silently dropping data.
//!
//! ## Example
//!
//! ```rust
//! use huffpack_codec::{compress, decompress};
//!
//! let original = b"abracadabra";
//! let compressed = compress(original).unwrap();
//! let restored = decompress(&compressed).unwrap();
//! assert_eq!(restored, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod code;
pub mod decoder;
pub mod encoder;
pub mod freq;
pub mod header;
pub mod heap;
pub mod tree;

// Re-exports
pub use code::{CodeTable, InverseCodeTable};
pub use decoder::{decompress, decompress_from};
pub use encoder::{compress, compress_into};
pub use freq::FrequencyTable;
pub use heap::MinHeap;
pub use huffpack_core::error::{HuffPackError, Result};
pub use tree::HuffmanNode;
