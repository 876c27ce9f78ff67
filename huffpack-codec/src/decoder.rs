//! Decompression pipeline: header parse, inverse table, bit-accumulator
//! decode.

use crate::header;
use huffpack_core::error::{HuffPackError, Result};
use huffpack_core::packed::PackedReader;
use std::io::{Cursor, Read};

/// Decompress a compressed image back into the original bytes.
///
/// Fails with `MalformedHeader` if the code table cannot be parsed and with
/// `CorruptStream` if body bits stop resolving to codes.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    decompress_from(Cursor::new(input))
}

/// Decompress from a reader positioned at the start of the header.
pub fn decompress_from<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let table = header::read_header(&mut reader)?;
    let max_len = table.max_code_len();

    let mut packed = PackedReader::new(reader);
    let mut output = Vec::new();
    let mut pending = String::new();

    while let Some(bit) = packed.next_bit()? {
        pending.push(if bit { '1' } else { '0' });
        if let Some(symbol) = table.get(&pending) {
            output.push(symbol);
            pending.clear();
        } else if pending.len() > max_len {
            return Err(HuffPackError::corrupt_stream(
                packed.byte_offset().saturating_sub(1),
                format!("{} pending bits resolve to no code", pending.len()),
            ));
        }
    }

    // Pending bits no longer than the longest code are the final byte's
    // harmless truncation artifact.
    Ok(output)
}
