//! Compression pipeline: frequency scan, tree build, header, packed body.

use crate::code::CodeTable;
use crate::freq::FrequencyTable;
use crate::header;
use crate::tree::HuffmanNode;
use huffpack_core::error::{HuffPackError, Result};
use huffpack_core::packed::PackedWriter;
use std::io::{Cursor, Write};

/// Compress a byte sequence into a self-describing compressed image.
///
/// Fails with `EmptySource` on empty input and with `UnknownSymbol` at the
/// first zero byte, which is outside the encodable alphabet.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    compress_into(input, &mut output)?;
    Ok(output)
}

/// Compress a byte sequence, appending the result to a writer.
pub fn compress_into<W: Write>(input: &[u8], mut writer: W) -> Result<()> {
    let freq = FrequencyTable::from_reader(Cursor::new(input))?;
    let Some(root) = HuffmanNode::build(&freq) else {
        // Non-empty input whose every byte is zero: nothing is encodable.
        return Err(HuffPackError::unknown_symbol(0, 0));
    };
    let table = CodeTable::from_tree(&root);

    header::write_header(&mut writer, &table)?;

    let mut packed = PackedWriter::new(writer);
    for (offset, &byte) in input.iter().enumerate() {
        match table.code(byte) {
            Some(code) => packed.write_code(code)?,
            None => return Err(HuffPackError::unknown_symbol(byte, offset as u64)),
        }
    }
    packed.finish()
}
