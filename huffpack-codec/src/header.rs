//! The length-prefixed textual header carrying the code table.
//!
//! Layout:
//!
//! ```text
//! <decimal block length>\n
//! <symbol>:<code>\n        (one line per symbol, block-length bytes total)
//! ```
//!
//! Symbols are decimal byte values and codes are `'0'`/`'1'` strings, so the
//! block needs no escaping. The length prefix lets the reader consume the
//! block exactly without scanning for an end marker.

use crate::code::{CodeTable, InverseCodeTable};
use huffpack_core::error::{HuffPackError, Result};
use std::io::{self, Read, Write};

/// Upper bound on a declared header length. A valid table has at most 255
/// lines of at most 260 bytes ("255:" + 255 code characters + newline);
/// anything above this bound is hostile or corrupt and is rejected before
/// allocation.
pub const MAX_HEADER_LEN: usize = 128 * 1024;

/// Longest accepted decimal length line, terminator excluded.
const MAX_LEN_DIGITS: usize = 8;

/// Serialize the code table, length prefix included.
///
/// Lines are written in ascending symbol order; readers accept any order.
pub fn write_header<W: Write>(writer: &mut W, table: &CodeTable) -> Result<()> {
    let mut block = String::new();
    for (symbol, code) in table.iter() {
        block.push_str(&format!("{symbol}:{code}\n"));
    }

    writer.write_all(format!("{}\n", block.len()).as_bytes())?;
    writer.write_all(block.as_bytes())?;
    Ok(())
}

/// Parse a header into a validated inverse code table.
pub fn read_header<R: Read>(reader: &mut R) -> Result<InverseCodeTable> {
    let len = read_length_line(reader)?;
    if len > MAX_HEADER_LEN {
        return Err(HuffPackError::malformed_header(format!(
            "declared header length {len} exceeds limit {MAX_HEADER_LEN}"
        )));
    }

    let mut block = vec![0u8; len];
    reader.read_exact(&mut block).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            HuffPackError::malformed_header("header block truncated")
        } else {
            e.into()
        }
    })?;

    let text = std::str::from_utf8(&block)
        .map_err(|_| HuffPackError::malformed_header("header block is not valid ASCII"))?;
    if !text.is_empty() && !text.ends_with('\n') {
        return Err(HuffPackError::malformed_header(
            "header line missing terminator",
        ));
    }

    let mut pairs = Vec::new();
    for line in text.split_terminator('\n') {
        let (symbol, code) = line.split_once(':').ok_or_else(|| {
            HuffPackError::malformed_header(format!("header line {line:?} has no separator"))
        })?;
        let symbol: u8 = symbol.parse().map_err(|_| {
            HuffPackError::malformed_header(format!("invalid symbol value {symbol:?}"))
        })?;
        pairs.push((symbol, code.to_string()));
    }

    InverseCodeTable::from_pairs(pairs)
}

/// Read the decimal length line byte-by-byte up to its newline terminator.
fn read_length_line<R: Read>(reader: &mut R) -> Result<usize> {
    let mut digits = String::new();

    loop {
        let mut buf = [0u8; 1];
        match reader.read(&mut buf) {
            Ok(0) => {
                return Err(HuffPackError::malformed_header(
                    "end of input before header length terminator",
                ));
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }

        match buf[0] {
            b'\n' => break,
            byte if byte.is_ascii_digit() => {
                if digits.len() == MAX_LEN_DIGITS {
                    return Err(HuffPackError::malformed_header(
                        "header length line too long",
                    ));
                }
                digits.push(byte as char);
            }
            byte => {
                return Err(HuffPackError::malformed_header(format!(
                    "non-numeric byte {byte:#04x} in header length"
                )));
            }
        }
    }

    digits
        .parse()
        .map_err(|_| HuffPackError::malformed_header("empty header length"))
}
