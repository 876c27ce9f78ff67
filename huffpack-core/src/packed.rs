//! Bit-level I/O for the self-framing packed-byte format.
//!
//! Every byte of a compressed body carries five data-bit slots in its high
//! bits and a 3-bit count of valid data bits in its low bits:
//!
//! ```text
//! +---+---+---+---+---+---+---+---+
//! | d4| d3| d2| d1| d0| c2| c1| c0|   byte = (data << 3) | count
//! +---+---+---+---+---+---+---+---+
//! ```
//!
//! Data bits are consumed least-significant-first, so `d0` is the first bit
//! emitted into the byte. Each byte is independently decodable: the count
//! field says how many of its data slots hold real bits, which makes the
//! final partial byte self-describing without a global stream length.
//!
//! # Example
//!
//! ```
//! use huffpack_core::packed::{PackedReader, PackedWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! let mut writer = PackedWriter::new(&mut output);
//! writer.write_code("10").unwrap();
//! writer.write_code("0").unwrap();
//! writer.finish().unwrap();
//!
//! let mut reader = PackedReader::new(Cursor::new(&output));
//! assert_eq!(reader.next_bit().unwrap(), Some(true));
//! assert_eq!(reader.next_bit().unwrap(), Some(false));
//! assert_eq!(reader.next_bit().unwrap(), Some(false));
//! assert_eq!(reader.next_bit().unwrap(), None);
//! ```

use crate::error::{HuffPackError, Result};
use std::io::{self, Read, Write};

/// Number of data-bit slots per packed byte.
pub const DATA_BITS: u8 = 5;

/// Mask extracting the valid-bit count from a packed byte.
const COUNT_MASK: u8 = 0b0000_0111;

/// Writes variable-length bit-string codes as packed bytes.
///
/// A code of five bits or fewer is never split across byte boundaries: if it
/// does not fit in the remaining free slots, the current accumulator is
/// flushed as a partial byte first. Longer codes fill and flush full bytes
/// mid-code and continue in the next byte.
#[derive(Debug)]
pub struct PackedWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Accumulated data bits, first-emitted bit in bit 0.
    acc: u8,
    /// Number of occupied data slots in `acc`.
    used: u8,
    /// Total packed bytes emitted.
    bytes_written: u64,
}

impl<W: Write> PackedWriter<W> {
    /// Create a new `PackedWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            acc: 0,
            used: 0,
            bytes_written: 0,
        }
    }

    /// Get the total number of packed bytes emitted so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Append one prefix code to the stream.
    ///
    /// `code` is a string of `'0'`/`'1'` characters. Any character other
    /// than `'1'` is written as a zero bit.
    pub fn write_code(&mut self, code: &str) -> Result<()> {
        if code.len() > (DATA_BITS - self.used) as usize {
            self.flush_partial()?;
        }

        for ch in code.bytes() {
            if self.used == DATA_BITS {
                self.flush_partial()?;
            }
            if ch == b'1' {
                self.acc |= 1 << self.used;
            }
            self.used += 1;
        }

        Ok(())
    }

    /// Emit the accumulator as one packed byte and reset it.
    ///
    /// A flush with no occupied slots is skipped, so the stream never gains
    /// an empty trailing byte.
    fn flush_partial(&mut self) -> Result<()> {
        if self.used == 0 {
            return Ok(());
        }

        let byte = (self.acc << 3) | self.used;
        self.writer.write_all(&[byte])?;
        self.bytes_written += 1;
        self.acc = 0;
        self.used = 0;

        Ok(())
    }

    /// Flush any pending partial byte and the underlying writer.
    pub fn finish(&mut self) -> Result<()> {
        self.flush_partial()?;
        self.writer.flush()?;
        Ok(())
    }

    /// Consume this `PackedWriter` and return the underlying writer.
    ///
    /// Pending bits are flushed before the writer is returned.
    pub fn into_inner(mut self) -> Result<W> {
        self.finish()?;
        Ok(self.writer)
    }
}

/// Reads packed bytes back as a stream of individual bits.
///
/// Each byte yields exactly as many bits as its count field declares,
/// least-significant data bit first. End of input is reported as `None`
/// rather than an error so the caller can distinguish truncation from
/// normal termination.
#[derive(Debug)]
pub struct PackedReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Remaining data bits of the current byte, next bit in bit 0.
    data: u8,
    /// Number of bits left in `data`.
    remaining: u8,
    /// Total packed bytes consumed.
    bytes_read: u64,
}

impl<R: Read> PackedReader<R> {
    /// Create a new `PackedReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            data: 0,
            remaining: 0,
            bytes_read: 0,
        }
    }

    /// Get the number of packed bytes consumed so far.
    pub fn byte_offset(&self) -> u64 {
        self.bytes_read
    }

    /// Read the next data bit, or `None` at end of input.
    ///
    /// A byte whose count field exceeds the slot capacity fails with
    /// `CorruptStream`. A count of zero is tolerated and skipped; the
    /// writer never emits one.
    pub fn next_bit(&mut self) -> Result<Option<bool>> {
        while self.remaining == 0 {
            let mut buf = [0u8; 1];
            loop {
                match self.reader.read(&mut buf) {
                    Ok(0) => return Ok(None),
                    Ok(_) => break,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            }
            self.bytes_read += 1;

            let count = buf[0] & COUNT_MASK;
            if count > DATA_BITS {
                return Err(HuffPackError::corrupt_stream(
                    self.bytes_read - 1,
                    format!("invalid valid-bit count {count} in packed byte"),
                ));
            }
            self.data = buf[0] >> 3;
            self.remaining = count;
        }

        let bit = self.data & 1 == 1;
        self.data >>= 1;
        self.remaining -= 1;
        Ok(Some(bit))
    }
}
