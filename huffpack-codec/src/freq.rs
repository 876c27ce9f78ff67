//! Symbol frequency analysis.

use huffpack_core::error::{HuffPackError, Result};
use std::io::{self, Read};

/// Chunk size for the scan loop.
const SCAN_BUF_SIZE: usize = 1024;

/// Occurrence counts per byte value.
///
/// The zero byte is outside the countable alphabet and is never recorded;
/// see the crate-level documentation for the rationale. Entries iterate in
/// ascending symbol order, which keeps downstream tree construction
/// reproducible across runs.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Scan a byte source and count every non-zero byte value.
    ///
    /// Reading proceeds in bounded chunks. Fails with `EmptySource` if the
    /// source yields no bytes at all.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut counts = [0u64; 256];
        let mut buf = [0u8; SCAN_BUF_SIZE];
        let mut total: u64 = 0;

        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            total += n as u64;
            for &byte in &buf[..n] {
                if byte != 0 {
                    counts[byte as usize] += 1;
                }
            }
        }

        if total == 0 {
            return Err(HuffPackError::EmptySource);
        }

        Ok(Self { counts })
    }

    /// Scan an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(io::Cursor::new(data))
    }

    /// Occurrence count for one symbol.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols that occurred.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// True when no countable symbol occurred (the source held only zero
    /// bytes).
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Iterate `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}
