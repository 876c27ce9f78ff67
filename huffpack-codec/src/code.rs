//! Prefix-code tables derived from the Huffman tree.

use crate::tree::HuffmanNode;
use huffpack_core::error::{HuffPackError, Result};
use std::collections::HashMap;

/// Symbol-to-code mapping used by the encoder.
///
/// Codes are strings of `'0'`/`'1'`; descending left in the tree appends a
/// `'0'`, descending right a `'1'`. No code is a prefix of another, which
/// the tree structure guarantees.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<String>>,
    max_len: usize,
}

impl CodeTable {
    /// Derive the code table from a tree.
    ///
    /// A root that is itself a leaf (single-symbol alphabet) gets the
    /// one-bit code `"0"`; an empty code could not be framed in the packed
    /// body.
    pub fn from_tree(root: &HuffmanNode) -> Self {
        let mut codes = vec![None; 256];

        match root {
            HuffmanNode::Leaf { symbol, .. } => {
                codes[*symbol as usize] = Some("0".to_string());
            }
            HuffmanNode::Internal { .. } => {
                assign_codes(root, String::new(), &mut codes);
            }
        }

        let max_len = codes
            .iter()
            .flatten()
            .map(|code| code.len())
            .max()
            .unwrap_or(0);

        Self { codes, max_len }
    }

    /// The code for one symbol, if it is in the alphabet.
    pub fn code(&self, symbol: u8) -> Option<&str> {
        self.codes[symbol as usize].as_deref()
    }

    /// Number of symbols in the table.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// True when the table holds no codes.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(|code| code.is_none())
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.max_len
    }

    /// Iterate `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_deref().map(|c| (symbol as u8, c)))
    }
}

fn assign_codes(node: &HuffmanNode, prefix: String, codes: &mut [Option<String>]) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            codes[*symbol as usize] = Some(prefix);
        }
        HuffmanNode::Internal { left, right, .. } => {
            assign_codes(left, format!("{prefix}0"), codes);
            assign_codes(right, format!("{prefix}1"), codes);
        }
    }
}

/// Code-to-symbol mapping used by the decoder.
///
/// Built from parsed header pairs, which are untrusted input: symbols must
/// be in 1-255, codes must be non-empty binary strings, and the set must be
/// a one-to-one prefix code.
#[derive(Debug, Clone)]
pub struct InverseCodeTable {
    map: HashMap<String, u8>,
    min_len: usize,
    max_len: usize,
}

impl InverseCodeTable {
    /// Build and validate the inverse table from `(symbol, code)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u8, String)>) -> Result<Self> {
        let mut map = HashMap::new();
        let mut seen = [false; 256];
        let mut min_len = usize::MAX;
        let mut max_len = 0usize;

        for (symbol, code) in pairs {
            if symbol == 0 {
                return Err(HuffPackError::malformed_header(
                    "symbol 0 is outside the encodable alphabet",
                ));
            }
            if code.is_empty() {
                return Err(HuffPackError::malformed_header(format!(
                    "empty code for symbol {symbol}"
                )));
            }
            if !code.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(HuffPackError::malformed_header(format!(
                    "code for symbol {symbol} contains non-binary characters"
                )));
            }
            if seen[symbol as usize] {
                return Err(HuffPackError::malformed_header(format!(
                    "duplicate entry for symbol {symbol}"
                )));
            }
            seen[symbol as usize] = true;

            min_len = min_len.min(code.len());
            max_len = max_len.max(code.len());
            if map.insert(code, symbol).is_some() {
                return Err(HuffPackError::malformed_header(format!(
                    "duplicate code for symbol {symbol}"
                )));
            }
        }

        if map.is_empty() {
            return Err(HuffPackError::malformed_header("empty code table"));
        }

        // A code that prefixes another would make decoding ambiguous.
        for code in map.keys() {
            for end in 1..code.len() {
                if map.contains_key(&code[..end]) {
                    return Err(HuffPackError::malformed_header(format!(
                        "code {} is prefixed by another code",
                        code
                    )));
                }
            }
        }

        Ok(Self {
            map,
            min_len,
            max_len,
        })
    }

    /// The symbol for an exact code match.
    pub fn get(&self, code: &str) -> Option<u8> {
        self.map.get(code).copied()
    }

    /// Number of codes in the table.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when the table holds no codes. Construction rejects this, so a
    /// built table always reports false.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Length of the shortest code.
    pub fn min_code_len(&self) -> usize {
        self.min_len
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.max_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freq::FrequencyTable;

    fn table_for(data: &[u8]) -> CodeTable {
        let freq = FrequencyTable::from_bytes(data).unwrap();
        let root = HuffmanNode::build(&freq).unwrap();
        CodeTable::from_tree(&root)
    }

    #[test]
    fn test_single_symbol_gets_zero_code() {
        let table = table_for(b"AAAA");
        assert_eq!(table.len(), 1);
        assert_eq!(table.code(b'A'), Some("0"));
        assert_eq!(table.max_code_len(), 1);
    }

    #[test]
    fn test_most_frequent_symbol_has_shortest_code() {
        let table = table_for(b"AABC");
        let a = table.code(b'A').unwrap();
        let b = table.code(b'B').unwrap();
        let c = table.code(b'C').unwrap();
        assert!(a.len() <= b.len());
        assert!(a.len() <= c.len());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_prefix_property() {
        let table = table_for(b"the quick brown fox jumps over the lazy dog");
        let codes: Vec<&str> = table.iter().map(|(_, code)| code).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a), "{a} prefixes {b}");
                }
            }
        }
    }

    #[test]
    fn test_inverse_matches_forward() {
        let table = table_for(b"mississippi");
        let pairs = table.iter().map(|(s, c)| (s, c.to_string()));
        let inverse = InverseCodeTable::from_pairs(pairs).unwrap();

        assert_eq!(inverse.len(), table.len());
        assert_eq!(inverse.max_code_len(), table.max_code_len());
        for (symbol, code) in table.iter() {
            assert_eq!(inverse.get(code), Some(symbol));
        }
        assert_eq!(inverse.get("010101010101"), None);
    }

    #[test]
    fn test_inverse_rejects_duplicate_symbol() {
        let pairs = vec![(65u8, "0".to_string()), (65, "10".to_string())];
        let err = InverseCodeTable::from_pairs(pairs).unwrap_err();
        assert!(err.to_string().contains("duplicate entry"));
    }

    #[test]
    fn test_inverse_rejects_duplicate_code() {
        let pairs = vec![(65u8, "0".to_string()), (66, "0".to_string())];
        let err = InverseCodeTable::from_pairs(pairs).unwrap_err();
        assert!(err.to_string().contains("duplicate code"));
    }

    #[test]
    fn test_inverse_rejects_prefix_violation() {
        let pairs = vec![(65u8, "0".to_string()), (66, "01".to_string())];
        let err = InverseCodeTable::from_pairs(pairs).unwrap_err();
        assert!(err.to_string().contains("prefixed"));
    }

    #[test]
    fn test_inverse_rejects_symbol_zero() {
        let pairs = vec![(0u8, "0".to_string())];
        assert!(InverseCodeTable::from_pairs(pairs).is_err());
    }

    #[test]
    fn test_inverse_rejects_non_binary_code() {
        let pairs = vec![(65u8, "02".to_string())];
        assert!(InverseCodeTable::from_pairs(pairs).is_err());
    }

    #[test]
    fn test_inverse_rejects_empty_table() {
        assert!(InverseCodeTable::from_pairs(Vec::new()).is_err());
    }
}
