//! End-to-end codec integration tests.

use huffpack_codec::{
    CodeTable, FrequencyTable, HuffPackError, HuffmanNode, compress, decompress, header,
};
use std::io::Cursor;

/// Deterministic pseudo-random bytes avoiding the excluded zero value.
fn random_nonzero(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x123456789ABCDEF0;
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let byte = (seed >> 32) as u8;
        data.push(if byte == 0 { 0xFF } else { byte });
    }
    data
}

fn code_table_for(data: &[u8]) -> CodeTable {
    let freq = FrequencyTable::from_bytes(data).unwrap();
    let root = HuffmanNode::build(&freq).unwrap();
    CodeTable::from_tree(&root)
}

#[test]
fn test_roundtrip_simple() {
    let original = b"the quick brown fox jumps over the lazy dog";
    let compressed = compress(original).expect("compression failed");
    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_roundtrip_single_byte() {
    let original = b"A";
    let compressed = compress(original).expect("compression failed");
    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_roundtrip_all_byte_values() {
    let original: Vec<u8> = (1..=255).collect();
    let compressed = compress(&original).expect("compression failed");
    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_roundtrip_random_data() {
    let original = random_nonzero(4096);
    let compressed = compress(&original).expect("compression failed");
    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_roundtrip_multiple_sizes() {
    for size in [1, 2, 5, 6, 7, 31, 32, 33, 255, 256, 1000, 4095, 4096, 4097] {
        let original = random_nonzero(size);
        let compressed = compress(&original).expect("compression failed");
        let decompressed = decompress(&compressed).expect("decompression failed");
        assert_eq!(decompressed, original, "mismatch for input size {size}");
    }
}

#[test]
fn test_degenerate_alphabet() {
    let original = vec![b'X'; 1000];
    let compressed = compress(&original).expect("compression failed");

    let table = header::read_header(&mut Cursor::new(&compressed)).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("0"), Some(b'X'));

    // One bit per symbol, five per body byte.
    assert!(compressed.len() < original.len() / 2);

    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_repeated_phrase_compresses() {
    let original = b"This phrase repeats itself. ".repeat(50);
    let compressed = compress(&original).expect("compression failed");
    assert!(compressed.len() < original.len());
    assert_eq!(decompress(&compressed).unwrap(), original);
}

#[test]
fn test_empty_input_rejected() {
    let err = compress(b"").unwrap_err();
    assert!(matches!(err, HuffPackError::EmptySource));
}

#[test]
fn test_zero_byte_rejected_with_offset() {
    let err = compress(b"ab\0cd").unwrap_err();
    assert!(matches!(
        err,
        HuffPackError::UnknownSymbol {
            symbol: 0,
            offset: 2
        }
    ));
}

#[test]
fn test_header_framing() {
    for original in [
        b"AABC".to_vec(),
        b"mississippi".to_vec(),
        random_nonzero(512),
        vec![b'q'; 3],
    ] {
        let compressed = compress(&original).expect("compression failed");
        let newline = compressed.iter().position(|&b| b == b'\n').unwrap();
        let declared: usize = std::str::from_utf8(&compressed[..newline])
            .unwrap()
            .parse()
            .unwrap();
        let block = &compressed[newline + 1..newline + 1 + declared];
        assert_eq!(block.last(), Some(&b'\n'));
        assert!(
            block
                .split(|&b| b == b'\n')
                .filter(|line| !line.is_empty())
                .all(|line| line.contains(&b':'))
        );
    }
}

#[test]
fn test_prefix_code_validity() {
    for original in [b"AABC".to_vec(), random_nonzero(2000), (1..=255).collect()] {
        let table = code_table_for(&original);
        let codes: Vec<&str> = table.iter().map(|(_, code)| code).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a), "code {a} prefixes {b}");
                }
            }
        }
    }
}

#[test]
fn test_short_codes_never_span_packed_bytes() {
    let original = random_nonzero(1500);
    let compressed = compress(&original).expect("compression failed");
    let table = code_table_for(&original);

    // Skip the header, then expand the body into (byte index, bit) pairs
    // using each byte's count field.
    let newline = compressed.iter().position(|&b| b == b'\n').unwrap();
    let declared: usize = std::str::from_utf8(&compressed[..newline])
        .unwrap()
        .parse()
        .unwrap();
    let body = &compressed[newline + 1 + declared..];

    let mut bits = Vec::new();
    for (index, &byte) in body.iter().enumerate() {
        let count = byte & 0b111;
        assert!(count <= 5, "invalid count field in byte {index}");
        for i in 0..count {
            bits.push((index, (byte >> 3) >> i & 1 == 1));
        }
    }

    // Walk the expected code sequence through the bit stream: every code of
    // five bits or fewer must come from a single packed byte.
    let mut pos = 0;
    for &symbol in &original {
        let code = table.code(symbol).unwrap();
        let span = &bits[pos..pos + code.len()];
        for (bit, expected) in span.iter().zip(code.bytes()) {
            assert_eq!(bit.1, expected == b'1');
        }
        if code.len() <= 5 {
            assert_eq!(
                span.first().unwrap().0,
                span.last().unwrap().0,
                "code for symbol {symbol} split across packed bytes"
            );
        }
        pos += code.len();
    }
    assert_eq!(pos, bits.len(), "body carries bits beyond the code sequence");
}

#[test]
fn test_concrete_scenario_aabc() {
    let original = [65u8, 65, 66, 67];

    let freq = FrequencyTable::from_bytes(&original).unwrap();
    assert_eq!(freq.count(65), 2);
    assert_eq!(freq.count(66), 1);
    assert_eq!(freq.count(67), 1);
    assert_eq!(freq.distinct(), 3);

    let table = code_table_for(&original);
    let a = table.code(65).unwrap();
    assert!(a.len() <= table.code(66).unwrap().len());
    assert!(a.len() <= table.code(67).unwrap().len());

    let compressed = compress(&original).expect("compression failed");
    let newline = compressed.iter().position(|&b| b == b'\n').unwrap();
    let declared: usize = std::str::from_utf8(&compressed[..newline])
        .unwrap()
        .parse()
        .unwrap();
    let block = &compressed[newline + 1..newline + 1 + declared];
    assert_eq!(block.iter().filter(|&&b| b == b'\n').count(), 3);

    assert_eq!(decompress(&compressed).unwrap(), original);
}

#[test]
fn test_reproducible_output() {
    let original = random_nonzero(777);
    assert_eq!(compress(&original).unwrap(), compress(&original).unwrap());
}

#[test]
fn test_garbage_input_errors_cleanly() {
    for garbage in [
        b"zz".to_vec(),
        b"12".to_vec(),
        vec![0xFFu8; 16],
        b"10\n65:0\n".to_vec(),
    ] {
        assert!(decompress(&garbage).is_err());
    }
}

#[test]
fn test_truncated_body_yields_prefix() {
    // Cutting packed bytes off the body loses symbols but stays decodable:
    // what remains is a prefix of the original.
    let original = random_nonzero(400);
    let compressed = compress(&original).expect("compression failed");
    let truncated = &compressed[..compressed.len() - 2];

    let decompressed = decompress(truncated).expect("truncated body should still decode");
    assert!(original.starts_with(&decompressed));
    assert!(decompressed.len() < original.len());
}
