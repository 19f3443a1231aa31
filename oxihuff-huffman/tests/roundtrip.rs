//! Round-trip and property tests for the Huffman codec.

use oxihuff_huffman::{
    CodeTable, FrequencyTable, HuffError, HuffmanTree, decode, decode_file, encode, encode_file,
};

/// Reproducible pseudo-random bytes.
fn random_bytes(size: usize, mut seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    for _ in 0..size {
        // Linear congruential generator
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

/// Bytes drawn from a heavily skewed distribution.
fn skewed_bytes(size: usize) -> Vec<u8> {
    random_bytes(size, 0xC0FFEE)
        .into_iter()
        .map(|b| b.leading_zeros() as u8 + b'a')
        .collect()
}

/// Temp file path unique to this test process.
fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("oxihuff_test_{}_{}", std::process::id(), name))
}

fn codes_for(data: &[u8]) -> CodeTable {
    HuffmanTree::from_bytes(data)
        .expect("tree build failed")
        .code_table()
        .expect("code derivation failed")
}

#[test]
fn test_roundtrip_various_inputs() {
    let inputs: Vec<Vec<u8>> = vec![
        b"a".to_vec(),
        b"ab".to_vec(),
        b"aabbc".to_vec(),
        b"aaaabbbccd".to_vec(),
        b"The quick brown fox jumps over the lazy dog. ".repeat(50),
        vec![0u8; 1000],
        vec![255u8; 4097],
        (0..=255).collect(),
        (0..=255).rev().cycle().take(3000).collect(),
        random_bytes(10_000, 0x123456789ABCDEF0),
        skewed_bytes(10_000),
    ];

    for input in inputs {
        let encoded = encode(&input).expect("encode failed");
        let decoded = decode(&encoded.data).expect("decode failed");
        assert_eq!(decoded, input, "round-trip failed for {} bytes", input.len());
        assert_eq!(encoded.stats.original_size, input.len() as u64);
        assert_eq!(encoded.stats.compressed_size, encoded.data.len() as u64);
    }
}

#[test]
fn test_roundtrip_every_length_up_to_64() {
    let source = skewed_bytes(64);
    for len in 0..=64 {
        let input = &source[..len];
        let encoded = encode(input).expect("encode failed");
        assert_eq!(decode(&encoded.data).expect("decode failed"), input);
    }
}

#[test]
fn test_small_input_roundtrip_without_ratio_guarantee() {
    let input = b"aabbc";
    let freq = FrequencyTable::count(input);
    assert_eq!(freq.get(b'a'), 2);
    assert_eq!(freq.get(b'b'), 2);
    assert_eq!(freq.get(b'c'), 1);

    let encoded = encode(input).expect("encode failed");
    // Header overhead makes this tiny input larger than the original.
    assert!(encoded.stats.space_savings() < 0.0);
    assert_eq!(decode(&encoded.data).expect("decode failed"), input);
}

#[test]
fn test_skewed_input_compresses() {
    let input = skewed_bytes(50_000);
    let encoded = encode(&input).expect("encode failed");
    assert!(encoded.data.len() < input.len() / 2);
    assert!(encoded.stats.ratio() < 0.5);
}

#[test]
fn test_frequency_total_equals_length() {
    for size in [0, 1, 17, 1000] {
        let data = random_bytes(size, size as u64);
        assert_eq!(FrequencyTable::count(&data).total(), size as u64);
    }
}

#[test]
fn test_codes_prefix_free() {
    for data in [skewed_bytes(5000), random_bytes(5000, 7), b"mississippi".to_vec()] {
        let table = codes_for(&data);
        let codes: Vec<_> = table.iter().collect();
        for (byte_a, a) in &codes {
            for (byte_b, b) in &codes {
                if byte_a != byte_b {
                    assert!(!a.is_prefix_of(b), "{byte_a}:{a} prefixes {byte_b}:{b}");
                }
            }
        }
    }
}

#[test]
fn test_code_length_monotone_in_frequency() {
    let data = skewed_bytes(20_000);
    let freq = FrequencyTable::count(&data);
    let table = codes_for(&data);

    for (a, count_a) in freq.iter() {
        for (b, count_b) in freq.iter() {
            if count_a > count_b {
                let len_a = table.get(a).map(|c| c.len());
                let len_b = table.get(b).map(|c| c.len());
                assert!(
                    len_a <= len_b,
                    "byte {a} ({count_a}x) longer than {b} ({count_b}x)"
                );
            }
        }
    }
}

#[test]
fn test_single_symbol_input() {
    let encoded = encode(b"AAAA").expect("encode failed");
    assert_eq!(encoded.stats.header_bits, 9);
    assert_eq!(decode(&encoded.data).expect("decode failed"), b"AAAA");
}

#[test]
fn test_header_truncation_detected() {
    let input = b"The quick brown fox jumps over the lazy dog";
    let encoded = encode(input).expect("encode failed");
    let header_end_bits = 64 + encoded.stats.header_bits;
    let header_bytes = (header_end_bits / 8) as usize;

    for len in 0..header_bytes {
        let err = decode(&encoded.data[..len]).expect_err("truncated stream decoded");
        assert!(
            matches!(err, HuffError::CorruptHeader { .. }),
            "len {len}: unexpected error {err}"
        );
    }
}

#[test]
fn test_payload_truncation_detected() {
    let input = random_bytes(2000, 99);
    let encoded = encode(&input).expect("encode failed");
    let header_end = ((64 + encoded.stats.header_bits) / 8) as usize + 1;

    for len in [header_end, header_end + 10, encoded.data.len() - 1] {
        let err = decode(&encoded.data[..len]).expect_err("truncated stream decoded");
        assert!(err.is_corruption(), "len {len}: unexpected error {err}");
    }
}

#[test]
fn test_file_roundtrip() {
    let original_path = temp_path("original.txt");
    let compressed_path = temp_path("original.txt.huff");
    let restored_path = temp_path("restored.txt");

    let contents = b"Huffman encoding is a greedy algorithm that builds optimal prefix codes. "
        .repeat(20);
    std::fs::write(&original_path, &contents).expect("Failed to write temp file");

    let encode_stats = encode_file(&original_path, &compressed_path).expect("encode_file failed");
    let decode_stats = decode_file(&compressed_path, &restored_path).expect("decode_file failed");

    assert_eq!(encode_stats.original_size, contents.len() as u64);
    assert_eq!(decode_stats.compressed_size, encode_stats.compressed_size);
    assert_eq!(decode_stats.decompressed_size, contents.len() as u64);
    assert_eq!(
        std::fs::read(&restored_path).expect("Failed to read restored file"),
        contents
    );

    for path in [&original_path, &compressed_path, &restored_path] {
        let _ = std::fs::remove_file(path);
    }
}

#[test]
fn test_failed_decode_leaves_no_output() {
    let corrupt_path = temp_path("corrupt.huff");
    let output_path = temp_path("corrupt.out");
    let _ = std::fs::remove_file(&output_path);

    std::fs::write(&corrupt_path, [0u8, 0, 0, 0, 0, 0, 0, 9]).expect("Failed to write temp file");

    let err = decode_file(&corrupt_path, &output_path).expect_err("corrupt file decoded");
    assert!(matches!(err, HuffError::CorruptHeader { .. }));
    assert!(!output_path.exists());

    let _ = std::fs::remove_file(&corrupt_path);
}
