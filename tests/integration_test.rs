//! Integration tests for table-huffman

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use table_huffman::*;

fn roundtrip(data: &[u8]) -> EncodedOutput {
    let codec = Codec::default();
    let encoded = codec.encode(data).unwrap();
    let decoded = codec.decode(&encoded.table, &encoded.data).unwrap();
    assert_eq!(decoded, data);
    encoded
}

#[test]
fn test_full_lifecycle() {
    let data = b"the quick brown fox jumps over the lazy dog".repeat(50);
    let encoded = roundtrip(&data);
    assert!(encoded.stats.compressed_size < data.len() as u64);
}

#[test]
fn test_edge_inputs_roundtrip() {
    let all: Vec<u8> = (0..=255).collect();
    for data in [&b""[..], &b"x"[..], &b"aaab"[..], &all[..]] {
        roundtrip(data);
    }
}

#[test]
fn test_random_inputs_roundtrip() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..50 {
        let len = rng.gen_range(0..2000);
        let alphabet = rng.gen_range(1..=256u16);
        let data: Vec<u8> = (0..len)
            .map(|_| rng.gen_range(0..alphabet) as u8)
            .collect();
        roundtrip(&data);
    }
}

#[test]
fn test_skewed_distribution_roundtrip() {
    let mut rng = StdRng::seed_from_u64(7);
    // geometric-ish weights give long codes for rare bytes
    let data: Vec<u8> = (0..20_000)
        .map(|_| {
            let mut b = 0u8;
            while b < 30 && rng.gen_bool(0.5) {
                b += 1;
            }
            b
        })
        .collect();
    roundtrip(&data);
}

#[test]
fn test_payload_bits_match_code_lengths() {
    let data = b"padding must strip back to exactly the code bits";
    let encoded = roundtrip(data);
    let expected: u64 = data
        .iter()
        .map(|&b| encoded.table.get(b).unwrap().len() as u64)
        .sum();
    assert_eq!(encoded.stats.payload_bits, expected);
    assert_eq!(
        unpacker::payload_bit_len(&encoded.data).unwrap(),
        expected
    );
}

#[test]
fn test_single_symbol_repeats() {
    let data = vec![0xABu8; 100_000];
    let encoded = roundtrip(&data);
    assert_eq!(encoded.table.len(), 1);
    assert!(encoded.stats.ratio() < 0.5);
}

#[test]
fn test_scenario_from_foreign_table() {
    // a table with the opposite tie-break still decodes
    let codec = Codec::default();
    let table = CodeTable::parse("98:1-97:0").unwrap();
    let packed = packer::pack(b"aaab", &table).unwrap();
    assert_eq!(packed.data, vec![0x18]);
    assert_eq!(codec.decode(&table, &[0x18]).unwrap(), b"aaab");
}

#[test]
fn test_serialized_table_roundtrip() {
    let codec = Codec::default();
    let data = b"serialized tables decode the same data";
    let encoded = codec.encode(data).unwrap();
    let parsed = CodeTable::parse(&encoded.table.to_string()).unwrap();
    assert_eq!(parsed, encoded.table);
    assert_eq!(codec.decode(&parsed, &encoded.data).unwrap(), data);
}

#[test]
fn test_mismatched_table_errors() {
    let codec = Codec::default();
    let encoded = codec.encode(b"abcdefgh abcdefgh").unwrap();
    let other = CodeTable::parse("97:00-98:01").unwrap();
    assert!(matches!(
        codec.decode(&other, &encoded.data),
        Err(CodecError::CorruptStream { .. })
    ));
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let table = dir.path().join("table.txt");
    let data = dir.path().join("data.bin");
    let output = dir.path().join("output.txt");

    let content = "Sphinx of black quartz, judge my vow.\n".repeat(20);
    std::fs::write(&input, &content).unwrap();

    let codec = Codec::default();
    let stats = codec.encode_file(&input, &table, &data).unwrap();
    assert_eq!(stats.initial_size, content.len() as u64);
    assert_eq!(stats.compressed_size, std::fs::metadata(&data).unwrap().len());
    assert_eq!(stats.table_size, std::fs::metadata(&table).unwrap().len());

    let table_text = std::fs::read_to_string(&table).unwrap();
    assert!(!table_text.ends_with('-'));
    assert!(table_text.split('-').all(|e| e.contains(':')));

    let decoded = codec.decode_file(&table, &data, &output).unwrap();
    assert_eq!(decoded.output_size, content.len() as u64);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), content);
}

#[test]
fn test_file_decode_malformed_table() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("table.txt");
    let data = dir.path().join("data.bin");
    let output = dir.path().join("output.txt");
    std::fs::write(&table, "97:0-oops").unwrap();
    std::fs::write(&data, [0x18u8]).unwrap();

    let result = Codec::default().decode_file(&table, &data, &output);
    assert!(matches!(result, Err(CodecError::MalformedTable { .. })));
    assert!(!output.exists());
}

#[test]
fn test_file_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let result = Codec::default().encode_file(
        &dir.path().join("missing.txt"),
        &dir.path().join("table.txt"),
        &dir.path().join("data.bin"),
    );
    assert!(matches!(result, Err(CodecError::IoError(_))));
}

#[test]
fn test_codec_config() {
    let config = CodecConfig {
        verify_roundtrip: true,
        ..CodecConfig::default()
    };
    let codec = Codec::new(config);
    let data = b"config test data with verification";
    let result = codec.encode(data).unwrap();
    assert!(result.stats.compressed_size > 0);
}
