//! table-huffman: Huffman compression with a text code table.
//!
//! Encoding runs four stages:
//! - frequency analysis of the input bytes
//! - Huffman tree construction from a min-priority queue
//! - code table derivation (left = 0, right = 1)
//! - bit packing with a self-delimiting padding marker
//!
//! The code table is serialized as text (`97:010-98:011-99:00`) and stored
//! next to the packed data, which has no header of its own. Decoding parses
//! the table, rebuilds the tree from the code paths and walks it bit by bit.

pub mod code;
pub mod config;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod packer;
pub mod table;
pub mod tree;
pub mod unpacker;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

pub use crate::code::Code;
pub use crate::config::CodecConfig;
pub use crate::error::CodecError;
pub use crate::frequency::Frequencies;
pub use crate::huffman::{build_tree, HuffmanTree};
pub use crate::table::CodeTable;

/// Sizes reported after an encode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodeStats {
    pub initial_size: u64,
    /// Packed data bytes, padding included.
    pub compressed_size: u64,
    /// Serialized table bytes.
    pub table_size: u64,
    pub payload_bits: u64,
    /// Shannon entropy of the input in bits per byte.
    pub entropy_bits: f64,
}

impl EncodeStats {
    /// Bytes saved by the packed data. Negative when it grew.
    pub fn space_saved(&self) -> i64 {
        self.initial_size as i64 - self.compressed_size as i64
    }

    pub fn space_saved_percent(&self) -> f64 {
        if self.initial_size == 0 {
            return 0.0;
        }
        self.space_saved() as f64 / self.initial_size as f64 * 100.0
    }

    pub fn ratio(&self) -> f64 {
        if self.initial_size == 0 {
            1.0
        } else {
            self.compressed_size as f64 / self.initial_size as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeStats {
    pub compressed_size: u64,
    pub payload_bits: u64,
    pub output_size: u64,
}

/// Result of an in-memory encode.
#[derive(Debug, Clone)]
pub struct EncodedOutput {
    pub table: CodeTable,
    pub data: Vec<u8>,
    pub stats: EncodeStats,
}

/// The codec engine
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Build a code table for `data` and pack `data` with it.
    pub fn encode(&self, data: &[u8]) -> Result<EncodedOutput, CodecError> {
        if data.len() > self.config.max_input_size {
            return Err(CodecError::InputTooLarge {
                size: data.len(),
                limit: self.config.max_input_size,
            });
        }

        let freq = Frequencies::count(data);
        let tree = build_tree(&freq);
        let table = CodeTable::derive(&tree);
        debug!(symbols = table.len(), "derived code table");
        let packed = packer::pack(data, &table)?;

        if self.config.verify_roundtrip {
            let decoded = self.decode(&table, &packed.data)?;
            if decoded != data {
                return Err(CodecError::VerificationFailed {
                    expected: data.len(),
                    actual: decoded.len(),
                });
            }
        }

        let stats = EncodeStats {
            initial_size: packed.initial_size,
            compressed_size: packed.compressed_size(),
            table_size: table.to_string().len() as u64,
            payload_bits: packed.payload_bits,
            entropy_bits: freq.entropy_bits(),
        };
        info!(
            initial_size = stats.initial_size,
            compressed_size = stats.compressed_size,
            "encoded"
        );

        Ok(EncodedOutput {
            table,
            data: packed.data,
            stats,
        })
    }

    /// Reconstruct the original bytes from a table and packed data.
    pub fn decode(&self, table: &CodeTable, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let tree = table.to_tree()?;
        unpacker::unpack(data, &tree)
    }

    /// Encode the file at `input`, writing the table text to `table_out` and
    /// the packed data to `data_out`.
    pub fn encode_file(
        &self,
        input: &Path,
        table_out: &Path,
        data_out: &Path,
    ) -> Result<EncodeStats, CodecError> {
        let data = std::fs::read(input)?;
        let encoded = self.encode(&data)?;

        let mut writer = BufWriter::new(File::create(table_out)?);
        write!(writer, "{}", encoded.table)?;
        writer.flush()?;

        let mut writer = BufWriter::new(File::create(data_out)?);
        writer.write_all(&encoded.data)?;
        writer.flush()?;

        debug!(table = %table_out.display(), data = %data_out.display(), "wrote encoded files");
        Ok(encoded.stats)
    }

    /// Decode `data_in` with the table in `table_in` and write the result to
    /// `output`. The table is parsed before the data is read.
    pub fn decode_file(
        &self,
        table_in: &Path,
        data_in: &Path,
        output: &Path,
    ) -> Result<DecodeStats, CodecError> {
        let table = CodeTable::parse(&std::fs::read_to_string(table_in)?)?;
        let data = std::fs::read(data_in)?;
        let payload_bits = unpacker::payload_bit_len(&data)?;
        let decoded = self.decode(&table, &data)?;

        let mut writer = BufWriter::new(File::create(output)?);
        writer.write_all(&decoded)?;
        writer.flush()?;

        let stats = DecodeStats {
            compressed_size: data.len() as u64,
            payload_bits,
            output_size: decoded.len() as u64,
        };
        info!(
            compressed_size = stats.compressed_size,
            output_size = stats.output_size,
            "decoded"
        );
        Ok(stats)
    }
}
