//! Bit packing of coded bytes
//!
//! Codes are concatenated most-significant-bit first within each output
//! byte. The stream always ends with a padding marker: a single `1` bit
//! followed by `0` bits up to the next byte boundary. When the codes already
//! end on a boundary a whole `0x80` byte is appended, so the marker is
//! always present in the final byte.

use bitstream_io::{BigEndian, BitWrite, BitWriter};
use tracing::debug;

use crate::error::CodecError;
use crate::table::CodeTable;

/// Packed output together with the sizes needed for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packed {
    pub data: Vec<u8>,
    /// Number of input bytes.
    pub initial_size: u64,
    /// Sum of the code lengths of all input bytes, padding excluded.
    pub payload_bits: u64,
}

impl Packed {
    /// Number of packed bytes, padding included.
    pub fn compressed_size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Padding length in bits, marker included. Always 1 to 8.
    pub fn padding_bits(&self) -> u64 {
        self.compressed_size() * 8 - self.payload_bits
    }
}

/// Replace every byte of `data` by its code from `table` and pack the bits.
pub fn pack(data: &[u8], table: &CodeTable) -> Result<Packed, CodecError> {
    let mut output = Vec::with_capacity(data.len() / 2 + 1);
    let mut payload_bits = 0u64;
    {
        let mut w = BitWriter::endian(&mut output, BigEndian);
        for &b in data {
            let code = table
                .get(b)
                .ok_or(CodecError::MissingSymbolCode { symbol: b })?;
            for &bit in code.bits() {
                w.write_bit(bit)?;
            }
            payload_bits += code.len() as u64;
        }
        w.write_bit(true)?;
        w.byte_align()?;
    }

    let packed = Packed {
        data: output,
        initial_size: data.len() as u64,
        payload_bits,
    };
    debug!(
        payload_bits,
        padding_bits = packed.padding_bits(),
        bytes = packed.compressed_size(),
        "packed data"
    );
    Ok(packed)
}
