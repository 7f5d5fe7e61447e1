//! Bit unpacking by tree traversal

use bitstream_io::{BigEndian, BitRead, BitReader};
use tracing::debug;

use crate::error::CodecError;
use crate::huffman::HuffmanTree;

/// Number of data bits in `packed`, i.e. everything before the padding
/// marker. The marker is the lowest set bit of the final byte.
pub fn payload_bit_len(packed: &[u8]) -> Result<u64, CodecError> {
    let Some(&last) = packed.last() else {
        return Err(CodecError::corrupt(0, "no data, padding marker missing"));
    };
    let total = packed.len() as u64 * 8;
    if last == 0 {
        return Err(CodecError::corrupt(
            total - 8,
            "final byte carries no padding marker",
        ));
    }
    let marker = u64::from(last.trailing_zeros());
    Ok(total - (marker + 1))
}

/// Decode `packed` against `tree`, one bit per cursor step, emitting a byte
/// and returning to the root at every leaf.
pub fn unpack(packed: &[u8], tree: &HuffmanTree) -> Result<Vec<u8>, CodecError> {
    let payload_bits = payload_bit_len(packed)?;
    debug!(payload_bits, bytes = packed.len(), "unpacking data");

    let mut reader = BitReader::endian(std::io::Cursor::new(packed), BigEndian);
    let mut cursor = tree.cursor();
    let mut output = Vec::with_capacity(packed.len() * 2);

    for offset in 0..payload_bits {
        let bit = reader.read_bit()?;
        let node = cursor.step(bit).ok_or_else(|| {
            let side = if bit { "right" } else { "left" };
            CodecError::corrupt(offset, format!("no {side} child on the decoding path"))
        })?;
        if let Some(&symbol) = node.value() {
            output.push(symbol);
            cursor.reset();
        }
    }

    if !cursor.at_root() {
        return Err(CodecError::corrupt(payload_bits, "stream ends inside a code"));
    }
    Ok(output)
}
