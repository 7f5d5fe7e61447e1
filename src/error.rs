//! Error types for table-huffman

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("symbol {symbol} has no code in the code table")]
    MissingSymbolCode { symbol: u8 },

    #[error("corrupt stream at bit {bit_offset}: {reason}")]
    CorruptStream { bit_offset: u64, reason: String },

    #[error("malformed table entry {entry}: {reason}")]
    MalformedTable { entry: usize, reason: String },

    #[error("invalid tree path: {0}")]
    InvalidPath(String),

    #[error("input of {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    #[error("round-trip verification failed: expected {expected} bytes, got {actual}")]
    VerificationFailed { expected: usize, actual: usize },

    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl CodecError {
    pub(crate) fn corrupt(bit_offset: u64, reason: impl Into<String>) -> Self {
        CodecError::CorruptStream {
            bit_offset,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(entry: usize, reason: impl Into<String>) -> Self {
        CodecError::MalformedTable {
            entry,
            reason: reason.into(),
        }
    }
}
