//! Configuration for table-huffman

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Largest input `Codec::encode` accepts, in bytes.
    pub max_input_size: usize,
    /// Decode every encoded output again and compare it with the input.
    pub verify_roundtrip: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_input_size: 100 * 1024 * 1024, // 100 MB
            verify_roundtrip: false,
        }
    }
}

impl CodecConfig {
    /// Load a config from a JSON file. Absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, CodecError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, CodecError> {
        serde_json::from_str(text).map_err(|e| CodecError::ConfigError(e.to_string()))
    }
}
