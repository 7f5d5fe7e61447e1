//! Bit-string codes

use std::fmt;
use std::str::FromStr;

/// An ordered sequence of bits; `false` is 0 (left), `true` is 1 (right).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }

    /// Copy of this code extended by one bit.
    pub fn with(&self, bit: bool) -> Self {
        let mut bits = Vec::with_capacity(self.0.len() + 1);
        bits.extend_from_slice(&self.0);
        bits.push(bit);
        Self(bits)
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl From<Vec<bool>> for Code {
    fn from(bits: Vec<bool>) -> Self {
        Self(bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Rejected character and its position within the bit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCodeError {
    pub position: usize,
    pub found: char,
}

impl fmt::Display for ParseCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected '0' or '1' at position {}, found {:?}",
            self.position, self.found
        )
    }
}

impl std::error::Error for ParseCodeError {}

impl FromStr for Code {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(ParseCodeError { position, found }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Code)
    }
}
