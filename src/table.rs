//! Code tables: derivation from a tree, text serialization and parsing
//!
//! Text format: `SYMBOL:BITS` entries joined by `-` with no trailing
//! separator, e.g. `97:010-98:011-99:00`. `SYMBOL` is the decimal byte
//! value. Entries may appear in any order.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::code::Code;
use crate::error::CodecError;
use crate::huffman::HuffmanTree;

const ENTRY_SEPARATOR: char = '-';
const FIELD_SEPARATOR: char = ':';

/// Mapping from byte value to its prefix code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `tree` depth-first, appending 0 on every left descent and 1 on
    /// every right descent, and record the path of each payload node.
    ///
    /// A tree whose root is its only leaf gets the 1-bit code `0`, since an
    /// empty code cannot be packed.
    pub fn derive(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack = vec![(tree.root(), Code::new())];

        while let Some((id, code)) = stack.pop() {
            let Some(node) = tree.get(id) else {
                continue;
            };
            if let Some(&symbol) = node.value() {
                let code = if code.is_empty() {
                    warn!(symbol, "single-symbol input, assigning code 0");
                    Code::from(vec![false])
                } else {
                    code.clone()
                };
                codes.insert(symbol, code);
            }
            if let Some(right) = node.right() {
                stack.push((right, code.with(true)));
            }
            if let Some(left) = node.left() {
                stack.push((left, code.with(false)));
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    /// Returns the code previously assigned to `symbol`, if any.
    pub fn insert(&mut self, symbol: u8, code: Code) -> Option<Code> {
        self.codes.insert(symbol, code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    /// Rebuild the decoding tree by inserting every symbol at its code path.
    pub fn to_tree(&self) -> Result<HuffmanTree, CodecError> {
        let mut tree = HuffmanTree::new();
        for (&symbol, code) in &self.codes {
            tree.insert(code.bits(), symbol)?;
        }
        Ok(tree)
    }

    pub fn parse(text: &str) -> Result<Self, CodecError> {
        let text = text.trim_end_matches(|c: char| c == '\r' || c == '\n');
        if text.is_empty() {
            return Ok(Self::new());
        }

        let entries: Vec<&str> = text.split(ENTRY_SEPARATOR).collect();
        let mut table = Self::new();
        let mut seen = HashSet::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            let (symbol, bits) = entry.split_once(FIELD_SEPARATOR).ok_or_else(|| {
                CodecError::malformed(index, format!("missing '{FIELD_SEPARATOR}' in {entry:?}"))
            })?;
            let symbol: u8 = symbol.parse().map_err(|e| {
                CodecError::malformed(index, format!("invalid symbol {symbol:?}: {e}"))
            })?;
            let mut code: Code = bits
                .parse()
                .map_err(|e| CodecError::malformed(index, format!("invalid code: {e}")))?;

            if code.is_empty() {
                if entries.len() > 1 {
                    return Err(CodecError::malformed(
                        index,
                        format!("empty code for symbol {symbol} in a multi-symbol table"),
                    ));
                }
                warn!(symbol, "empty single-symbol code, reading it as 0");
                code = Code::from(vec![false]);
            }

            if !seen.insert(code.clone()) {
                return Err(CodecError::malformed(
                    index,
                    format!("code {code} assigned twice"),
                ));
            }
            if table.codes.insert(symbol, code).is_some() {
                return Err(CodecError::malformed(
                    index,
                    format!("symbol {symbol} listed twice"),
                ));
            }
        }

        Ok(table)
    }
}

impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (symbol, code)) in self.codes.iter().enumerate() {
            if i > 0 {
                write!(f, "{ENTRY_SEPARATOR}")?;
            }
            write!(f, "{symbol}{FIELD_SEPARATOR}{code}")?;
        }
        Ok(())
    }
}

impl FromStr for CodeTable {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromIterator<(u8, Code)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (u8, Code)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::Frequencies;
    use crate::huffman::build_tree;

    fn table_for(data: &[u8]) -> CodeTable {
        CodeTable::derive(&build_tree(&Frequencies::count(data)))
    }

    fn code(bits: &str) -> Code {
        bits.parse().unwrap()
    }

    #[test]
    fn test_derive_two_symbols() {
        let table = table_for(b"aaab");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(b'a'), Some(&code("1")));
        assert_eq!(table.get(b'b'), Some(&code("0")));
        assert_eq!(table.to_string(), "97:1-98:0");
    }

    #[test]
    fn test_derive_single_symbol() {
        let table = table_for(b"xxxxxx");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'x'), Some(&code("0")));
    }

    #[test]
    fn test_derive_empty() {
        let table = table_for(b"");
        assert!(table.is_empty());
        assert_eq!(table.to_string(), "");
    }

    #[test]
    fn test_derived_table_is_complete_and_prefix_free() {
        let data = b"the quick brown fox jumps over the lazy dog, again and again";
        let table = table_for(data);
        let freq = Frequencies::count(data);
        assert_eq!(table.len(), freq.distinct());
        for (symbol, _) in freq.iter() {
            assert!(table.get(symbol).is_some(), "missing code for {symbol}");
        }

        let codes: Vec<&Code> = table.iter().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{a} is a prefix of {b}");
                }
            }
        }
    }

    #[test]
    fn test_all_bytes_get_eight_bit_codes() {
        let data: Vec<u8> = (0..=255).collect();
        let table = table_for(&data);
        assert_eq!(table.len(), 256);
        assert!(table.iter().all(|(_, c)| c.len() == 8));
    }

    #[test]
    fn test_parse_any_order() {
        let table = CodeTable::parse("99:00-97:010-98:011").unwrap();
        assert_eq!(table.get(b'a'), Some(&code("010")));
        assert_eq!(table.get(b'b'), Some(&code("011")));
        assert_eq!(table.get(b'c'), Some(&code("00")));
        assert_eq!(table.to_string(), "97:010-98:011-99:00");
    }

    #[test]
    fn test_parse_tolerates_trailing_newline() {
        let table = CodeTable::parse("97:0-98:1\n").unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_parse_empty() {
        assert!(CodeTable::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_reparse_is_stable() {
        let first = CodeTable::parse("10:11-0:0-255:10").unwrap();
        let second = CodeTable::parse(&first.to_string()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_single_empty_code() {
        let table = CodeTable::parse("65:").unwrap();
        assert_eq!(table.get(b'A'), Some(&code("0")));
    }

    #[test]
    fn test_parse_malformed() {
        for text in [
            "97",
            "97:01-",
            "a:01",
            "256:01",
            "-1:01",
            "97:012",
            "97:0-98:",
            "97:0-97:1",
            "97:0-98:0",
            "97:0--98:1",
        ] {
            let result = CodeTable::parse(text);
            assert!(
                matches!(result, Err(CodecError::MalformedTable { .. })),
                "{text:?} should be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn test_malformed_reports_entry() {
        match CodeTable::parse("97:0-98:1-x:10") {
            Err(CodecError::MalformedTable { entry, .. }) => assert_eq!(entry, 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_to_tree() {
        let table = CodeTable::parse("97:010-98:011-99:00").unwrap();
        let tree = table.to_tree().unwrap();
        let leaf = |bits: &str| tree.search(code(bits).bits()).and_then(|n| n.value().copied());
        assert_eq!(leaf("010"), Some(b'a'));
        assert_eq!(leaf("011"), Some(b'b'));
        assert_eq!(leaf("00"), Some(b'c'));
        assert_eq!(leaf("01"), None);
        assert!(tree.search(code("1").bits()).is_none());
    }

    #[test]
    fn test_to_tree_rejects_empty_code() {
        let table: CodeTable = vec![(1u8, Code::new())].into_iter().collect();
        assert!(matches!(table.to_tree(), Err(CodecError::InvalidPath(_))));
    }
}
