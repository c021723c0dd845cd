use crate::error::{HuffmanError, Result};
use crate::tree::{Node, Tree};
use ahash::AHashMap as HashMap;
use std::fmt;

/// A non-empty bit-string code for one symbol.
///
/// The `len` low bits of `bits` hold the code, first path bit in the highest
/// of those positions. `u64` storage is exact: a code deeper than 64 bits
/// would need a Fibonacci-shaped frequency table summing past 2^64 symbols,
/// which a single in-memory input cannot produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    /// The code bits, right-aligned.
    pub bits: u64,
    /// Number of significant bits, at least 1 for any generated code.
    pub len: u8,
}

impl Code {
    /// Extends the code by one edge: `0` for left, `1` for right.
    pub(crate) fn child(self, right: bool) -> Self {
        Self {
            bits: (self.bits << 1) | u64::from(right),
            len: self.len + 1,
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len).rev() {
            let bit = (self.bits >> i) & 1;
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

/// Mapping from symbol to prefix code.
///
/// A fresh table is allocated per derivation; tables are never shared or
/// accumulated across separate compression calls. Iteration is in ascending
/// symbol order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
}

impl CodeTable {
    pub(crate) fn empty() -> Self {
        Self { codes: [None; 256] }
    }

    /// Inserts a code, returning any previous entry for the symbol.
    pub(crate) fn set(&mut self, symbol: u8, code: Code) -> Option<Code> {
        self.codes[symbol as usize].replace(code)
    }

    /// Derives the code table from a tree by depth-first traversal.
    ///
    /// Left edges contribute `0`, right edges `1`; the accumulated path at a
    /// leaf is that symbol's code. A lone leaf root gets the one-bit code `0`
    /// rather than the empty string, which could not be packed unambiguously.
    ///
    /// Fails with [`HuffmanError::InvalidTree`] if a child key is missing
    /// from the arena or a path exceeds 64 bits.
    pub fn from_tree(tree: &Tree) -> Result<Self> {
        let mut table = Self::empty();

        let root = tree.node(tree.root()).ok_or_else(|| HuffmanError::InvalidTree {
            detail: "root key missing from arena".into(),
        })?;

        if let Node::Leaf { symbol, .. } = root {
            table.set(*symbol, Code { bits: 0, len: 1 });
            return Ok(table);
        }

        let mut stack = vec![(tree.root(), Code { bits: 0, len: 0 })];
        while let Some((key, path)) = stack.pop() {
            let node = tree.node(key).ok_or_else(|| HuffmanError::InvalidTree {
                detail: "child key missing from arena".into(),
            })?;

            match node {
                Node::Leaf { symbol, .. } => {
                    table.set(*symbol, path);
                }
                Node::Internal { left, right, .. } => {
                    if path.len >= 64 {
                        return Err(HuffmanError::InvalidTree {
                            detail: "code path exceeds 64 bits".into(),
                        });
                    }
                    stack.push((*right, path.child(true)));
                    stack.push((*left, path.child(false)));
                }
            }
        }

        Ok(table)
    }

    /// Returns the code for a symbol, if it has one.
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// True if no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(|c| c.is_none())
    }

    /// Iterates over `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }

    /// Builds the inverse mapping used by the unpacker.
    ///
    /// The prefix property makes the inverse unambiguous: a candidate
    /// `(bits, len)` matches at most one symbol. Freshly allocated per call.
    pub fn inverse(&self) -> HashMap<(u64, u8), u8> {
        self.iter()
            .map(|(symbol, code)| ((code.bits, code.len), symbol))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freq::FrequencyTable;

    fn table_for(input: &[u8]) -> CodeTable {
        let freqs = FrequencyTable::from_bytes(input).unwrap();
        let tree = Tree::from_frequencies(&freqs);
        CodeTable::from_tree(&tree).unwrap()
    }

    /// True if `a` is a proper prefix of `b`.
    fn is_proper_prefix(a: Code, b: Code) -> bool {
        a.len < b.len && (b.bits >> (b.len - a.len)) == a.bits
    }

    #[test]
    fn test_single_leaf_gets_one_bit_code() {
        let table = table_for(b"aaaaa");
        assert_eq!(table.len(), 1);
        let code = table.get(b'a').unwrap();
        assert_eq!(code.len, 1);
        assert_eq!(code.bits, 0);
    }

    #[test]
    fn test_skewed_frequencies_give_short_code_to_common_symbol() {
        // a:5 b:2 c:1 -> a gets 1 bit, b and c get 2 bits
        let table = table_for(b"aaaaabbc");
        assert_eq!(table.get(b'a').unwrap().len, 1);
        assert_eq!(table.get(b'b').unwrap().len, 2);
        assert_eq!(table.get(b'c').unwrap().len, 2);
    }

    #[test]
    fn test_prefix_property() {
        let table = table_for(b"the quick brown fox jumps over the lazy dog");
        let codes: Vec<Code> = table.iter().map(|(_, c)| c).collect();
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!is_proper_prefix(a, b), "{} is a prefix of {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_fresh_table_per_derivation() {
        let freqs_ab = FrequencyTable::from_bytes(b"ab").unwrap();
        let tree_ab = Tree::from_frequencies(&freqs_ab);
        let table_ab = CodeTable::from_tree(&tree_ab).unwrap();

        let freqs_cd = FrequencyTable::from_bytes(b"cd").unwrap();
        let tree_cd = Tree::from_frequencies(&freqs_cd);
        let table_cd = CodeTable::from_tree(&tree_cd).unwrap();

        // No stale entries leak from the earlier derivation.
        assert_eq!(table_ab.len(), 2);
        assert_eq!(table_cd.len(), 2);
        assert!(table_cd.get(b'a').is_none());
        assert!(table_cd.get(b'b').is_none());
    }

    #[test]
    fn test_inverse_is_unambiguous() {
        let table = table_for(b"mississippi");
        let inverse = table.inverse();
        assert_eq!(inverse.len(), table.len());
        for (symbol, code) in table.iter() {
            assert_eq!(inverse[&(code.bits, code.len)], symbol);
        }
    }

    #[test]
    fn test_code_display() {
        let code = Code { bits: 0b0110, len: 4 };
        assert_eq!(code.to_string(), "0110");
    }
}
