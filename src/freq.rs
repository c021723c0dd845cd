use crate::error::{HuffmanError, Result};

/// Occurrence counts for every byte value appearing in one input.
///
/// Built once per compression and immutable afterwards. Iteration is always
/// in ascending symbol order, so downstream tree construction sees the same
/// leaf sequence for the same input regardless of how the counts were
/// accumulated.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: [u64; 256],
    total: u64,
    distinct: u16,
}

impl FrequencyTable {
    /// Counts symbol occurrences in `input`.
    ///
    /// Returns [`HuffmanError::EmptyInput`] for a zero-length input: an empty
    /// sequence has no valid tree and is rejected explicitly rather than
    /// passed through.
    pub fn from_bytes(input: &[u8]) -> Result<Self> {
        if input.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let mut counts = [0u64; 256];
        for &byte in input {
            counts[byte as usize] += 1;
        }

        let distinct = counts.iter().filter(|&&c| c > 0).count() as u16;

        Ok(Self {
            counts,
            total: input.len() as u64,
            distinct,
        })
    }

    /// Returns the count for a symbol (0 if it never occurred).
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Total number of symbols counted (the input length).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct symbols that occurred at least once.
    pub fn distinct(&self) -> usize {
        self.distinct as usize
    }

    /// Iterates over `(symbol, count)` pairs in ascending symbol order,
    /// skipping symbols that never occurred.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}
