use crate::bits::{BitReader, BitWriter};
use crate::code::CodeTable;
use crate::container::Container;
use crate::error::{HuffmanError, Result};
use crate::freq::FrequencyTable;
use crate::tree::Tree;

/// Compresses a byte sequence into a self-describing container.
///
/// Counts frequencies, builds the canonical tree, derives a fresh code
/// table, and packs the input MSB-first. Pure and deterministic: the same
/// input always yields a byte-identical container.
///
/// Fails with [`HuffmanError::EmptyInput`] for a zero-length input.
pub fn compress(input: &[u8]) -> Result<Container> {
    let (container, _) = compress_with_tree(input)?;
    Ok(container)
}

/// Like [`compress`], but also returns the tree for callers that want to
/// render it afterwards. The tree carries no round-trip obligation.
pub fn compress_with_tree(input: &[u8]) -> Result<(Container, Tree)> {
    let freqs = FrequencyTable::from_bytes(input)?;
    let tree = Tree::from_frequencies(&freqs);
    let table = CodeTable::from_tree(&tree)?;

    let mut writer = BitWriter::new();
    for &symbol in input {
        let code = table
            .get(symbol)
            .ok_or(HuffmanError::UnknownSymbol { symbol })?;
        writer.push_code(code);
    }
    let (payload, bit_len) = writer.finish();

    log::debug!(
        "compressed {} bytes ({} distinct symbols) into {} payload bytes ({} bits)",
        input.len(),
        freqs.distinct(),
        payload.len(),
        bit_len
    );

    Ok((Container::new(table, payload, bit_len), tree))
}

/// Decompresses a container back into the original byte sequence.
///
/// Works from the container alone: the inverse table is rebuilt from the
/// persisted code table, bits are read MSB-first up to the declared bit
/// length, and each exact inverse-table match emits a symbol and resets the
/// candidate.
///
/// Fails with [`HuffmanError::CorruptStream`] if the stream ends mid-code or
/// a candidate outgrows every table entry.
pub fn decompress(container: &Container) -> Result<Vec<u8>> {
    let inverse = container.table().inverse();
    let mut reader = BitReader::new(container.payload(), container.bit_len())?;

    let mut output = Vec::new();
    let mut bits = 0u64;
    let mut len = 0u8;

    while let Some(bit) = reader.next_bit() {
        bits = (bits << 1) | u64::from(bit);
        len += 1;

        if let Some(&symbol) = inverse.get(&(bits, len)) {
            output.push(symbol);
            bits = 0;
            len = 0;
        } else if len == 64 {
            // No table entry is longer than 64 bits, so this candidate can
            // never match.
            return Err(HuffmanError::CorruptStream {
                detail: "no code matches the accumulated bits".into(),
            });
        }
    }

    if len != 0 {
        return Err(HuffmanError::CorruptStream {
            detail: format!("stream ended mid-code with {} unmatched bits", len),
        });
    }

    log::debug!(
        "decompressed {} payload bytes into {} bytes",
        container.payload().len(),
        output.len()
    );

    Ok(output)
}

/// Byte-size statistics for one compression, in the shape the UI layer
/// displays them.
#[derive(Debug, Clone, Copy)]
pub struct CompressionStats {
    /// Size of the original input in bytes
    pub original_bytes: usize,
    /// Size of the serialized container in bytes
    pub compressed_bytes: usize,
}

impl CompressionStats {
    /// Space saved as a percentage: `100 - compressed/original * 100`.
    ///
    /// Negative when the container (table overhead included) is larger than
    /// the input, as happens for short or high-entropy inputs.
    pub fn ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            0.0
        } else {
            100.0 - (self.compressed_bytes as f64 / self.original_bytes as f64) * 100.0
        }
    }
}

/// Compresses and reports container-size statistics in one call.
pub fn compress_with_stats(input: &[u8]) -> Result<(Container, CompressionStats)> {
    let container = compress(input)?;
    let stats = CompressionStats {
        original_bytes: input.len(),
        compressed_bytes: container.serialized_len(),
    };
    Ok((container, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let input = b"the quick brown fox jumps over the lazy dog";
        let container = compress(input).unwrap();
        assert_eq!(decompress(&container).unwrap(), input);
    }

    #[test]
    fn test_round_trip_whitespace_and_punctuation() {
        let input = b"line one\nline two\r\n\t...!!!  ??\n";
        let container = compress(input).unwrap();
        assert_eq!(decompress(&container).unwrap(), input);
    }

    #[test]
    fn test_single_symbol_round_trip() {
        let container = compress(b"aaaaa").unwrap();
        assert_eq!(container.table().len(), 1);
        assert!(container.table().get(b'a').unwrap().len >= 1);
        assert_eq!(decompress(&container).unwrap(), b"aaaaa");
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = compress(b"").unwrap_err();
        assert!(matches!(err, HuffmanError::EmptyInput));
    }

    #[test]
    fn test_skewed_input_packs_below_one_byte_per_symbol() {
        let input = b"aaaaaaaab";
        let container = compress(input).unwrap();
        assert!(container.bit_len() < input.len() as u64 * 8);
    }

    #[test]
    fn test_two_symbol_input_packs_near_one_bit_per_symbol() {
        let input = b"ababab";
        let container = compress(input).unwrap();
        assert_eq!(container.bit_len(), input.len() as u64);
    }

    #[test]
    fn test_deterministic_containers() {
        let input = b"deterministic output, twice over";
        let first = compress(input).unwrap().to_bytes();
        let second = compress(input).unwrap().to_bytes();
        assert_eq!(first, second);
    }

    #[test]
    fn test_truncated_container_detected() {
        let bytes = compress(b"detect the truncation here").unwrap().to_bytes();
        let err = Container::from_bytes(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, HuffmanError::CorruptStream { .. }));
    }

    #[test]
    fn test_decode_is_independent_of_encoder_state() {
        // Serialize, drop everything, decode purely from the bytes.
        let input = b"self-sufficient container";
        let bytes = compress(input).unwrap().to_bytes();
        let container = Container::from_bytes(&bytes).unwrap();
        assert_eq!(decompress(&container).unwrap(), input);
    }

    #[test]
    fn test_stats_ratio() {
        let stats = CompressionStats {
            original_bytes: 1000,
            compressed_bytes: 400,
        };
        assert!((stats.ratio() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_binary_input_round_trip() {
        let input: Vec<u8> = (0u8..=255).cycle().take(1024).collect();
        let container = compress(&input).unwrap();
        assert_eq!(decompress(&container).unwrap(), input);
    }
}
