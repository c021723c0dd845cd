use crate::code::Code;
use crate::error::{HuffmanError, Result};

/// Appends variable-length codes into a byte buffer, most-significant-bit
/// first within each byte.
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_len: u64,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_bit(&mut self, bit: bool) {
        let byte_index = (self.bit_len / 8) as usize;
        let bit_offset = (self.bit_len % 8) as u8;

        if byte_index >= self.bytes.len() {
            self.bytes.push(0);
        }

        if bit {
            self.bytes[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_len += 1;
    }

    /// Appends a code, highest path bit first.
    pub fn push_code(&mut self, code: Code) {
        for i in (0..code.len).rev() {
            self.push_bit((code.bits >> i) & 1 == 1);
        }
    }

    /// Exact number of bits written so far.
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Consumes the writer, returning the packed bytes and the exact bit
    /// length. The final byte is already right-zero-padded because bits are
    /// only ever OR-ed into fresh zero bytes.
    pub fn finish(self) -> (Vec<u8>, u64) {
        (self.bytes, self.bit_len)
    }
}

/// Reads bits back out of a packed buffer in the same MSB-first order,
/// stopping exactly at the declared bit length so padding is never consumed.
#[derive(Debug)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    bit_len: u64,
    pos: u64,
}

impl<'a> BitReader<'a> {
    /// Creates a reader over `bytes` that yields exactly `bit_len` bits.
    ///
    /// Fails with [`HuffmanError::CorruptStream`] if the declared length
    /// needs more bits than the buffer holds.
    pub fn new(bytes: &'a [u8], bit_len: u64) -> Result<Self> {
        if bit_len > bytes.len() as u64 * 8 {
            return Err(HuffmanError::CorruptStream {
                detail: format!(
                    "declared bit length {} exceeds {} payload bytes",
                    bit_len,
                    bytes.len()
                ),
            });
        }
        Ok(Self {
            bytes,
            bit_len,
            pos: 0,
        })
    }

    /// Returns the next bit, or `None` once the declared length is exhausted.
    pub fn next_bit(&mut self) -> Option<bool> {
        if self.pos >= self.bit_len {
            return None;
        }
        let byte = self.bytes[(self.pos / 8) as usize];
        let bit_offset = (self.pos % 8) as u8;
        self.pos += 1;
        Some(byte & (1 << (7 - bit_offset)) != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first_packing() {
        let mut writer = BitWriter::new();
        writer.push_code(Code { bits: 0b101, len: 3 });
        let (bytes, bit_len) = writer.finish();
        assert_eq!(bytes, vec![0b1010_0000]);
        assert_eq!(bit_len, 3);
    }

    #[test]
    fn test_codes_span_byte_boundaries() {
        let mut writer = BitWriter::new();
        writer.push_code(Code { bits: 0b11111, len: 5 });
        writer.push_code(Code { bits: 0b01101, len: 5 });
        let (bytes, bit_len) = writer.finish();
        assert_eq!(bit_len, 10);
        assert_eq!(bytes, vec![0b1111_1011, 0b0100_0000]);
    }

    #[test]
    fn test_reader_inverts_writer() {
        let mut writer = BitWriter::new();
        let pattern = [true, false, false, true, true, true, false, true, false];
        for &bit in &pattern {
            writer.push_code(Code {
                bits: u64::from(bit),
                len: 1,
            });
        }
        let (bytes, bit_len) = writer.finish();

        let mut reader = BitReader::new(&bytes, bit_len).unwrap();
        let mut read_back = Vec::new();
        while let Some(bit) = reader.next_bit() {
            read_back.push(bit);
        }
        assert_eq!(read_back, pattern);
    }

    #[test]
    fn test_reader_stops_at_declared_length() {
        let bytes = [0xFF, 0xFF];
        let mut reader = BitReader::new(&bytes, 3).unwrap();
        assert_eq!(reader.next_bit(), Some(true));
        assert_eq!(reader.next_bit(), Some(true));
        assert_eq!(reader.next_bit(), Some(true));
        assert_eq!(reader.next_bit(), None);
    }

    #[test]
    fn test_reader_rejects_overlong_declared_length() {
        let err = BitReader::new(&[0u8; 2], 17).unwrap_err();
        assert!(matches!(err, HuffmanError::CorruptStream { .. }));
    }

    #[test]
    fn test_empty_writer() {
        let (bytes, bit_len) = BitWriter::new().finish();
        assert!(bytes.is_empty());
        assert_eq!(bit_len, 0);
    }
}
