use crate::code::{Code, CodeTable};
use crate::error::{HuffmanError, Result};
use std::io::{Cursor, Read};

/// Magic tag identifying version 1 of the container layout.
pub const MAGIC: [u8; 4] = *b"HUF1";

/// The self-describing compressed artifact.
///
/// Holds everything decoding needs: the code table, the exact payload bit
/// count, and the packed bytes. Decoding a container depends on nothing else;
/// in particular it never re-derives the tree from the original plaintext.
///
/// Wire layout, all integers little-endian:
///
/// ```text
/// magic    4 bytes   b"HUF1"
/// nsym     2 bytes   u16 entry count (1..=256)
/// entries  nsym x { symbol: u8, code_len: u8, code_bits: u64 }, ascending symbol
/// bit_len  8 bytes   u64 exact payload bit count
/// npay     8 bytes   u64 payload byte count
/// payload  npay bytes
/// ```
#[derive(Debug, Clone)]
pub struct Container {
    table: CodeTable,
    bit_len: u64,
    payload: Vec<u8>,
}

impl Container {
    pub(crate) fn new(table: CodeTable, payload: Vec<u8>, bit_len: u64) -> Self {
        Self {
            table,
            bit_len,
            payload,
        }
    }

    /// The code table persisted with the payload.
    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Exact number of payload bits (excludes final-byte padding).
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// The packed payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Serialized size in bytes, without allocating.
    pub fn serialized_len(&self) -> usize {
        4 + 2 + self.table.len() * 10 + 8 + 8 + self.payload.len()
    }

    /// Serializes the container.
    ///
    /// Table entries are written in ascending symbol order, so the same
    /// container always serializes to the same bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.serialized_len());

        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&(self.table.len() as u16).to_le_bytes());

        for (symbol, code) in self.table.iter() {
            bytes.push(symbol);
            bytes.push(code.len);
            bytes.extend_from_slice(&code.bits.to_le_bytes());
        }

        bytes.extend_from_slice(&self.bit_len.to_le_bytes());
        bytes.extend_from_slice(&(self.payload.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&self.payload);

        bytes
    }

    /// Parses a serialized container, validating the header and every
    /// structural invariant of the table and payload.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            let mut found = [0u8; 4];
            found[..data.len()].copy_from_slice(data);
            return Err(HuffmanError::FormatVersion { found });
        }
        if data[..4] != MAGIC {
            let mut found = [0u8; 4];
            found.copy_from_slice(&data[..4]);
            return Err(HuffmanError::FormatVersion { found });
        }

        let mut cursor = Cursor::new(&data[4..]);

        let nsym = read_u16(&mut cursor)? as usize;
        if nsym == 0 {
            return Err(HuffmanError::CorruptStream {
                detail: "container declares an empty code table".into(),
            });
        }
        if nsym > 256 {
            return Err(HuffmanError::CorruptStream {
                detail: format!("container declares {} code table entries", nsym),
            });
        }

        let mut table = CodeTable::empty();
        let mut prev_symbol: Option<u8> = None;
        for _ in 0..nsym {
            let symbol = read_u8(&mut cursor)?;
            let len = read_u8(&mut cursor)?;
            let bits = read_u64(&mut cursor)?;

            if len == 0 || len > 64 {
                return Err(HuffmanError::CorruptStream {
                    detail: format!("code length {} for symbol {:#04x}", len, symbol),
                });
            }
            if len < 64 && bits >> len != 0 {
                return Err(HuffmanError::CorruptStream {
                    detail: format!("code bits exceed declared length for symbol {:#04x}", symbol),
                });
            }
            if prev_symbol.is_some_and(|prev| symbol <= prev) {
                return Err(HuffmanError::CorruptStream {
                    detail: "code table entries not in ascending symbol order".into(),
                });
            }
            prev_symbol = Some(symbol);

            table.set(symbol, Code { bits, len });
        }

        // A table that is not prefix-free would decode to a wrong answer
        // rather than an error, so reject it here.
        let entries: Vec<(u8, Code)> = table.iter().collect();
        for (i, &(sym_a, code_a)) in entries.iter().enumerate() {
            for &(sym_b, code_b) in &entries[i + 1..] {
                if is_prefix(code_a, code_b) || is_prefix(code_b, code_a) {
                    return Err(HuffmanError::CorruptStream {
                        detail: format!(
                            "codes for symbols {:#04x} and {:#04x} are not prefix-free",
                            sym_a, sym_b
                        ),
                    });
                }
            }
        }

        let bit_len = read_u64(&mut cursor)?;
        let npay = read_u64(&mut cursor)?;

        if npay != bit_len.div_ceil(8) {
            return Err(HuffmanError::CorruptStream {
                detail: format!(
                    "payload length {} disagrees with bit count {}",
                    npay, bit_len
                ),
            });
        }

        let mut payload = vec![0u8; npay as usize];
        cursor
            .read_exact(&mut payload)
            .map_err(|_| HuffmanError::CorruptStream {
                detail: "payload truncated".into(),
            })?;

        if cursor.position() != (data.len() - 4) as u64 {
            return Err(HuffmanError::CorruptStream {
                detail: "trailing bytes after payload".into(),
            });
        }

        Ok(Self {
            table,
            bit_len,
            payload,
        })
    }
}

/// True if `a` equals `b` or is a prefix of it; either way a greedy decode
/// could never reach `b`.
fn is_prefix(a: Code, b: Code) -> bool {
    a.len <= b.len && (b.bits >> (b.len - a.len)) == a.bits
}

fn read_u8(cursor: &mut Cursor<&[u8]>) -> Result<u8> {
    let mut buf = [0u8; 1];
    read_into(cursor, &mut buf)?;
    Ok(buf[0])
}

fn read_u16(cursor: &mut Cursor<&[u8]>) -> Result<u16> {
    let mut buf = [0u8; 2];
    read_into(cursor, &mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_u64(cursor: &mut Cursor<&[u8]>) -> Result<u64> {
    let mut buf = [0u8; 8];
    read_into(cursor, &mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_into(cursor: &mut Cursor<&[u8]>, buf: &mut [u8]) -> Result<()> {
    cursor
        .read_exact(buf)
        .map_err(|_| HuffmanError::CorruptStream {
            detail: "container header truncated".into(),
        })
}
