use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HuffmanError>;

/// Errors raised by the codec.
///
/// Every error is returned to the immediate caller; the codec never retries
/// or recovers silently.
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// The input sequence has zero symbols, so no tree can be built.
    #[error("input is empty; nothing to compress")]
    EmptyInput,

    /// The code tree is malformed (dangling child key, impossible depth).
    #[error("malformed code tree: {detail}")]
    InvalidTree {
        /// Description of the structural problem
        detail: String,
    },

    /// A symbol to encode has no entry in the code table.
    #[error("symbol {symbol:#04x} has no code table entry")]
    UnknownSymbol {
        /// The symbol that was missing from the table
        symbol: u8,
    },

    /// The bit stream ended mid-code or its metadata disagrees with the payload.
    #[error("corrupt bit stream: {detail}")]
    CorruptStream {
        /// Description of the inconsistency
        detail: String,
    },

    /// The container header was not recognized.
    #[error("unrecognized container format (magic {found:02x?})")]
    FormatVersion {
        /// The magic bytes actually found
        found: [u8; 4],
    },
}
