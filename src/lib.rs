//! # huffc_rs - Huffman Prefix-Code Compression
//!
//! A self-contained, fixed-alphabet Huffman codec over a single in-memory
//! byte sequence: frequency counting, greedy tree construction, prefix-code
//! derivation, MSB-first bit packing, and a self-describing container.
//!
//! The compressed container carries its own code table, so decompression
//! needs nothing beyond the container itself.
//!
//! ## Example
//!
//! ```
//! let input = b"abracadabra abracadabra";
//!
//! let container = huffc_rs::compress(input)?;
//! let bytes = container.to_bytes();
//!
//! // Later, from the bytes alone:
//! let parsed = huffc_rs::Container::from_bytes(&bytes)?;
//! let restored = huffc_rs::decompress(&parsed)?;
//! assert_eq!(restored, input);
//! # Ok::<(), huffc_rs::HuffmanError>(())
//! ```
//!
//! ## Guarantees
//!
//! - Lossless round-trip for any non-empty input
//! - Deterministic: equal inputs yield byte-identical containers
//! - Prefix property: no code is a prefix of another, so greedy decode is
//!   unambiguous

mod bits;
mod code;
mod codec;
mod container;
mod error;
mod freq;
mod tree;

pub mod render;


pub use code::{Code, CodeTable};
pub use codec::{compress, compress_with_stats, compress_with_tree, decompress, CompressionStats};
pub use container::Container;
pub use error::{HuffmanError, Result};
pub use freq::FrequencyTable;
pub use tree::{Node, Tree};
