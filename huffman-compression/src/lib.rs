//! Lossless compression of arbitrary bytes with Huffman coding.
//!
//! ```
//! let compressed = huffman_compression::compress(b"aaabbc")?;
//! assert_eq!(huffman_compression::decompress(&compressed)?, b"aaabbc");
//! # Ok::<(), huffman_compression::CodecError>(())
//! ```

pub mod artifact;
pub mod bit_packing;
pub mod encode_decode;
pub mod error;
pub mod frequency;
pub mod prefix_code_table;
pub mod tree;

pub use encode_decode::{compress, compress_file, decompress, decompress_file};
pub use error::CodecError;
