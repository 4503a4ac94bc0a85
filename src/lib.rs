//! # huffpack
//!
//! Lossless compression of a byte stream with a static Huffman code built
//! for each file.
//!
//! ```no_run
//! huffpack::encode("input.txt", "encoded.bin")?;
//! huffpack::decode("encoded.bin", "decoded.txt")?;
//! # Ok::<(), huffpack::Error>(())
//! ```
//!
//! The encoded file carries its own code table, the number of padding bits
//! and the original length; see [`format`] for the layout.

pub mod code;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod format;
pub mod frequency;
pub mod pack;
pub mod tree;

mod file;

pub use code::{Code, CodeTable, ReverseCodeTable};
pub use decoder::{decode, decode_bytes};
pub use encoder::{code_table, encode, encode_bytes, encode_into};
pub use error::{At, Corruption, Error};
pub use frequency::FrequencyTable;
pub use tree::Tree;
