//! Page decoders for the byte-array physical type.
//!
//! A page reader picks an [`encoding::Encoding`] from the page header, builds a
//! [`byte_array::ByteArrayDecoder`] for it and then drives every page through
//! the same `init`/`decode` calls, regardless of the encoding.

pub mod byte_array;
pub mod config;
pub mod encoding;
pub mod keys;
pub mod page_decoder;
