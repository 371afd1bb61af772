//! Decoders of dictionary index streams.

mod hybrid_rle;

pub use hybrid_rle::HybridRleKeyDecoder;

/// Source of dictionary indices for a DICTIONARY encoded data page.
///
/// The dictionary decoder holds exclusive access to one key decoder per data
/// page and never retries a failed call.
pub trait KeyDecoder {
    /// Returns up to `count` indices, in stream order.
    ///
    /// Returns an error if the stream is malformed, or if `count > 0` and the
    /// stream has no indices left. A returned batch is never longer than
    /// `count`.
    fn decode_keys(&mut self, count: usize) -> pagecodec_common::Result<Vec<u32>>;
}
