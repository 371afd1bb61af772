/// Binds a decoder to one encoded page.
///
/// A decoder instance is reused across the pages of a column chunk: every
/// call to `init` discards the previous page and starts over at its first
/// value.
pub trait PageDecoder<'a> {
    /// Attaches the decoder to `data`, which holds `count` encoded values.
    ///
    /// `count` is informational: decoders do not require the page to contain
    /// exactly `count` values and report malformed pages while decoding.
    fn init(&mut self, data: &'a [u8], count: usize) -> pagecodec_common::Result<()>;
}
