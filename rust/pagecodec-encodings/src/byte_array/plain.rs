//! Decoder for PLAIN encoded byte-array pages.
//!
//! Variable-length values are laid out as `[u32 LE length][bytes]` repeated.
//! Fixed-length values are laid out back to back without any prefix.

use super::sink::{BinaryValuesDecoder, DecodeOutcome};
use crate::page_decoder::PageDecoder;
use byteorder::{ByteOrder, LittleEndian};
use pagecodec_common::{Result, error::Error};

pub(crate) const LENGTH_PREFIX_SIZE: usize = std::mem::size_of::<u32>();

/// Cursor over a PLAIN encoded page.
///
/// Every value returned by the decoder is a fresh allocation, so the page
/// buffer may be released as soon as a decode call returns. Handing out
/// views into the page instead would save a copy per value, at the price of
/// tying decoded values to the page lifetime.
#[derive(Debug, Clone)]
pub struct PlainBinaryDecoder<'a> {
    fixed_length: Option<usize>,
    data: &'a [u8],
    pos: usize,
}

impl<'a> PlainBinaryDecoder<'a> {
    /// Creates a decoder for length-prefixed values.
    pub fn new() -> Self {
        Self::with_fixed_length(None)
    }

    /// Creates a decoder for values of `fixed_length` bytes each.
    /// `None` and `Some(0)` both select length-prefixed framing.
    pub fn with_fixed_length(fixed_length: Option<usize>) -> Self {
        Self {
            fixed_length: fixed_length.filter(|&len| len != 0),
            data: &[],
            pos: 0,
        }
    }

    pub fn fixed_length(&self) -> Option<usize> {
        self.fixed_length
    }

    /// Number of page bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Decodes the next value.
    ///
    /// On failure the cursor is left where it was.
    pub fn next_value(&mut self) -> Result<Vec<u8>> {
        let remaining = self.remaining();
        if remaining == 0 {
            return Err(Error::exhausted_input(self.pos, self.data.len()));
        }

        let (prefix_size, size) = match self.fixed_length {
            Some(len) => (0, len),
            None => {
                if remaining < LENGTH_PREFIX_SIZE {
                    return Err(Error::exhausted_input(self.pos, self.data.len()));
                }
                let len = LittleEndian::read_u32(&self.data[self.pos..]);
                // A length that does not fit the host can never fit the page.
                let size = usize::try_from(len).map_err(|_| {
                    Error::truncated_value(
                        self.pos + LENGTH_PREFIX_SIZE,
                        usize::MAX,
                        remaining - LENGTH_PREFIX_SIZE,
                    )
                })?;
                (LENGTH_PREFIX_SIZE, size)
            }
        };

        let start = self.pos + prefix_size;
        let available = remaining - prefix_size;
        if size > available {
            return Err(Error::truncated_value(start, size, available));
        }

        let value = self.data[start..start + size].to_vec();
        self.pos = start + size;
        Ok(value)
    }
}

impl Default for PlainBinaryDecoder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> PageDecoder<'a> for PlainBinaryDecoder<'a> {
    /// The value count is not checked against the page size.
    fn init(&mut self, data: &'a [u8], count: usize) -> Result<()> {
        log::trace!(
            "plain page: {} bytes, {count} values, fixed length {:?}",
            data.len(),
            self.fixed_length
        );
        self.data = data;
        self.pos = 0;
        Ok(())
    }
}

impl BinaryValuesDecoder for PlainBinaryDecoder<'_> {
    /// Decodes values until `out` is full, the page ends, or a value fails
    /// to decode.
    ///
    /// When a value fails after `k > 0` values were produced, the outcome
    /// carries `count == k` and the failure. When nothing was produced, the
    /// outcome carries `count == 0` and either the failure of the first value
    /// or `ExhaustedInput` if there was nothing left to try.
    fn decode_binary(&mut self, out: &mut [Vec<u8>]) -> DecodeOutcome {
        let mut count = 0;
        while count < out.len() && self.pos < self.data.len() {
            match self.next_value() {
                Ok(value) => {
                    out[count] = value;
                    count += 1;
                }
                Err(err) => {
                    log::debug!("plain page decode stopped after {count} values: {err}");
                    return DecodeOutcome::err(count, err);
                }
            }
        }
        if count == 0 {
            return DecodeOutcome::err(0, Error::exhausted_input(self.pos, self.data.len()));
        }
        DecodeOutcome::ok(count)
    }
}

impl Iterator for PlainBinaryDecoder<'_> {
    type Item = Result<Vec<u8>>;

    /// Yields values until the page ends. A decode failure is yielded once,
    /// after which the iterator is fused.
    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.data.len() {
            return None;
        }
        match self.next_value() {
            Ok(value) => Some(Ok(value)),
            Err(err) => {
                self.pos = self.data.len();
                Some(Err(err))
            }
        }
    }
}
