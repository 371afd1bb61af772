//! Decoder for DICTIONARY encoded byte-array pages.

use super::{
    plain::{LENGTH_PREFIX_SIZE, PlainBinaryDecoder},
    sink::{BinaryValuesDecoder, DecodeOutcome},
};
use crate::{keys::KeyDecoder, page_decoder::PageDecoder};
use pagecodec_common::{Result, error::Error};

/// Maps a stream of dictionary indices onto a materialized table of values.
///
/// The decoder goes through two phases: [`init_values`](Self::init_values)
/// materializes the dictionary page of the column chunk, after which every
/// data page is attached with [`PageDecoder::init`] and decoded with
/// [`BinaryValuesDecoder::decode`].
///
/// Decoding is all-or-nothing per call: if the index stream fails, or any
/// index in the requested batch falls outside the dictionary, no value is
/// reported.
#[derive(Debug, Clone)]
pub struct DictionaryBinaryDecoder<K> {
    fixed_length: Option<usize>,
    values: Option<Vec<Vec<u8>>>,
    keys: K,
}

impl<K> DictionaryBinaryDecoder<K> {
    /// Creates a decoder whose dictionary pages hold length-prefixed values.
    pub fn new(keys: K) -> Self {
        Self::with_fixed_length(keys, None)
    }

    /// Creates a decoder whose dictionary pages hold values of
    /// `fixed_length` bytes each. `None` and `Some(0)` select
    /// length-prefixed values.
    pub fn with_fixed_length(keys: K, fixed_length: Option<usize>) -> Self {
        Self {
            fixed_length: fixed_length.filter(|&len| len != 0),
            values: None,
            keys,
        }
    }

    /// Materializes the dictionary from a PLAIN encoded dictionary page
    /// holding `cardinality` values.
    ///
    /// Replaces any previously loaded dictionary. On failure the decoder is
    /// left without a dictionary.
    pub fn init_values(&mut self, data: &[u8], cardinality: usize) -> Result<()> {
        self.values = None;

        let mut plain = PlainBinaryDecoder::with_fixed_length(self.fixed_length);
        plain.init(data, cardinality)?;

        // Every entry takes at least this many page bytes, which bounds the
        // preallocation for a bogus cardinality.
        let min_entry_size = self.fixed_length.unwrap_or(LENGTH_PREFIX_SIZE);
        let mut values = Vec::with_capacity(cardinality.min(data.len() / min_entry_size));
        for _ in 0..cardinality {
            values.push(plain.next_value()?);
        }

        if plain.remaining() != 0 {
            log::debug!(
                "dictionary page has {} trailing bytes after {cardinality} values",
                plain.remaining()
            );
        }
        log::debug!(
            "materialized dictionary: {cardinality} values from {} bytes",
            data.len()
        );
        self.values = Some(values);
        Ok(())
    }

    /// The materialized dictionary, if [`init_values`](Self::init_values)
    /// has succeeded.
    pub fn dictionary(&self) -> Option<&[Vec<u8>]> {
        self.values.as_deref()
    }

    pub fn cardinality(&self) -> usize {
        self.values.as_ref().map_or(0, Vec::len)
    }

    pub fn key_decoder(&self) -> &K {
        &self.keys
    }
}

impl<'a, K> PageDecoder<'a> for DictionaryBinaryDecoder<K>
where
    K: PageDecoder<'a>,
{
    fn init(&mut self, data: &'a [u8], count: usize) -> Result<()> {
        self.keys.init(data, count)
    }
}

impl<K> BinaryValuesDecoder for DictionaryBinaryDecoder<K>
where
    K: KeyDecoder,
{
    fn decode_binary(&mut self, out: &mut [Vec<u8>]) -> DecodeOutcome {
        let Some(values) = self.values.as_deref() else {
            return DecodeOutcome::err(0, Error::invalid_operation("decode before init_values"));
        };

        let keys = match self.keys.decode_keys(out.len()) {
            Ok(keys) => keys,
            Err(err) => return DecodeOutcome::err(0, err),
        };
        if keys.len() > out.len() {
            return DecodeOutcome::err(
                0,
                Error::index_stream(format!(
                    "{} indices returned for a batch of {}",
                    keys.len(),
                    out.len()
                )),
            );
        }

        if let Some((position, &index)) = keys
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= values.len())
        {
            log::debug!("dictionary index {index} out of range at position {position}");
            return DecodeOutcome::err(
                0,
                Error::invalid_dictionary_index(index, position, values.len()),
            );
        }

        for (slot, &index) in out.iter_mut().zip(keys.iter()) {
            *slot = values[index as usize].clone();
        }
        DecodeOutcome::ok(keys.len())
    }
}
