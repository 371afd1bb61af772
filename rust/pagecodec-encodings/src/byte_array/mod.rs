//! Byte-array page decoders and the encoding-agnostic decoder front.

pub mod dictionary;
pub mod plain;
pub mod sink;

use crate::{
    config::ByteArrayDecoderConfig, encoding::Encoding, keys::HybridRleKeyDecoder,
    page_decoder::PageDecoder,
};
use dictionary::DictionaryBinaryDecoder;
use pagecodec_common::{Result, error::Error};
use plain::PlainBinaryDecoder;
use sink::{BinaryValuesDecoder, DecodeOutcome};

pub use sink::{DynValue, Sink};

/// Decoder for one byte-array column chunk, chosen by page encoding.
///
/// Calling code drives every variant the same way: optionally
/// [`init_values`](Self::init_values) with the dictionary page, then
/// [`PageDecoder::init`] and [`BinaryValuesDecoder::decode`] for each data
/// page.
#[derive(Debug, Clone)]
pub enum ByteArrayDecoder<'a> {
    Plain(PlainBinaryDecoder<'a>),
    Dictionary(DictionaryBinaryDecoder<HybridRleKeyDecoder<'a>>),
}

impl ByteArrayDecoder<'_> {
    pub fn new(encoding: Encoding, config: &ByteArrayDecoderConfig) -> Self {
        if encoding.is_dictionary() {
            ByteArrayDecoder::Dictionary(DictionaryBinaryDecoder::with_fixed_length(
                HybridRleKeyDecoder::new(),
                config.dictionary_value_length(),
            ))
        } else {
            ByteArrayDecoder::Plain(PlainBinaryDecoder::with_fixed_length(
                config.value_length(),
            ))
        }
    }

    /// Builds a decoder from the encoding code of a page header, after
    /// validating `config`.
    pub fn from_code(code: i32, config: &ByteArrayDecoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(Encoding::try_from(code)?, config))
    }

    /// Materializes the dictionary of a DICTIONARY encoded column chunk.
    pub fn init_values(&mut self, data: &[u8], cardinality: usize) -> Result<()> {
        match self {
            ByteArrayDecoder::Plain(_) => Err(Error::invalid_operation(
                "init_values on a PLAIN byte-array decoder",
            )),
            ByteArrayDecoder::Dictionary(decoder) => decoder.init_values(data, cardinality),
        }
    }

    pub fn is_dictionary(&self) -> bool {
        matches!(self, ByteArrayDecoder::Dictionary(_))
    }
}

impl<'a> PageDecoder<'a> for ByteArrayDecoder<'a> {
    fn init(&mut self, data: &'a [u8], count: usize) -> Result<()> {
        match self {
            ByteArrayDecoder::Plain(decoder) => decoder.init(data, count),
            ByteArrayDecoder::Dictionary(decoder) => decoder.init(data, count),
        }
    }
}

impl BinaryValuesDecoder for ByteArrayDecoder<'_> {
    fn decode_binary(&mut self, out: &mut [Vec<u8>]) -> DecodeOutcome {
        match self {
            ByteArrayDecoder::Plain(decoder) => decoder.decode_binary(out),
            ByteArrayDecoder::Dictionary(decoder) => decoder.decode_binary(out),
        }
    }
}
