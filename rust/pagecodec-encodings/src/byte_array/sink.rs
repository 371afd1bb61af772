//! Output sinks and the decode contract shared by all byte-array decoders.

use pagecodec_common::{Result, error::contract_violation};

/// Dynamically typed value slot.
///
/// Byte-array decoders only ever produce [`DynValue::Binary`]; the other
/// variants exist so that a single slot buffer can be shared with decoders
/// of other physical types.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DynValue {
    #[default]
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(f64),
    Binary(Vec<u8>),
}

impl DynValue {
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            DynValue::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// Caller-supplied output container for a decode call.
///
/// Slots are filled in order starting at index 0. The number of slots bounds
/// the number of values a single call may produce.
pub enum Sink<'s> {
    /// Owned byte-array slots, filled directly.
    Binary(&'s mut [Vec<u8>]),
    /// Polymorphic slots, each filled with [`DynValue::Binary`].
    Dynamic(&'s mut [DynValue]),
    /// UTF-8 string slots. Not supported by byte-array decoders: passing this
    /// sink is a contract violation and panics.
    Utf8(&'s mut [String]),
}

impl Sink<'_> {
    pub fn len(&self) -> usize {
        match self {
            Sink::Binary(slots) => slots.len(),
            Sink::Dynamic(slots) => slots.len(),
            Sink::Utf8(slots) => slots.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of a decode call: the number of slots written and the status.
///
/// # Partial success
///
/// Unlike a plain `Result`, a failed status does not imply that nothing was
/// written. A PLAIN decoder that hits a truncated value after producing `k`
/// values reports `count == k` together with the error, and the first `k`
/// slots of the sink hold valid values. Callers that want to salvage
/// partially decoded pages must look at `count` before looking at `result`;
/// callers that do not can use [`DecodeOutcome::into_result`].
#[must_use]
#[derive(Debug)]
pub struct DecodeOutcome {
    pub count: usize,
    pub result: Result<()>,
}

impl DecodeOutcome {
    pub fn ok(count: usize) -> Self {
        Self {
            count,
            result: Ok(()),
        }
    }

    pub fn err(count: usize, error: pagecodec_common::error::Error) -> Self {
        Self {
            count,
            result: Err(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Discards partially decoded output on failure.
    pub fn into_result(self) -> Result<usize> {
        self.result.map(|_| self.count)
    }
}

/// Decode entry point common to PLAIN and DICTIONARY byte-array decoders.
///
/// Implementors provide the typed path that fills owned byte-array slots;
/// [`decode`](BinaryValuesDecoder::decode) routes every supported [`Sink`]
/// shape onto it.
pub trait BinaryValuesDecoder {
    /// Decodes up to `out.len()` values into `out`, starting at slot 0.
    ///
    /// Never reports a count larger than `out.len()`.
    fn decode_binary(&mut self, out: &mut [Vec<u8>]) -> DecodeOutcome;

    /// Decodes values into the given sink.
    ///
    /// # Zero-value outcomes
    ///
    /// A call that produces no value reports the failure that stopped it, so
    /// a page whose first value is truncated yields `(0, TruncatedValue)`.
    /// `ExhaustedInput` is reported only when nothing was left to decode or
    /// the sink is empty. This differs from readers that report
    /// `ExhaustedInput` for every zero-value call regardless of cause; use
    /// [`Error::is_end_of_data`](pagecodec_common::error::Error::is_end_of_data)
    /// to tell the two apart.
    ///
    /// # Panics
    ///
    /// Panics when called with [`Sink::Utf8`], which byte-array decoders do not
    /// support. Data errors never panic; they are reported in the outcome.
    fn decode(&mut self, sink: Sink<'_>) -> DecodeOutcome {
        match sink {
            Sink::Binary(slots) => self.decode_binary(slots),
            Sink::Dynamic(slots) => decode_dynamic(self, slots),
            Sink::Utf8(_) => {
                contract_violation("byte-array decoders do not support string sinks")
            }
        }
    }
}

fn decode_dynamic<D>(decoder: &mut D, slots: &mut [DynValue]) -> DecodeOutcome
where
    D: BinaryValuesDecoder + ?Sized,
{
    let mut values = vec![Vec::new(); slots.len()];
    let outcome = decoder.decode_binary(&mut values);
    for (slot, value) in slots
        .iter_mut()
        .zip(values.into_iter())
        .take(outcome.count)
    {
        *slot = DynValue::Binary(value);
    }
    outcome
}
