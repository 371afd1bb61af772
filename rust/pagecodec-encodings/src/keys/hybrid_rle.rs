use super::KeyDecoder;
use crate::page_decoder::PageDecoder;
use pagecodec_common::{Result, error::Error, verify_data};

const MAX_BIT_WIDTH: u8 = 32;
/// A run header never needs more than 5 ULEB128 bytes for 32-bit run lengths.
const MAX_HEADER_BYTES: usize = 5;

#[derive(Debug, Clone, Copy)]
enum Run {
    Empty,
    Repeated { value: u32, remaining: usize },
    BitPacked { bit_offset: usize, remaining: usize },
}

/// Decoder for the bit-packed/run-length hybrid index stream of dictionary
/// data pages.
///
/// Page layout: one byte holding the bit width, followed by runs. Each run
/// starts with a ULEB128 header. When the low bit is set, the run holds
/// `(header >> 1) * 8` bit-packed values (LSB first); otherwise the run
/// repeats a single value, stored in `ceil(bit_width / 8)` little-endian
/// bytes, `header >> 1` times.
///
/// The decoder never yields more indices than the value count given to
/// `init`, so padding in the last bit-packed group is ignored.
#[derive(Debug, Clone)]
pub struct HybridRleKeyDecoder<'a> {
    data: &'a [u8],
    pos: usize,
    bit_width: u8,
    remaining: usize,
    run: Run,
}

impl HybridRleKeyDecoder<'_> {
    pub fn new() -> Self {
        Self {
            data: &[],
            pos: 0,
            bit_width: 0,
            remaining: 0,
            run: Run::Empty,
        }
    }

    pub fn bit_width(&self) -> u8 {
        self.bit_width
    }

    /// Number of indices not yet returned.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn read_run_header(&mut self) -> Result<usize> {
        let mut header = 0u64;
        for i in 0..MAX_HEADER_BYTES {
            let Some(&byte) = self.data.get(self.pos) else {
                return Err(Error::index_stream(format!(
                    "truncated run header at offset {}",
                    self.pos
                )));
            };
            self.pos += 1;
            header |= u64::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return usize::try_from(header)
                    .map_err(|_| Error::index_stream(format!("run header {header} overflow")));
            }
        }
        Err(Error::index_stream(format!(
            "run header at offset {} exceeds {MAX_HEADER_BYTES} bytes",
            self.pos - MAX_HEADER_BYTES
        )))
    }

    /// Loads the next run. At most `limit` of its values will be consumed.
    fn next_run(&mut self, limit: usize) -> Result<()> {
        let header_offset = self.pos;
        let header = self.read_run_header()?;
        let length = header >> 1;
        if length == 0 {
            return Err(Error::index_stream(format!(
                "empty run at offset {header_offset}"
            )));
        }

        let bit_width = usize::from(self.bit_width);
        let available = self.data.len() - self.pos;
        if header & 1 == 1 {
            let run_values = length
                .checked_mul(8)
                .ok_or_else(|| Error::index_stream("bit-packed run length overflow"))?;
            let run_bytes = length
                .checked_mul(bit_width)
                .ok_or_else(|| Error::index_stream("bit-packed run length overflow"))?;
            let used = run_values.min(limit);
            let needed = used
                .checked_mul(bit_width)
                .ok_or_else(|| Error::index_stream("bit-packed run length overflow"))?
                .div_ceil(8);
            if needed > available {
                return Err(Error::index_stream(format!(
                    "truncated bit-packed run at offset {header_offset}: \
                     {needed} bytes needed, {available} available"
                )));
            }
            self.run = Run::BitPacked {
                bit_offset: self.pos * 8,
                remaining: used,
            };
            self.pos += run_bytes.min(available);
        } else {
            let value_bytes = bit_width.div_ceil(8);
            if value_bytes > available {
                return Err(Error::index_stream(format!(
                    "truncated run value at offset {}",
                    self.pos
                )));
            }
            let mut buf = [0u8; 4];
            buf[..value_bytes].copy_from_slice(&self.data[self.pos..self.pos + value_bytes]);
            self.pos += value_bytes;
            self.run = Run::Repeated {
                value: u32::from_le_bytes(buf),
                remaining: length,
            };
        }
        Ok(())
    }
}

impl Default for HybridRleKeyDecoder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> PageDecoder<'a> for HybridRleKeyDecoder<'a> {
    fn init(&mut self, data: &'a [u8], count: usize) -> Result<()> {
        let Some((&bit_width, runs)) = data.split_first() else {
            return Err(Error::index_stream("missing bit width"));
        };
        verify_data!(bit_width, bit_width <= MAX_BIT_WIDTH);
        log::trace!(
            "dictionary index page: {} bytes, {count} values, bit width {bit_width}",
            data.len()
        );
        self.data = runs;
        self.pos = 0;
        self.bit_width = bit_width;
        self.remaining = count;
        self.run = Run::Empty;
        Ok(())
    }
}

impl KeyDecoder for HybridRleKeyDecoder<'_> {
    fn decode_keys(&mut self, count: usize) -> Result<Vec<u32>> {
        let wanted = count.min(self.remaining);
        if count > 0 && wanted == 0 {
            return Err(Error::index_stream("no more dictionary indices"));
        }

        let mut keys = Vec::with_capacity(wanted);
        while keys.len() < wanted {
            match &mut self.run {
                Run::Empty => self.next_run(self.remaining - keys.len())?,
                Run::Repeated { value, remaining } => {
                    let n = (*remaining).min(wanted - keys.len());
                    keys.extend(std::iter::repeat_n(*value, n));
                    *remaining -= n;
                    if *remaining == 0 {
                        self.run = Run::Empty;
                    }
                }
                Run::BitPacked {
                    bit_offset,
                    remaining,
                } => {
                    let n = (*remaining).min(wanted - keys.len());
                    let bit_width = usize::from(self.bit_width);
                    for _ in 0..n {
                        keys.push(unpack(self.data, *bit_offset, self.bit_width));
                        *bit_offset += bit_width;
                    }
                    *remaining -= n;
                    if *remaining == 0 {
                        self.run = Run::Empty;
                    }
                }
            }
        }
        self.remaining -= keys.len();
        Ok(keys)
    }
}

/// Reads the `bit_width`-bit value starting at `bit_offset`, LSB first.
#[inline]
fn unpack(data: &[u8], bit_offset: usize, bit_width: u8) -> u32 {
    if bit_width == 0 {
        return 0;
    }
    let src = data.get(bit_offset / 8..).unwrap_or_default();
    let len = src.len().min(8);
    let mut window = [0u8; 8];
    window[..len].copy_from_slice(&src[..len]);
    let word = u64::from_le_bytes(window) >> (bit_offset % 8);
    (word & ((1u64 << bit_width) - 1)) as u32
}
