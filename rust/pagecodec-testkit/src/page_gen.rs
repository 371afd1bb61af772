//! Encoded page generation for tests.
//!
//! The generators here write the same layouts the decoders read, so that
//! tests can build pages from values instead of spelling out bytes.

/// Encodes `values` as a length-prefixed PLAIN page.
pub fn plain_page<V: AsRef<[u8]>>(values: &[V]) -> Vec<u8> {
    let mut page = Vec::new();
    for value in values {
        let value = value.as_ref();
        let len = u32::try_from(value.len()).expect("value length fits u32");
        page.extend_from_slice(&len.to_le_bytes());
        page.extend_from_slice(value);
    }
    page
}

/// Encodes `values` as a fixed-width PLAIN page. All values must have the
/// same length.
pub fn fixed_plain_page<V: AsRef<[u8]>>(values: &[V]) -> Vec<u8> {
    let mut page = Vec::new();
    for value in values {
        let value = value.as_ref();
        if let Some(first) = values.first() {
            assert_eq!(value.len(), first.as_ref().len(), "fixed width mismatch");
        }
        page.extend_from_slice(value);
    }
    page
}

/// Minimum bit width able to represent indices into a dictionary of
/// `cardinality` values.
pub fn bit_width_for(cardinality: usize) -> u8 {
    let max_index = cardinality.saturating_sub(1) as u64;
    (u64::BITS - max_index.leading_zeros()) as u8
}

/// Encodes dictionary indices as a hybrid RLE data page: a bit-width byte
/// followed by runs. Runs of at least 8 equal indices are written as
/// repeated runs, everything else as bit-packed groups of 8.
pub fn dictionary_index_page(indices: &[u32], bit_width: u8) -> Vec<u8> {
    assert!(bit_width <= 32);
    let mut page = vec![bit_width];
    let mut pos = 0;
    while pos < indices.len() {
        let run = run_length(indices, pos);
        if run >= 8 {
            write_uleb128(&mut page, (run as u64) << 1);
            let value_bytes = usize::from(bit_width).div_ceil(8);
            page.extend_from_slice(&indices[pos].to_le_bytes()[..value_bytes]);
            pos += run;
            continue;
        }

        let start = pos;
        loop {
            pos = (pos + 8).min(indices.len());
            if pos == indices.len() || run_length(indices, pos) >= 8 {
                break;
            }
        }
        write_bit_packed(&mut page, &indices[start..pos], bit_width);
    }
    page
}

/// Random byte-array values of length `0..=max_len`.
pub fn random_values(count: usize, max_len: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|_| {
            let len = fastrand::usize(0..=max_len);
            (0..len).map(|_| fastrand::u8(..)).collect()
        })
        .collect()
}

/// Random values of exactly `len` bytes.
pub fn random_fixed_values(count: usize, len: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|_| (0..len).map(|_| fastrand::u8(..)).collect())
        .collect()
}

/// Random indices into a dictionary of `cardinality` values, with runs of
/// repeated indices mixed in.
pub fn random_indices(count: usize, cardinality: usize) -> Vec<u32> {
    assert_ne!(cardinality, 0);
    let mut indices = Vec::with_capacity(count);
    while indices.len() < count {
        let index = fastrand::u32(0..cardinality as u32);
        let repeat = if fastrand::bool() {
            fastrand::usize(1..32)
        } else {
            1
        };
        let repeat = repeat.min(count - indices.len());
        indices.extend(std::iter::repeat_n(index, repeat));
    }
    indices
}

fn run_length(indices: &[u32], pos: usize) -> usize {
    indices[pos..]
        .iter()
        .take_while(|&&index| index == indices[pos])
        .count()
}

fn write_uleb128(page: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            page.push(byte);
            return;
        }
        page.push(byte | 0x80);
    }
}

fn write_bit_packed(page: &mut Vec<u8>, values: &[u32], bit_width: u8) {
    let groups = values.len().div_ceil(8);
    write_uleb128(page, ((groups as u64) << 1) | 1);

    let bit_width = usize::from(bit_width);
    let start = page.len();
    page.resize(start + groups * bit_width, 0);
    let packed = &mut page[start..];
    for (i, &value) in values.iter().enumerate() {
        for bit in 0..bit_width {
            if (value >> bit) & 1 == 1 {
                let pos = i * bit_width + bit;
                packed[pos / 8] |= 1 << (pos % 8);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{bit_width_for, dictionary_index_page, plain_page};

    #[test]
    fn test_plain_page_layout() {
        let page = plain_page(&["abc", "xy"]);
        assert_eq!(page, b"\x03\x00\x00\x00abc\x02\x00\x00\x00xy");
    }

    #[test]
    fn test_bit_width_for() {
        assert_eq!(bit_width_for(0), 0);
        assert_eq!(bit_width_for(1), 0);
        assert_eq!(bit_width_for(2), 1);
        assert_eq!(bit_width_for(3), 2);
        assert_eq!(bit_width_for(256), 8);
        assert_eq!(bit_width_for(257), 9);
    }

    #[test]
    fn test_index_page_layout() {
        assert_eq!(dictionary_index_page(&[1; 10], 2), vec![2, 10 << 1, 1]);
        assert_eq!(
            dictionary_index_page(&[1, 1, 0, 2], 2),
            vec![2, (1 << 1) | 1, 0b1000_0101, 0]
        );
    }
}
