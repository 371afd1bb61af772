use pagecodec_common::error::ErrorKind;
use pagecodec_encodings::{
    byte_array::{
        ByteArrayDecoder, DynValue, Sink, dictionary::DictionaryBinaryDecoder,
        plain::PlainBinaryDecoder, sink::BinaryValuesDecoder,
    },
    config::ByteArrayDecoderConfig,
    encoding::Encoding,
    keys::HybridRleKeyDecoder,
    page_decoder::PageDecoder,
};
use pagecodec_testkit::page_gen;

fn decode_all<D: BinaryValuesDecoder>(decoder: &mut D, batch_size: usize) -> Vec<Vec<u8>> {
    let mut decoded = Vec::new();
    let mut batch = vec![Vec::new(); batch_size];
    loop {
        let outcome = decoder.decode(Sink::Binary(&mut batch));
        assert!(outcome.count <= batch_size);
        decoded.extend(batch.iter_mut().take(outcome.count).map(std::mem::take));
        match outcome.result {
            Ok(()) => {}
            Err(err) if err.is_end_of_data() => return decoded,
            Err(err) => panic!("unexpected decode failure: {err}"),
        }
    }
}

#[test]
fn test_plain_round_trip() {
    for _ in 0..20 {
        let count = fastrand::usize(0..500);
        let values = page_gen::random_values(count, 64);
        let page = page_gen::plain_page(&values);

        let mut decoder = PlainBinaryDecoder::new();
        decoder.init(&page, count).unwrap();
        let decoded = decode_all(&mut decoder, fastrand::usize(1..64));
        assert_eq!(decoded, values);
        assert_eq!(page_gen::plain_page(&decoded), page);
    }
}

#[test]
fn test_plain_declared_count_fills_sink() {
    let values = page_gen::random_values(100, 16);
    let page = page_gen::plain_page(&values);
    let mut decoder = PlainBinaryDecoder::new();
    decoder.init(&page, values.len()).unwrap();

    let mut out = vec![Vec::new(); values.len()];
    let outcome = decoder.decode(Sink::Binary(&mut out));
    assert_eq!(outcome.count, values.len());
    assert!(outcome.is_ok());
    assert_eq!(out, values);
}

#[test]
fn test_fixed_length_values_have_fixed_width() {
    let width = fastrand::usize(1..20);
    let values = page_gen::random_fixed_values(300, width);
    let page = page_gen::fixed_plain_page(&values);

    let mut decoder = PlainBinaryDecoder::with_fixed_length(Some(width));
    decoder.init(&page, values.len()).unwrap();
    let mut count = 0;
    for value in decoder.by_ref() {
        assert_eq!(value.unwrap().len(), width);
        count += 1;
    }
    assert_eq!(count, values.len());
    assert_eq!(decoder.remaining(), 0);
}

#[test]
fn test_truncated_page_reports_decoded_prefix() {
    let mut values = page_gen::random_values(50, 32);
    let k = fastrand::usize(0..values.len());
    if values[k].is_empty() {
        values[k].push(fastrand::u8(..));
    }
    let page = page_gen::plain_page(&values);

    // Cut the page in the middle of value `k`, after its length prefix.
    let value_start: usize = values[..k].iter().map(|v| v.len() + 4).sum::<usize>() + 4;
    let cut = value_start + fastrand::usize(0..values[k].len());

    let mut decoder = PlainBinaryDecoder::new();
    decoder.init(&page[..cut], values.len()).unwrap();
    let mut out = vec![Vec::new(); values.len()];
    let outcome = decoder.decode(Sink::Binary(&mut out));
    assert_eq!(outcome.count, k);
    assert!(matches!(
        outcome.result.unwrap_err().kind(),
        ErrorKind::TruncatedValue { .. }
    ));
    assert_eq!(&out[..k], &values[..k]);
}

#[test]
fn test_dictionary_round_trip() {
    let dictionary = page_gen::random_values(fastrand::usize(1..300), 24);
    let indices = page_gen::random_indices(2000, dictionary.len());
    let expected = indices
        .iter()
        .map(|&i| dictionary[i as usize].clone())
        .collect::<Vec<_>>();

    let dict_page = page_gen::plain_page(&dictionary);
    let data_page =
        page_gen::dictionary_index_page(&indices, page_gen::bit_width_for(dictionary.len()));

    let mut decoder = DictionaryBinaryDecoder::new(HybridRleKeyDecoder::new());
    decoder.init_values(&dict_page, dictionary.len()).unwrap();
    decoder.init(&data_page, indices.len()).unwrap();

    let mut decoded = Vec::new();
    let mut batch = vec![Vec::new(); 128];
    while decoded.len() < indices.len() {
        let outcome = decoder.decode(Sink::Binary(&mut batch));
        outcome.result.as_ref().unwrap();
        decoded.extend_from_slice(&batch[..outcome.count]);
    }
    assert_eq!(decoded, expected);
    assert_eq!(decoder.key_decoder().remaining(), 0);
}

#[test]
fn test_dictionary_over_multiple_pages() {
    let dictionary = ["cat", "dog", "bird"];
    let pages = [vec![1u32, 1, 0, 2], vec![2; 20], vec![0, 1]];
    let data_pages = pages
        .iter()
        .map(|indices| page_gen::dictionary_index_page(indices, 2))
        .collect::<Vec<_>>();

    let mut decoder =
        ByteArrayDecoder::new(Encoding::RleDictionary, &ByteArrayDecoderConfig::default());
    decoder
        .init_values(&page_gen::plain_page(&dictionary), dictionary.len())
        .unwrap();

    for (indices, data_page) in pages.iter().zip(&data_pages) {
        decoder.init(data_page, indices.len()).unwrap();
        let mut out = vec![DynValue::Null; indices.len()];
        let outcome = decoder.decode(Sink::Dynamic(&mut out));
        assert_eq!(outcome.count, indices.len());
        assert!(outcome.is_ok());
        for (value, &index) in out.iter().zip(indices) {
            assert_eq!(
                value.as_binary(),
                Some(dictionary[index as usize].as_bytes())
            );
        }
    }
}

#[test]
fn test_dictionary_index_out_of_range() {
    let dictionary = ["cat", "dog", "bird"];
    let indices = [0u32, 1, 2, 3];
    let data_page = page_gen::dictionary_index_page(&indices, 2);

    let mut decoder = DictionaryBinaryDecoder::new(HybridRleKeyDecoder::new());
    decoder
        .init_values(&page_gen::plain_page(&dictionary), dictionary.len())
        .unwrap();
    decoder.init(&data_page, indices.len()).unwrap();
    let mut out = vec![Vec::new(); indices.len()];
    let outcome = decoder.decode(Sink::Binary(&mut out));
    assert_eq!(outcome.count, 0);
    assert!(matches!(
        outcome.result.unwrap_err().kind(),
        ErrorKind::InvalidDictionaryIndex {
            index: 3,
            position: 3,
            cardinality: 3
        }
    ));
}

#[test]
fn test_decoders_from_config() {
    let config = ByteArrayDecoderConfig::from_json(r#"{ "fixed_length": 4 }"#).unwrap();
    let values = page_gen::random_fixed_values(10, 4);
    let page = page_gen::fixed_plain_page(&values);

    let mut decoder = ByteArrayDecoder::from_code(Encoding::Plain as i32, &config).unwrap();
    decoder.init(&page, values.len()).unwrap();
    assert_eq!(decode_all(&mut decoder, 3), values);
}
