use bytes::{BufMut, BytesMut};
use crate::core::DecodingError;
use crate::serialization::counts_decoder::V2_MAX_WORD_SIZE_IN_BYTES;
use crate::serialization::*;
use crate::st::Histogram;
use crate::tests::consts::*;
use crate::tests::util::*;
use rand::Rng;

fn zigzag_bytes(value: i64) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(V2_MAX_WORD_SIZE_IN_BYTES);
    zigzag::put_i64(&mut buf, value);
    buf.to_vec()
}

fn decode_pairs<D: CountsDecoder>(decoder: &D, payload: &[u8]) -> (Result<usize, DecodingError>, Vec<(u32, u64)>) {
    let mut pairs = Vec::new();
    let mut buf = payload;
    let result = decoder.decode_counts(&mut buf, payload.len(), |index, count| pairs.push((index, count)));
    (result, pairs)
}

#[test]
fn test_zig_zag() {
    let mut buf = BytesMut::with_capacity(30);
    let to_write_u = 102398084419879874;
    let to_write_neg = -100203;
    zigzag::put_u64(&mut buf, to_write_u).unwrap();
    zigzag::put_i64(&mut buf, 0);
    zigzag::put_u64(&mut buf, 0).unwrap();
    zigzag::put_i64(&mut buf, to_write_neg);

    let mut b = buf.freeze();
    assert_eq!(Some(to_write_u as i64), zigzag::get_i64(&mut b));
    assert_eq!(Some(0), zigzag::get_i64(&mut b));
    assert_eq!(Some(0), zigzag::get_i64(&mut b));
    assert_eq!(Some(to_write_neg), zigzag::get_i64(&mut b), "negative values should be read correctly");
    assert_eq!(None, zigzag::get_i64(&mut b));
}

#[test]
fn zigzag_known_encodings() {
    assert_eq!(vec![0x00], zigzag_bytes(0));
    assert_eq!(vec![0x01], zigzag_bytes(-1));
    assert_eq!(vec![0x02], zigzag_bytes(1));
    assert_eq!(vec![0x7E], zigzag_bytes(63));
    assert_eq!(vec![0x80, 0x01], zigzag_bytes(64));
    assert_eq!(vec![0x81, 0x01], zigzag_bytes(-65));
}

#[test]
fn zigzag_extremes_take_nine_bytes() {
    for value in [i64::MAX, i64::MIN] {
        let bytes = zigzag_bytes(value);
        assert_eq!(V2_MAX_WORD_SIZE_IN_BYTES, bytes.len());
        assert_eq!(Some(value), zigzag::get_i64(&mut &bytes[..]));
    }
}

#[test]
fn zigzag_rejects_top_bit_unsigned() {
    let mut buf = BytesMut::with_capacity(V2_MAX_WORD_SIZE_IN_BYTES);
    assert!(zigzag::put_u64(&mut buf, 1 << 63).is_err());
    assert!(buf.is_empty());
}

#[test]
fn zigzag_decoder_expands_zero_runs() {
    let (result, pairs) = decode_pairs(&ZigZagCountsDecoder, &[0x03, 0x0A, 0x01, 0x0E]);
    assert_eq!(Ok(4), result);
    assert_eq!(vec![(2, 5), (4, 7)], pairs);
}

#[test]
fn zigzag_decoder_reports_truncated_value() {
    let (result, pairs) = decode_pairs(&ZigZagCountsDecoder, &[0x0A, 0x80]);
    assert_eq!(Err(DecodingError::TruncatedValue { bytes_consumed: 1 }), result);
    assert_eq!(vec![(0, 5)], pairs);
    assert_eq!(1, result.unwrap_err().bytes_consumed());
}

#[test]
fn zigzag_decoder_reports_index_overflow() {
    let mut buf = BytesMut::with_capacity(2 * V2_MAX_WORD_SIZE_IN_BYTES);
    zigzag::put_i64(&mut buf, 3);
    zigzag::put_i64(&mut buf, -(1 << 32));
    let (result, pairs) = decode_pairs(&ZigZagCountsDecoder, &buf);
    assert_eq!(Err(DecodingError::IndexOverflow { bytes_consumed: 1 }), result);
    assert_eq!(vec![(0, 3)], pairs);
}

#[test]
fn decoder_rejects_length_past_buffer() {
    let payload = [0x02, 0x04];
    let mut buf = &payload[..];
    let result = ZigZagCountsDecoder.decode_counts(&mut buf, 3, |_, _| panic!("nothing may be decoded"));
    assert_eq!(Err(DecodingError::LengthExceedsBuffer { length_in_bytes: 3, remaining: 2 }), result);
    assert_eq!(2, buf.len());
}

#[test]
fn decoder_leaves_bytes_past_length() {
    let payload = [0x02, 0x04, 0x06];
    let mut buf = &payload[..];
    let mut pairs = Vec::new();
    let result = ZigZagCountsDecoder.decode_counts(&mut buf, 2, |index, count| pairs.push((index, count)));
    assert_eq!(Ok(2), result);
    assert_eq!(vec![(0, 1), (1, 2)], pairs);
    assert_eq!(&[0x06], buf);
}

#[test]
fn fixed_width_decoder_reads_big_endian_words() {
    let mut buf = BytesMut::with_capacity(8);
    buf.put_i16(300);
    buf.put_i16(0);
    buf.put_i16(7);
    let (result, pairs) = decode_pairs(&FixedWidthCountsDecoder::<u16>::new(), &buf);
    assert_eq!(Ok(6), result);
    assert_eq!(vec![(0, 300), (1, 0), (2, 7)], pairs);
}

#[test]
fn fixed_width_decoder_rejects_negative_count() {
    let mut buf = BytesMut::with_capacity(12);
    buf.put_i32(3);
    buf.put_i32(0);
    buf.put_i32(-1);
    let (result, pairs) = decode_pairs(&FixedWidthCountsDecoder::<u32>::new(), &buf);
    assert_eq!(
        Err(DecodingError::NegativeCount { index: 2, count: -1, bytes_consumed: 8 }),
        result
    );
    assert_eq!(vec![(0, 3), (1, 0)], pairs);
}

#[test]
fn fixed_width_decoder_rejects_partial_word() {
    let mut buf = BytesMut::with_capacity(6);
    buf.put_i32(3);
    buf.put_i16(1);
    let (result, pairs) = decode_pairs(&FixedWidthCountsDecoder::<u32>::new(), &buf);
    assert_eq!(Err(DecodingError::TruncatedValue { bytes_consumed: 4 }), result);
    assert_eq!(vec![(0, 3)], pairs);
}

#[test]
fn word_sizes() {
    assert_eq!(9, ZigZagCountsDecoder.word_size());
    assert_eq!(2, FixedWidthCountsDecoder::<u16>::new().word_size());
    assert_eq!(4, FixedWidthCountsDecoder::<u32>::new().word_size());
    assert_eq!(8, FixedWidthCountsDecoder::<u64>::new().word_size());
}

#[test]
fn encode_skips_zero_runs_and_trailing_zeroes() {
    let mut buf = BytesMut::with_capacity(5 * V2_MAX_WORD_SIZE_IN_BYTES);
    let written = encode_counts(&mut buf, &[0_u64, 0, 5, 0, 7, 0, 0]).unwrap();
    assert_eq!(4, written);
    assert_eq!(&[0x03, 0x0A, 0x01, 0x0E], &buf[..]);
}

#[test]
fn histogram_round_trip() {
    let histogram = stat_histo();
    let mut buf = BytesMut::with_capacity(1024);
    let written = histogram.encode_counts_into(&mut buf).unwrap();
    assert_eq!(buf.len(), written);

    let mut decoded = Histogram::<u64>::with_low_high_sigvdig(1, HIGHEST_TRACKABLE, SIG_V_DIGITS).unwrap();
    let mut payload = buf.freeze();
    assert_eq!(Ok(written), decoded.decode_counts_from(&ZigZagCountsDecoder, &mut payload, written));
    assert_eq!(histogram, decoded);
    assert_eq!(histogram.get_max_value(), decoded.get_max_value());
    assert_eq!(histogram.get_min_non_zero_value(), decoded.get_min_non_zero_value());
}

#[test]
fn random_histogram_round_trip() {
    let mut rng = rand::rng();
    let mut histogram = Histogram::<u32>::with_high_sigvdig(HIGHEST_TRACKABLE, SIG_V_DIGITS).unwrap();
    for _ in 0..1000 {
        histogram.record_value(rng.random_range(1..HIGHEST_TRACKABLE)).unwrap();
    }

    let mut buf = BytesMut::with_capacity(1024);
    let written = histogram.encode_counts_into(&mut buf).unwrap();

    let mut decoded = Histogram::<u32>::with_high_sigvdig(HIGHEST_TRACKABLE, SIG_V_DIGITS).unwrap();
    assert_eq!(Ok(written), decoded.decode_counts_from(&ZigZagCountsDecoder, &mut &buf[..], written));
    assert_eq!(histogram, decoded);
    assert_eq!(1000, decoded.get_total_count());
}

#[test]
fn empty_histogram_encodes_to_nothing() {
    let histogram = Histogram::<u64>::with_high_sigvdig(HIGHEST_TRACKABLE, SIG_V_DIGITS).unwrap();
    let mut buf = BytesMut::with_capacity(16);
    assert_eq!(Ok(0), histogram.encode_counts_into(&mut buf));
    assert!(buf.is_empty());
}

#[test]
fn decode_past_counts_array_is_rejected() {
    let mut histogram = Histogram::<u64>::new(SIG_V_DIGITS).unwrap();
    let length = i64::from(histogram.counts_array_length());

    let mut buf = BytesMut::with_capacity(3 * V2_MAX_WORD_SIZE_IN_BYTES);
    zigzag::put_i64(&mut buf, 2);
    zigzag::put_i64(&mut buf, -length);
    zigzag::put_i64(&mut buf, 4);
    let written = buf.len();

    assert_eq!(
        Err(DecodingError::PayloadExceededCountsArrayLength {
            index: histogram.counts_array_length() + 1,
            bytes_consumed: written,
        }),
        histogram.decode_counts_from(&ZigZagCountsDecoder, &mut &buf[..], written)
    );
    // counts that fit were kept
    assert_eq!(2, histogram.get_total_count());
    assert_eq!(Some(2), histogram.get_count_at_index(0));
}

#[test]
fn decode_count_too_large_for_counter_is_rejected() {
    let mut histogram = Histogram::<u16>::new(SIG_V_DIGITS).unwrap();

    let mut buf = BytesMut::with_capacity(2 * V2_MAX_WORD_SIZE_IN_BYTES);
    zigzag::put_i64(&mut buf, 9);
    zigzag::put_i64(&mut buf, 70000);
    let written = buf.len();

    assert_eq!(
        Err(DecodingError::CountExceedsTypeMax { index: 1, bytes_consumed: written }),
        histogram.decode_counts_from(&ZigZagCountsDecoder, &mut &buf[..], written)
    );
    assert_eq!(Some(9), histogram.get_count_at_index(0));
    assert_eq!(Some(0), histogram.get_count_at_index(1));
}

#[test]
fn fixed_width_payload_fills_histogram() {
    let mut histogram = Histogram::<u64>::with_high_sigvdig(HIGHEST_TRACKABLE, SIG_V_DIGITS).unwrap();
    let mut buf = BytesMut::with_capacity(5 * 8);
    for count in [0_i64, 4, 0, 0, 1] {
        buf.put_i64(count);
    }
    assert_eq!(Ok(40), histogram.decode_counts_from(&FixedWidthCountsDecoder::<u64>::new(), &mut &buf[..], 40));
    assert_eq!(5, histogram.get_total_count());
    assert_eq!(1, histogram.get_min_non_zero_value());
    assert_eq!(4, histogram.get_max_value());
}
