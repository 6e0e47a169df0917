use bytes::Buf;
use crate::core::{Counter, DecodingError};
use crate::serialization::zigzag;
use std::marker::PhantomData;

/// Largest number of bytes a single ZigZag LEB128 encoded 64 bit word can take.
pub const V2_MAX_WORD_SIZE_IN_BYTES: usize = 9;

/// Turns an encoded counts payload back into `(index, count)` pairs.
///
/// Decoders hold no state between calls. Pairs are delivered to `set_count` in strictly
/// ascending index order, so they can fill a fresh histogram or overlay an existing one.
pub trait CountsDecoder {
    /// Width in bytes of one encoded word, or the upper bound for variable width encodings.
    fn word_size(&self) -> usize;

    /// Decodes exactly `length_in_bytes` bytes from `buf` and returns the number of bytes consumed.
    fn decode_counts<B, F>(&self, buf: &mut B, length_in_bytes: usize, set_count: F) -> Result<usize, DecodingError>
    where
        B: Buf,
        F: FnMut(u32, u64);
}

fn check_length<B: Buf>(buf: &B, length_in_bytes: usize) -> Result<(), DecodingError> {
    if buf.remaining() < length_in_bytes {
        Err(DecodingError::LengthExceedsBuffer {
            length_in_bytes,
            remaining: buf.remaining(),
        })
    } else {
        Ok(())
    }
}

/// Decoder for the V2 payload: ZigZag LEB128 varints where a negative value `-n` skips `n`
/// empty buckets and any other value is the count of the next bucket.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZigZagCountsDecoder;

impl ZigZagCountsDecoder {
    pub fn new() -> ZigZagCountsDecoder {
        ZigZagCountsDecoder
    }
}

impl CountsDecoder for ZigZagCountsDecoder {
    fn word_size(&self) -> usize {
        V2_MAX_WORD_SIZE_IN_BYTES
    }

    fn decode_counts<B, F>(&self, buf: &mut B, length_in_bytes: usize, mut set_count: F) -> Result<usize, DecodingError>
    where
        B: Buf,
        F: FnMut(u32, u64),
    {
        check_length(buf, length_in_bytes)?;
        let mut payload = Buf::take(&mut *buf, length_in_bytes);
        let mut index = 0_u32;
        let mut bytes_consumed = 0;
        while payload.has_remaining() {
            let count = zigzag::get_i64(&mut payload).ok_or(DecodingError::TruncatedValue { bytes_consumed })?;
            if count < 0 {
                let zeroes = count.unsigned_abs();
                index = u32::try_from(u64::from(index) + zeroes).map_err(|_| DecodingError::IndexOverflow { bytes_consumed })?;
            } else {
                let next_index = index.checked_add(1).ok_or(DecodingError::IndexOverflow { bytes_consumed })?;
                set_count(index, count as u64);
                index = next_index;
            }
            bytes_consumed = length_in_bytes - payload.remaining();
        }
        tracing::trace!(bytes_consumed, buckets_covered = index, "decoded zigzag counts payload");
        Ok(bytes_consumed)
    }
}

/// Decoder for payloads storing one big-endian signed word of `C::word_size()` bytes per bucket.
/// Negative words are rejected.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedWidthCountsDecoder<C> {
    _counter: PhantomData<fn() -> C>,
}

impl<C: Counter> FixedWidthCountsDecoder<C> {
    pub fn new() -> FixedWidthCountsDecoder<C> {
        FixedWidthCountsDecoder { _counter: PhantomData }
    }
}

impl<C: Counter> CountsDecoder for FixedWidthCountsDecoder<C> {
    fn word_size(&self) -> usize {
        C::word_size()
    }

    fn decode_counts<B, F>(&self, buf: &mut B, length_in_bytes: usize, mut set_count: F) -> Result<usize, DecodingError>
    where
        B: Buf,
        F: FnMut(u32, u64),
    {
        check_length(buf, length_in_bytes)?;
        let word_size = C::word_size();
        let mut index = 0_u32;
        let mut bytes_consumed = 0;
        while bytes_consumed < length_in_bytes {
            if length_in_bytes - bytes_consumed < word_size {
                return Err(DecodingError::TruncatedValue { bytes_consumed });
            }
            let count = C::get_signed_word(buf);
            if count < 0 {
                return Err(DecodingError::NegativeCount { index, count, bytes_consumed });
            }
            set_count(index, count as u64);
            bytes_consumed += word_size;
            index = match index.checked_add(1) {
                Some(next_index) => next_index,
                None if bytes_consumed == length_in_bytes => index,
                None => return Err(DecodingError::IndexOverflow { bytes_consumed }),
            };
        }
        tracing::trace!(bytes_consumed, word_size, "decoded fixed width counts payload");
        Ok(bytes_consumed)
    }
}
