use bytes::BufMut;
use crate::core::{Counter, SerializationError};
use crate::serialization::counts_decoder::V2_MAX_WORD_SIZE_IN_BYTES;
use crate::serialization::zigzag;

pub fn get_required_byte_buffer_capacity(length: usize) -> usize {
    length * V2_MAX_WORD_SIZE_IN_BYTES
}

/// Writes `counts` as a V2 payload, collapsing runs of zeroes into one negative word. Trailing
/// zeroes are not written. Returns the number of bytes written.
pub fn encode_counts<T: BufMut, C: Counter>(buf: &mut T, counts: &[C]) -> Result<usize, SerializationError> {
    if buf.remaining_mut() < get_required_byte_buffer_capacity(counts.len()) {
        return Err(SerializationError::BufferCapacityInsufficient);
    }
    let initial_remaining = buf.remaining_mut();
    let mut zeroes_count = 0_i64;
    for count in counts.iter() {
        if *count == C::zero() {
            zeroes_count += 1;
        } else {
            if zeroes_count != 0 {
                zigzag::put_i64(buf, -zeroes_count);
                zeroes_count = 0;
            }
            zigzag::put_u64(buf, count.as_u64())?;
        }
    }
    Ok(initial_remaining - buf.remaining_mut())
}
