use bytes::Buf;
use num_traits as num;

pub trait Counter
    : num::Num + num::ToPrimitive + num::FromPrimitive + num::NumAssignOps + num::CheckedAdd + PartialOrd<Self> + Copy
    {
    /// Counter as a f64.
    fn as_f64(&self) -> f64;
    /// Counter as a u64.
    fn as_u64(&self) -> u64;
    /// Width of the counter in bytes, which is also the width of one word in the fixed width encoding.
    fn word_size() -> usize;
    /// Reads one big-endian signed word of `word_size()` bytes. The caller checks that enough bytes remain.
    fn get_signed_word<B: Buf>(buf: &mut B) -> i64;
}

impl Counter for u16 {
    #[inline(always)]
    fn as_f64(&self) -> f64 {
        f64::from(*self)
    }
    #[inline(always)]
    fn as_u64(&self) -> u64 {
        u64::from(*self)
    }
    #[inline(always)]
    fn word_size() -> usize {
        2
    }
    #[inline(always)]
    fn get_signed_word<B: Buf>(buf: &mut B) -> i64 {
        i64::from(buf.get_i16())
    }
}

impl Counter for u32 {
    #[inline(always)]
    fn as_f64(&self) -> f64 {
        f64::from(*self)
    }
    #[inline(always)]
    fn as_u64(&self) -> u64 {
        u64::from(*self)
    }
    #[inline(always)]
    fn word_size() -> usize {
        4
    }
    #[inline(always)]
    fn get_signed_word<B: Buf>(buf: &mut B) -> i64 {
        i64::from(buf.get_i32())
    }
}

impl Counter for u64 {
    #[inline(always)]
    fn as_f64(&self) -> f64 {
        *self as f64
    }
    #[inline(always)]
    fn as_u64(&self) -> u64 {
        *self
    }
    #[inline(always)]
    fn word_size() -> usize {
        8
    }
    #[inline(always)]
    fn get_signed_word<B: Buf>(buf: &mut B) -> i64 {
        buf.get_i64()
    }
}
