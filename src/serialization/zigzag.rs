//! ZigZag + LEB128 varints as used by the V2 counts payload.
//!
//! A 64 bit value takes one to nine bytes. The first eight bytes carry seven bits each with the
//! high bit flagging a continuation; a ninth byte carries a full eight bits.

use bytes::{Buf, BufMut};
use crate::core::SerializationError;

macro_rules! shift {
    ($value:expr, $factor:expr) => { ($value >> (7 * $factor)) as u8 };
}

macro_rules! shift_sign {
    ($value:expr, $factor:expr) => { (($value >> (7 * $factor)) | 0x80) as u8 };
}

macro_rules! put_chunks {
    // terminal case
    ($buf:expr, $value:expr, $factor:expr, ) => {
        if $value >> (7 * ($factor + 1)) == 0 {
            $buf.put_u8(shift!($value, $factor));
        }
        else {
            $buf.put_u8(shift_sign!($value, $factor));
            $buf.put_u8(shift!($value, $factor + 1));
        }
    };
    // base case
    ($buf:expr, $value:expr, 0, $fuel_head:tt $($fuel:tt) *) => {
        if $value >> 7 == 0 {
            $buf.put_u8($value as u8);
        }
        else {
            $buf.put_u8((($value & 0x7F) | 0x80) as u8);
            put_chunks!($buf, $value, 1, $($fuel) *);
        }
    };
    ($buf:expr, $value:expr, $factor:expr, $fuel_head:tt $($fuel:tt) *) => {
        if $value >> (7 * ($factor + 1)) == 0 {
            $buf.put_u8(shift!($value, $factor));
        }
        else {
            $buf.put_u8(shift_sign!($value, $factor));
            put_chunks!($buf, $value, $factor + 1, $($fuel) *);
        }
    };
}

pub fn put_u64<T: BufMut>(buffer: &mut T, value: u64) -> Result<(), SerializationError> {
    if value >> 63 == 1 {
        Err(SerializationError::ValueNotLEBEncodable)
    } else {
        put_i64(buffer, value as i64);
        Ok(())
    }
}

pub fn put_i64<T: BufMut>(buffer: &mut T, value: i64) {
    let value = (value << 1) ^ (value >> 63);
    put_chunks!(buffer, value, 0, a a a a a a a);
}

macro_rules! next_byte {
    ($buf:expr) => {
        if $buf.has_remaining() { $buf.get_u8() } else { return None; }
    };
}

macro_rules! read_chunks {
    ($buf:expr, $value:expr, $byte:expr, $factor:expr, $tpe:ty, ) => {
        $byte = next_byte!($buf);
        $value |= ($byte as $tpe) << (7 * $factor);
    };
    ($buf:expr, $value:expr, $byte:expr, $factor:expr, $tpe:ty, $fuel_head:tt $($fuel:tt) *) => {
        $byte = next_byte!($buf);
        $value |= (($byte & 0x7F) as $tpe) << (7 * $factor);
        if ($byte & 0x80) != 0 {
            read_chunks!($buf, $value, $byte, $factor + 1, $tpe, $($fuel) *);
        }
    }
}

/// Reads one value, or `None` if the buffer ends inside it. Bytes of a truncated value are
/// still consumed.
pub fn get_i64<T: Buf>(buffer: &mut T) -> Option<i64> {
    let mut v = next_byte!(buffer);
    let mut value = (v & 0x7F) as u64;
    if (v & 0x80) != 0 {
        read_chunks!(buffer, value, v, 1, u64, a a a a a a a);
    }
    Some(((value >> 1) as i64) ^ -((value & 1) as i64))
}
