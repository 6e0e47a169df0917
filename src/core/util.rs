use crate::core::ReadableHistogram;

macro_rules! expect {
    ($t:expr, $e:expr) => {
        if $t { return Err($e); }
    };
}

const F64_SIGN_MASK: u64 = 1 << 63;

// this will work for two's complement floats if ints have the same endianness on the platform as floats
pub fn next_below(value: f64) -> f64 {
    if value.is_nan() {
        value
    } else {
        let mut transient = value.to_bits();

        if value > 0.0 {
            transient -= 1;
        } else if value < 0.0 {
            transient += 1;
        } else {
            transient = F64_SIGN_MASK | 1;
        }

        f64::from_bits(transient)
    }
}

/// Scans the first `length_to_cover` counts and returns (highest non-empty index, lowest non-empty
/// index other than 0, total count).
pub fn recalculate_internal_tracking_values<H: ReadableHistogram>(histogram: &H, length_to_cover: u32) -> (Option<u32>, Option<u32>, u64) {
    let mut new_max = None;
    let mut new_min = None;
    let mut new_total = 0;
    for i in 0..length_to_cover {
        let count = histogram.count_at_index(i);
        if count > 0 {
            new_total += count;
            new_max = Some(i);
            if new_min.is_none() && i != 0 {
                new_min = Some(i)
            }
        }
    }
    (new_max, new_min, new_total)
}
