pub const ORIGINAL_MIN: u64 = u64::MAX;
pub const ORIGINAL_MAX: u64 = 0;

pub const MAX_SIGNIFICANT_VALUE_DIGITS: u8 = 5;
