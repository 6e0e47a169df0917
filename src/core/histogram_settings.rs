use crate::core::*;
use crate::core::constants::*;

/// Bucket layout derived from the value range and precision of a histogram.
///
/// Every value maps to a counts array index. Values sharing an index are "equivalent" and
/// the range they cover is `[lowest_equivalent_value, highest_equivalent_value]`.
#[derive(Clone, Debug, PartialEq)]
pub struct HistogramSettings {
    pub bucket_count: u32,
    pub counts_array_length: u32,
    pub highest_trackable_value: u64,
    pub lowest_discernible_value: u64,
    pub number_of_significant_value_digits: u32,
    pub sub_bucket_count: u32,
    pub leading_zero_count_base: u32,
    pub sub_bucket_mask: u64,
    pub unit_magnitude: u32,
    pub sub_bucket_half_count_magnitude: u32,
    pub sub_bucket_half_count: u32,
    pub unit_magnitude_mask: u64,
}

impl HistogramSettings {
    pub fn new(
        lowest_discernible_value: u64,
        highest_trackable_value: u64,
        significant_value_digits: u8,
    ) -> Result<HistogramSettings, CreationError> {
        expect!(lowest_discernible_value == 0, CreationError::LowIsZero);
        expect!(lowest_discernible_value > u64::MAX / 2, CreationError::LowGtMax);
        expect!(highest_trackable_value / 2 < lowest_discernible_value, CreationError::HighLt2Low);
        expect!(
            significant_value_digits > MAX_SIGNIFICANT_VALUE_DIGITS,
            CreationError::SignificantValueDigitsExceedsMax
        );

        // values below this are tracked with unit resolution
        let single_unit_range = 2 * 10_u64.pow(u32::from(significant_value_digits));
        let sub_bucket_count_magnitude = (single_unit_range as f64).log2().ceil() as u32;
        let unit_magnitude = 63 - lowest_discernible_value.leading_zeros();
        expect!(
            unit_magnitude + sub_bucket_count_magnitude > 63,
            CreationError::CantReprSigDigitsLtLowestDiscernible
        );

        let sub_bucket_count = 1_u32 << sub_bucket_count_magnitude;
        let mut settings = HistogramSettings {
            bucket_count: 0,
            counts_array_length: 0,
            highest_trackable_value,
            lowest_discernible_value,
            number_of_significant_value_digits: u32::from(significant_value_digits),
            sub_bucket_count,
            leading_zero_count_base: 64 - unit_magnitude - sub_bucket_count_magnitude,
            sub_bucket_mask: u64::from(sub_bucket_count - 1) << unit_magnitude,
            unit_magnitude,
            sub_bucket_half_count_magnitude: sub_bucket_count_magnitude - 1,
            sub_bucket_half_count: sub_bucket_count >> 1,
            unit_magnitude_mask: (1_u64 << unit_magnitude) - 1,
        };

        let bucket_count = settings.get_buckets_needed_to_cover_value(highest_trackable_value);
        let counts_array_length = u64::from(bucket_count + 1) * u64::from(settings.sub_bucket_half_count);
        expect!(counts_array_length > i32::MAX as u64, CreationError::RequiresExcessiveArrayLen);

        settings.bucket_count = bucket_count;
        settings.counts_array_length = counts_array_length as u32;
        Ok(settings)
    }

    #[inline(always)]
    pub fn size_of_equivalent_value_range(&self, value: u64) -> u64 {
        let bucket_index = self.get_bucket_index(value);
        1_u64 << (self.unit_magnitude + bucket_index)
    }

    #[inline(always)]
    pub fn lowest_equivalent_value(&self, value: u64) -> u64 {
        let bucket_index = self.get_bucket_index(value);
        let sub_bucket_index = self.get_sub_bucket_index(value, bucket_index);
        self.value_from_indexes(bucket_index, sub_bucket_index)
    }

    #[inline(always)]
    pub fn highest_equivalent_value(&self, value: u64) -> u64 {
        match self
            .lowest_equivalent_value(value)
            .checked_add(self.size_of_equivalent_value_range(value))
        {
            Some(next_non_equivalent) => next_non_equivalent - 1,
            None => u64::MAX,
        }
    }

    #[inline(always)]
    pub fn median_equivalent_value(&self, value: u64) -> u64 {
        self.lowest_equivalent_value(value)
            .saturating_add(self.size_of_equivalent_value_range(value) >> 1)
    }

    #[inline(always)]
    pub fn values_are_equivalent(&self, value1: u64, value2: u64) -> bool {
        self.lowest_equivalent_value(value1) == self.lowest_equivalent_value(value2)
    }

    #[inline(always)]
    pub fn get_bucket_index(&self, value: u64) -> u32 {
        self.leading_zero_count_base - (value | self.sub_bucket_mask).leading_zeros()
    }

    #[inline(always)]
    pub fn get_sub_bucket_index(&self, value: u64, bucket_index: u32) -> u32 {
        (value >> (bucket_index + self.unit_magnitude)) as u32
    }

    #[inline(always)]
    pub fn value_from_index(&self, index: u32) -> u64 {
        let bucket_idx_succ = index >> self.sub_bucket_half_count_magnitude;
        let mut sub_bucket_index = (index & (self.sub_bucket_half_count - 1)) + self.sub_bucket_half_count;
        let bucket_index = if bucket_idx_succ == 0 {
            sub_bucket_index -= self.sub_bucket_half_count;
            0
        } else {
            bucket_idx_succ - 1
        };
        self.value_from_indexes(bucket_index, sub_bucket_index)
    }

    #[inline(always)]
    pub fn value_from_indexes(&self, bucket_index: u32, sub_bucket_index: u32) -> u64 {
        // one past the last slot of a full-range histogram lies beyond u64
        let shift = bucket_index + self.unit_magnitude;
        let sub_bucket_value = u64::from(sub_bucket_index);
        match sub_bucket_value.checked_shl(shift) {
            Some(value) if shift <= sub_bucket_value.leading_zeros() => value,
            _ => u64::MAX,
        }
    }

    /// Number of buckets whose top ends above `value`, capped where doubling would overflow u64.
    pub fn get_buckets_needed_to_cover_value(&self, value: u64) -> u32 {
        let mut first_untracked = u64::from(self.sub_bucket_count) << self.unit_magnitude;
        let mut buckets = 1;
        while first_untracked <= value {
            buckets += 1;
            match first_untracked.checked_mul(2) {
                Some(doubled) => first_untracked = doubled,
                None => return buckets,
            }
        }
        buckets
    }

    /// Index in the counts array. Values past the trackable range map past `counts_array_length`.
    #[inline(always)]
    pub fn counts_array_index(&self, value: u64) -> u32 {
        let bucket_index = self.get_bucket_index(value);
        let sub_bucket_index = self.get_sub_bucket_index(value, bucket_index);
        // the upper half of every bucket but the first starts at (bucket_index + 1) * half count
        ((bucket_index + 1) << self.sub_bucket_half_count_magnitude) + sub_bucket_index - self.sub_bucket_half_count
    }

    pub fn get_max_value(&self, raw_max: u64) -> u64 {
        if raw_max == ORIGINAL_MAX {
            ORIGINAL_MAX
        } else {
            self.highest_equivalent_value(raw_max)
        }
    }

    pub fn get_min_non_zero_value(&self, raw_min_non_zero: u64) -> u64 {
        if raw_min_non_zero == ORIGINAL_MIN {
            ORIGINAL_MIN
        } else {
            self.lowest_equivalent_value(raw_min_non_zero)
        }
    }
}
