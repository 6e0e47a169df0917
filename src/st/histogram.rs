use bytes::{Buf, BufMut};
use crate::core::*;
use crate::core::constants::*;
use crate::iteration::*;
use crate::serialization::{encode_counts, CountsDecoder};

/// Single-threaded histogram over a fixed value range, backed by a plain counts vector.
#[derive(Clone, Debug)]
pub struct Histogram<T> {
    settings: HistogramSettings,
    raw_max_value: u64,
    raw_min_non_zero_value: u64,
    total_count: u64,
    counts: Vec<T>,
}

// read methods
impl<T: Counter> Histogram<T> {
    pub fn settings(&self) -> &HistogramSettings {
        &self.settings
    }

    pub fn get_count_at_index(&self, index: u32) -> Option<T> {
        self.counts.get(index as usize).copied()
    }

    pub fn get_total_count(&self) -> u64 {
        self.total_count
    }

    pub fn counts_array_length(&self) -> u32 {
        self.settings.counts_array_length
    }

    #[inline(always)]
    pub fn counts_array_index(&self, value: u64) -> u32 {
        self.settings.counts_array_index(value)
    }

    pub fn get_min_value(&self) -> u64 {
        if self.total_count == 0 || self.counts[0] != T::zero() {
            0
        } else {
            self.get_min_non_zero_value()
        }
    }

    pub fn get_max_value(&self) -> u64 {
        self.settings.get_max_value(self.raw_max_value)
    }

    pub fn get_min_non_zero_value(&self) -> u64 {
        self.settings
            .get_min_non_zero_value(self.raw_min_non_zero_value)
    }

    pub fn get_mean(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        let total_value = self.recorded_values().fold(0.0, |total, value| {
            total + self.median_equivalent_value(value.value_iterated_to) as f64 * value.count_at_value_iterated_to as f64
        });
        total_value / self.total_count as f64
    }

    pub fn get_std_deviation(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        let mean = self.get_mean();
        let geometric_deviation_total = self.recorded_values().fold(0.0, |total, value| {
            let deviation = self.median_equivalent_value(value.value_iterated_to) as f64 - mean;
            total + (deviation * deviation) * value.count_added_in_this_iteration_step as f64
        });
        (geometric_deviation_total / self.total_count as f64).sqrt()
    }

    pub fn get_value_at_percentile(&self, percentile: f64) -> u64 {
        let one_below = util::next_below(percentile);
        let requested_percentile = one_below.clamp(0.0, 100.0);

        let fractional_count = (requested_percentile / 100.0) * self.total_count as f64;
        // Make sure we at least reach the first recorded entry
        let count_at_percentile = std::cmp::max(fractional_count.ceil() as u64, 1);

        let mut total_to_current_index: u64 = 0;
        for (i, count) in self.counts.iter().enumerate() {
            total_to_current_index += count.as_u64();
            if total_to_current_index >= count_at_percentile {
                let value_at_index = self.value_from_index(i as u32);
                return if percentile == 0.0 {
                    self.lowest_equivalent_value(value_at_index)
                } else {
                    self.highest_equivalent_value(value_at_index)
                };
            }
        }

        0
    }

    pub fn get_percentile_at_or_below_value(&self, value: u64) -> f64 {
        if self.total_count == 0 {
            return 100.0;
        }

        let target_index = self.saturating_counts_array_index(value) as usize;
        let total_to_current_index = self.counts[..=target_index]
            .iter()
            .fold(0_f64, |t, count| t + count.as_f64());
        (100.0 * total_to_current_index) / self.total_count as f64
    }

    pub fn get_count_at_value(&self, value: u64) -> Option<T> {
        self.get_count_at_index(self.settings.counts_array_index(value))
    }

    pub fn lowest_equivalent_value(&self, value: u64) -> u64 {
        self.settings.lowest_equivalent_value(value)
    }
    pub fn highest_equivalent_value(&self, value: u64) -> u64 {
        self.settings.highest_equivalent_value(value)
    }
    pub fn median_equivalent_value(&self, value: u64) -> u64 {
        self.settings.median_equivalent_value(value)
    }
    pub fn values_are_equivalent(&self, v1: u64, v2: u64) -> bool {
        self.settings.values_are_equivalent(v1, v2)
    }
    pub fn value_from_index(&self, index: u32) -> u64 {
        self.settings.value_from_index(index)
    }

    #[inline(always)]
    pub fn saturating_counts_array_index(&self, value: u64) -> u32 {
        std::cmp::min(self.counts_array_index(value), self.last_index())
    }

    #[inline(always)]
    pub fn last_index(&self) -> u32 {
        self.counts_array_length() - 1
    }
}

// write methods
impl<T: Counter> Histogram<T> {
    pub fn new(significant_value_digits: u8) -> Result<Histogram<T>, CreationError> {
        Histogram::<T>::with_high_sigvdig(2, significant_value_digits)
    }
    pub fn with_high_sigvdig(highest_trackable_value: u64, significant_value_digits: u8) -> Result<Histogram<T>, CreationError> {
        Histogram::<T>::with_low_high_sigvdig(1, highest_trackable_value, significant_value_digits)
    }
    pub fn with_low_high_sigvdig(
        lowest_discernible_value: u64,
        highest_trackable_value: u64,
        significant_value_digits: u8,
    ) -> Result<Histogram<T>, CreationError> {
        let settings = HistogramSettings::new(
            lowest_discernible_value,
            highest_trackable_value,
            significant_value_digits,
        )?;
        let counts_array_length = settings.counts_array_length as usize;
        Ok(Histogram {
            settings,
            raw_max_value: ORIGINAL_MAX,
            raw_min_non_zero_value: ORIGINAL_MIN,
            total_count: 0,
            counts: vec![T::zero(); counts_array_length],
        })
    }

    // raw extremes are kept at the ends of their unit-equivalent ranges
    fn track_value(&mut self, value: u64) {
        let unit_mask = self.settings.unit_magnitude_mask;
        self.raw_max_value = self.raw_max_value.max(value | unit_mask);
        if value > unit_mask {
            self.raw_min_non_zero_value = self.raw_min_non_zero_value.min(value & !unit_mask);
        }
    }

    #[inline(always)]
    pub fn record_value(&mut self, value: u64) -> Result<(), RecordError> {
        self.record_value_with_count(value, T::one())
    }

    pub fn record_value_with_count(&mut self, value: u64, count: T) -> Result<(), RecordError> {
        let idx = self.settings.counts_array_index(value) as usize;
        let slot = self.counts.get_mut(idx).ok_or(RecordError::ValueOutOfRange)?;
        *slot = slot.checked_add(&count).ok_or(RecordError::CountOverflow)?;
        self.track_value(value);
        self.total_count += count.as_u64();
        Ok(())
    }

    /// Records `value` and back-fills the samples a stalled recorder would have missed at
    /// `expected_interval_between_value_samples`.
    pub fn record_value_with_expected_interval(
        &mut self,
        value: u64,
        expected_interval_between_value_samples: u64,
    ) -> Result<(), RecordError> {
        self.record_value(value)?;
        let interval = expected_interval_between_value_samples;
        if interval == 0 {
            return Ok(());
        }
        let mut missing_value = value.saturating_sub(interval);
        while missing_value >= interval {
            self.record_value(missing_value)?;
            missing_value -= interval;
        }
        Ok(())
    }

    /// Overwrites the count at `index`. Min, max and total are stale until
    /// `establish_internal_tracking_values` runs.
    pub fn set_count_at_index(&mut self, index: u32, count: T) -> Result<(), RecordError> {
        let slot = self.counts.get_mut(index as usize).ok_or(RecordError::ValueOutOfRange)?;
        *slot = count;
        Ok(())
    }

    pub fn establish_internal_tracking_values(&mut self) {
        let (max_index, min_non_zero_index, total_count) =
            util::recalculate_internal_tracking_values(&*self, self.counts_array_length());
        self.raw_max_value = ORIGINAL_MAX;
        self.raw_min_non_zero_value = ORIGINAL_MIN;
        if let Some(index) = max_index {
            let top = self.highest_equivalent_value(self.value_from_index(index));
            self.track_value(top);
        }
        if let Some(index) = min_non_zero_index {
            let bottom = self.value_from_index(index);
            self.track_value(bottom);
        }
        self.total_count = total_count;
    }

    pub fn reset(&mut self) {
        for count in self.counts.iter_mut() {
            *count = T::zero();
        }
        self.raw_max_value = ORIGINAL_MAX;
        self.raw_min_non_zero_value = ORIGINAL_MIN;
        self.total_count = 0;
    }
}

// iteration
impl<T: Counter> Histogram<T> {
    pub fn percentiles(&self, percentile_ticks_per_half_distance: u32) -> Result<PercentileIterator<'_, Self>, ConfigurationError> {
        PercentileIterator::new(self, percentile_ticks_per_half_distance)
    }

    pub fn linear_bucket_values(&self, value_units_per_bucket: u64) -> Result<LinearIterator<'_, Self>, ConfigurationError> {
        LinearIterator::new(self, value_units_per_bucket)
    }

    pub fn logarithmic_bucket_values(
        &self,
        value_units_in_first_bucket: u64,
        log_base: f64,
    ) -> Result<LogarithmicIterator<'_, Self>, ConfigurationError> {
        LogarithmicIterator::new(self, value_units_in_first_bucket, log_base)
    }

    pub fn all_values(&self) -> AllValuesIterator<'_, Self> {
        AllValuesIterator::new(self)
    }

    pub fn recorded_values(&self) -> RecordedValuesIterator<'_, Self> {
        RecordedValuesIterator::new(self)
    }
}

// counts payloads
impl<T: Counter> Histogram<T> {
    /// Writes the counts up to the highest recorded value as a V2 payload.
    pub fn encode_counts_into<B: BufMut>(&self, buf: &mut B) -> Result<usize, SerializationError> {
        let relevant_length = if self.total_count == 0 {
            0
        } else {
            self.saturating_counts_array_index(self.get_max_value()) as usize + 1
        };
        encode_counts(buf, &self.counts[..relevant_length])
    }

    /// Overlays the counts of a payload onto this histogram and recomputes min, max and total.
    pub fn decode_counts_from<D, B>(&mut self, decoder: &D, buf: &mut B, length_in_bytes: usize) -> Result<usize, DecodingError>
    where
        D: CountsDecoder,
        B: Buf,
    {
        let mut failure = None;
        let counts = &mut self.counts;
        let result = decoder.decode_counts(buf, length_in_bytes, |index, count| {
            if failure.is_some() {
                return;
            }
            match (counts.get_mut(index as usize), T::from_u64(count)) {
                (Some(slot), Some(count)) => *slot = count,
                (None, _) => failure = Some((index, true)),
                (_, None) => failure = Some((index, false)),
            }
        });
        self.establish_internal_tracking_values();
        let bytes_consumed = result.inspect_err(|e| tracing::debug!(error = %e, "failed to decode counts payload"))?;
        match failure {
            Some((index, true)) => Err(DecodingError::PayloadExceededCountsArrayLength { index, bytes_consumed }),
            Some((index, false)) => Err(DecodingError::CountExceedsTypeMax { index, bytes_consumed }),
            None => Ok(bytes_consumed),
        }
    }
}

impl<T: Counter> ReadableHistogram for Histogram<T> {
    fn settings(&self) -> &HistogramSettings {
        &self.settings
    }
    #[inline(always)]
    fn array_length(&self) -> u32 {
        self.counts_array_length()
    }
    #[inline(always)]
    fn get_total_count(&self) -> u64 {
        self.total_count
    }
    #[inline(always)]
    fn count_at_index(&self, idx: u32) -> u64 {
        self.counts[idx as usize].as_u64()
    }
}

impl<T: Counter> PartialEq for Histogram<T> {
    fn eq(&self, other: &Self) -> bool {
        self.settings == other.settings
            && self.total_count == other.total_count
            && self.get_max_value() == other.get_max_value()
            && self.get_min_non_zero_value() == other.get_min_non_zero_value()
            && self.counts == other.counts
    }
}
