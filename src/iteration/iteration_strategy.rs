use crate::core::{ConfigurationError, ReadableHistogram};
use crate::iteration::*;

/// Stopping policy plugged into [`HistogramIterator`](super::histogram_iterator::HistogramIterator).
///
/// The iterator owns index advancement and the running totals. A strategy only decides whether
/// the cursor has reached the next reporting level and how that level moves after a step.
pub trait IterationStrategy<T: ReadableHistogram> {
    fn reached_iteration_level(&self, state: &IterationState, histogram: &T) -> bool;

    fn increment_iteration_level(&mut self, state: &IterationState, histogram: &T);

    /// Must not mutate: it may be polled any number of times between steps.
    fn has_next(&self, state: &IterationState, _histogram: &T) -> bool {
        default_has_next(state)
    }

    /// Runs once at the start of every step, after `has_next` returned true.
    fn prepare_step(&mut self, _state: &IterationState, _histogram: &T) {}

    fn get_value_iterated_to(&self, state: &IterationState, histogram: &T) -> u64 {
        histogram.highest_equivalent_value(state.current_value_at_index)
    }

    fn get_percentile_iterated_to(&self, state: &IterationState) -> f64 {
        100.0 * (state.total_count_to_current_index as f64 / state.array_total_count as f64)
    }
}

/// True while some recorded count lies at or past the cursor and has not been reported.
pub fn default_has_next(state: &IterationState) -> bool {
    state.total_count_to_current_index < state.array_total_count
}

pub struct AllValuesStrategy {
    pub(in crate::iteration) visited_index: Option<u32>,
}

impl AllValuesStrategy {
    pub fn new() -> AllValuesStrategy {
        AllValuesStrategy { visited_index: None }
    }
}

impl<T: ReadableHistogram> IterationStrategy<T> for AllValuesStrategy {
    fn reached_iteration_level(&self, state: &IterationState, _: &T) -> bool {
        self.visited_index != Some(state.current_index)
    }
    fn increment_iteration_level(&mut self, state: &IterationState, _: &T) {
        self.visited_index = Some(state.current_index)
    }
    fn has_next(&self, state: &IterationState, histogram: &T) -> bool {
        state.current_index < histogram.array_length() - 1
    }
}

pub struct RecordedValuesStrategy {
    pub(in crate::iteration) visited_index: Option<u32>,
}

impl RecordedValuesStrategy {
    pub fn new() -> RecordedValuesStrategy {
        RecordedValuesStrategy { visited_index: None }
    }
}

impl<T: ReadableHistogram> IterationStrategy<T> for RecordedValuesStrategy {
    fn reached_iteration_level(&self, state: &IterationState, _: &T) -> bool {
        state.count_at_this_value != 0 && self.visited_index != Some(state.current_index)
    }

    fn increment_iteration_level(&mut self, state: &IterationState, _: &T) {
        self.visited_index = Some(state.current_index);
    }
}

pub struct LinearStrategy {
    pub(in crate::iteration) value_units_per_bucket: u64,
    pub(in crate::iteration) current_step_highest_value_reporting_level: u64,
    pub(in crate::iteration) current_step_lowest_value_reporting_level: u64,
}

impl LinearStrategy {
    pub fn new<T: ReadableHistogram>(histogram: &T, value_units_per_bucket: u64) -> Result<LinearStrategy, ConfigurationError> {
        expect!(value_units_per_bucket == 0, ConfigurationError::ValueUnitsIsZero);
        let highest_level = value_units_per_bucket - 1;
        Ok(LinearStrategy {
            value_units_per_bucket,
            current_step_highest_value_reporting_level: highest_level,
            current_step_lowest_value_reporting_level: histogram.lowest_equivalent_value(highest_level),
        })
    }
}

impl<T: ReadableHistogram> IterationStrategy<T> for LinearStrategy {
    fn reached_iteration_level(&self, state: &IterationState, histogram: &T) -> bool {
        state.current_value_at_index >= self.current_step_lowest_value_reporting_level
            || state.current_index >= (histogram.array_length() - 1)
    }
    fn increment_iteration_level(&mut self, _: &IterationState, histogram: &T) {
        self.current_step_highest_value_reporting_level = self
            .current_step_highest_value_reporting_level
            .saturating_add(self.value_units_per_bucket);
        self.current_step_lowest_value_reporting_level =
            histogram.lowest_equivalent_value(self.current_step_highest_value_reporting_level);
    }
    fn has_next(&self, state: &IterationState, histogram: &T) -> bool {
        // one more step while the next level still falls inside the last recorded bucket
        default_has_next(state)
            || (state.array_total_count > 0
                && state.current_index < histogram.array_length() - 1
                && self.current_step_highest_value_reporting_level < state.next_value_at_index)
    }
    fn get_value_iterated_to(&self, _: &IterationState, _: &T) -> u64 {
        self.current_step_highest_value_reporting_level
    }
}

/// Reporting levels start at `value_units_in_first_bucket` and are multiplied by the integer
/// part of `log_base` after every step.
pub struct LogarithmicStrategy {
    pub(in crate::iteration) log_base: f64,
    pub(in crate::iteration) next_value_reporting_level: u64,
    pub(in crate::iteration) next_value_reporting_level_lowest_equivalent: u64,
}

impl LogarithmicStrategy {
    pub fn new<T: ReadableHistogram>(
        histogram: &T,
        value_units_in_first_bucket: u64,
        log_base: f64,
    ) -> Result<LogarithmicStrategy, ConfigurationError> {
        expect!(value_units_in_first_bucket == 0, ConfigurationError::ValueUnitsIsZero);
        // also rejects NaN
        expect!(!(log_base >= 2.0), ConfigurationError::LogBaseTooSmall(log_base));
        Ok(LogarithmicStrategy {
            log_base,
            next_value_reporting_level: value_units_in_first_bucket,
            next_value_reporting_level_lowest_equivalent: histogram.lowest_equivalent_value(value_units_in_first_bucket),
        })
    }
}

impl<T: ReadableHistogram> IterationStrategy<T> for LogarithmicStrategy {
    fn reached_iteration_level(&self, state: &IterationState, histogram: &T) -> bool {
        // a level past the top of the counts array is reported at the last slot
        state.current_value_at_index >= self.next_value_reporting_level_lowest_equivalent
            || state.current_index >= histogram.array_length() - 1
    }
    fn increment_iteration_level(&mut self, _: &IterationState, histogram: &T) {
        // the multiplier is truncated on every step, so 2.5 grows like 2
        self.next_value_reporting_level = self
            .next_value_reporting_level
            .saturating_mul(self.log_base as u64);
        self.next_value_reporting_level_lowest_equivalent = histogram.lowest_equivalent_value(self.next_value_reporting_level);
    }
    fn has_next(&self, state: &IterationState, histogram: &T) -> bool {
        // the extra step never reports the last slot again
        default_has_next(state)
            || (state.array_total_count > 0
                && state.current_index < histogram.array_length() - 1
                && self.next_value_reporting_level_lowest_equivalent < state.next_value_at_index)
    }
    fn get_value_iterated_to(&self, _: &IterationState, _: &T) -> u64 {
        self.next_value_reporting_level
    }
}

/// Percentile levels start at 0% and close half of the remaining distance to 100% every
/// `percentile_ticks_per_half_distance` steps. A final step at exactly 100% closes the iteration.
pub struct PercentileStrategy {
    pub(in crate::iteration) percentile_ticks_per_half_distance: u32,
    pub(in crate::iteration) percentile_level_to_iterate_to: f64,
    pub(in crate::iteration) reached_last_recorded_value: bool,
}

impl PercentileStrategy {
    pub fn new(percentile_ticks_per_half_distance: u32) -> Result<PercentileStrategy, ConfigurationError> {
        expect!(percentile_ticks_per_half_distance == 0, ConfigurationError::PercentileTicksIsZero);
        Ok(PercentileStrategy {
            percentile_ticks_per_half_distance,
            percentile_level_to_iterate_to: 0.0,
            reached_last_recorded_value: false,
        })
    }
}

impl<T: ReadableHistogram> IterationStrategy<T> for PercentileStrategy {
    fn reached_iteration_level(&self, state: &IterationState, _: &T) -> bool {
        if state.count_at_this_value == 0 {
            return false;
        }
        let current_percentile = 100.0 * (state.total_count_to_current_index as f64 / state.array_total_count as f64);
        current_percentile >= self.percentile_level_to_iterate_to
    }

    fn increment_iteration_level(&mut self, _: &IterationState, _: &T) {
        if self.percentile_level_to_iterate_to >= 100.0 {
            return;
        }
        let exp = (f64::ln(100.0 / (100.0 - self.percentile_level_to_iterate_to)) / f64::ln(2.0)) as i32 + 1;
        let factor = f64::powi(2.0, exp);
        let percentile_reporting_ticks = f64::from(self.percentile_ticks_per_half_distance) * factor;
        self.percentile_level_to_iterate_to += 100.0 / percentile_reporting_ticks;
    }

    fn has_next(&self, state: &IterationState, _: &T) -> bool {
        default_has_next(state) || (!self.reached_last_recorded_value && state.array_total_count > 0)
    }

    fn prepare_step(&mut self, state: &IterationState, _: &T) {
        if !default_has_next(state) && !self.reached_last_recorded_value {
            self.percentile_level_to_iterate_to = 100.0;
            self.reached_last_recorded_value = true;
        }
    }

    fn get_percentile_iterated_to(&self, _: &IterationState) -> f64 {
        self.percentile_level_to_iterate_to
    }
}
