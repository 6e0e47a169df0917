use crate::core::{IterationError, ReadableHistogram};
use crate::iteration::*;

/// Single forward pass over a histogram's counts, stopping wherever the strategy `S` says.
pub struct HistogramIterator<'a, T: 'a, S> {
    pub(in crate::iteration) histogram: &'a T,
    pub(in crate::iteration) state: IterationState,
    pub(in crate::iteration) strategy: S,
}

impl<'a, T: ReadableHistogram, S: IterationStrategy<T>> HistogramIterator<'a, T, S> {
    pub fn new(histogram: &'a T, strategy: S) -> HistogramIterator<'a, T, S> {
        HistogramIterator {
            histogram,
            state: IterationState::new(histogram),
            strategy,
        }
    }

    /// Rewinds the cursor in place and installs a fresh strategy, possibly for another histogram.
    pub fn reset(&mut self, histogram: &'a T, strategy: S) {
        self.histogram = histogram;
        self.state.reset(histogram);
        self.strategy = strategy;
    }

    pub fn histogram(&self) -> &'a T {
        self.histogram
    }

    pub fn has_next(&self) -> bool {
        self.strategy.has_next(&self.state, self.histogram)
    }

    pub fn next_value(&mut self) -> Result<IterationValue, IterationError> {
        let histogram = self.histogram;
        if histogram.get_total_count() != self.state.array_total_count {
            return Err(IterationError::HistogramModified);
        }
        if !self.has_next() {
            return Err(IterationError::Exhausted);
        }
        let state = &mut self.state;
        let strategy = &mut self.strategy;
        strategy.prepare_step(state, histogram);
        while state.current_index < histogram.array_length() {
            state.count_at_this_value = histogram.count_at_index(state.current_index);
            if state.fresh_sub_bucket {
                state.total_count_to_current_index += state.count_at_this_value;
                let value_in_slot = state
                    .count_at_this_value
                    .saturating_mul(histogram.highest_equivalent_value(state.current_value_at_index));
                state.total_value_to_current_index = state.total_value_to_current_index.saturating_add(value_in_slot);
                state.fresh_sub_bucket = false
            }
            if strategy.reached_iteration_level(state, histogram) {
                let value_iterated_to = strategy.get_value_iterated_to(state, histogram);
                let iteration_value = IterationValue {
                    value_iterated_to,
                    count_at_value_iterated_to: state.count_at_this_value,
                    value_iterated_from: state.prev_value_iterated_to,
                    count_added_in_this_iteration_step: state.total_count_to_current_index - state.total_count_to_prev_index,
                    total_count_to_this_value: state.total_count_to_current_index,
                    total_value_to_this_value: state.total_value_to_current_index,
                    percentile: (100.0 * state.total_count_to_current_index as f64) / state.array_total_count as f64,
                    percentile_level_iterated_to: strategy.get_percentile_iterated_to(state),
                };

                state.prev_value_iterated_to = value_iterated_to;
                state.total_count_to_prev_index = state.total_count_to_current_index;
                strategy.increment_iteration_level(state, histogram);

                return Ok(iteration_value);
            }
            Self::increment_sub_bucket(state, histogram);
        }
        // running off the array with has_next() true means the counts no longer add up to the
        // total taken at reset
        tracing::debug!(
            total_count = state.array_total_count,
            counted = state.total_count_to_current_index,
            "iteration ran past the counts array"
        );
        Err(IterationError::HistogramModified)
    }

    fn increment_sub_bucket(state: &mut IterationState, histogram: &T) {
        state.fresh_sub_bucket = true;
        state.current_index += 1;
        state.current_value_at_index = histogram.value_from_index(state.current_index);
        state.next_value_at_index = histogram.value_from_index(state.current_index + 1);
    }
}
