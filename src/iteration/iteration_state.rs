use crate::core::ReadableHistogram;

/// Cursor over the counts array. Owned by exactly one iterator and only advanced by it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterationState {
    pub array_total_count: u64,
    pub count_at_this_value: u64,
    pub current_index: u32,
    pub current_value_at_index: u64,
    // set when current_index moved and its count has not been added to the totals yet
    pub fresh_sub_bucket: bool,
    pub next_value_at_index: u64,
    pub prev_value_iterated_to: u64,
    pub total_count_to_prev_index: u64,
    pub total_count_to_current_index: u64,
    pub total_value_to_current_index: u64,
}

impl IterationState {
    pub fn new<T: ReadableHistogram>(histogram: &T) -> IterationState {
        IterationState {
            array_total_count: histogram.get_total_count(),
            count_at_this_value: 0,
            current_index: 0,
            current_value_at_index: 0,
            fresh_sub_bucket: true,
            next_value_at_index: histogram.value_from_index(1),
            prev_value_iterated_to: 0,
            total_count_to_prev_index: 0,
            total_count_to_current_index: 0,
            total_value_to_current_index: 0,
        }
    }

    pub fn reset<T: ReadableHistogram>(&mut self, histogram: &T) {
        *self = IterationState::new(histogram);
    }
}
