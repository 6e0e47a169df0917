/// Snapshot handed out by every iteration step.
///
/// `value_iterated_to` is on the value axis for every policy. The percentile policy reports its
/// level on the percentile axis in `percentile_level_iterated_to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterationValue {
    pub value_iterated_to: u64,
    pub value_iterated_from: u64,
    pub count_at_value_iterated_to: u64,
    pub count_added_in_this_iteration_step: u64,
    pub total_count_to_this_value: u64,
    /// Sum of `count * highest_equivalent_value` over the slots passed so far, saturating at
    /// `u64::MAX`.
    pub total_value_to_this_value: u64,
    pub percentile: f64,
    pub percentile_level_iterated_to: f64,
}
