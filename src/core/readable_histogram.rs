use crate::core::HistogramSettings;

/// Read-only view of a populated histogram, as consumed by the iterators.
///
/// Implementors must not change their counts while an iterator borrows them; the iterators
/// only detect a changed total count.
pub trait ReadableHistogram {
    fn settings(&self) -> &HistogramSettings;
    fn array_length(&self) -> u32;
    fn get_total_count(&self) -> u64;
    /// Count at `idx`. Callers keep `idx < array_length()`.
    fn count_at_index(&self, idx: u32) -> u64;

    #[inline(always)]
    fn lowest_equivalent_value(&self, value: u64) -> u64 {
        self.settings().lowest_equivalent_value(value)
    }

    #[inline(always)]
    fn highest_equivalent_value(&self, value: u64) -> u64 {
        self.settings().highest_equivalent_value(value)
    }

    #[inline(always)]
    fn value_from_index(&self, index: u32) -> u64 {
        self.settings().value_from_index(index)
    }
}
