use crate::core::{Counter, RecordError};
use crate::st::Histogram;
use crate::tests::consts::*;
use crate::tests::util::*;

fn verify_max_value<T: Counter>(histogram: &Histogram<T>) {
    let mut computed_max_value = 0;
    for i in 0..histogram.counts_array_length() {
        if histogram.get_count_at_index(i).unwrap() > T::zero() {
            computed_max_value = histogram.value_from_index(i);
        }
    }
    computed_max_value = if computed_max_value == 0 {
        0
    } else {
        histogram.highest_equivalent_value(computed_max_value)
    };
    assert_eq!(computed_max_value, histogram.get_max_value());
}

#[test]
fn empty_histogram() {
    let h = Histogram::<u64>::new(SIG_V_DIGITS).unwrap();
    assert_eq!(h.get_min_value(), 0);
    assert_eq!(h.get_max_value(), 0);
    assert_approx_eq!(h.get_mean(), 0.0, 0.00000001);
    assert_approx_eq!(h.get_std_deviation(), 0.0, 0.00000001);
    assert_approx_eq!(h.get_percentile_at_or_below_value(0), 100.0, 0.0000001);
}

#[test]
fn record_value_out_of_range_is_rejected() {
    let mut histogram = Histogram::<u64>::with_high_sigvdig(HIGHEST_TRACKABLE, SIG_V_DIGITS).unwrap();
    assert_eq!(Err(RecordError::ValueOutOfRange), histogram.record_value(u64::MAX));
    assert_eq!(0, histogram.get_total_count());
}

#[test]
fn record_value_with_count_detects_counter_overflow() {
    let mut histogram = Histogram::<u16>::with_high_sigvdig(HIGHEST_TRACKABLE, SIG_V_DIGITS).unwrap();
    succ!(histogram.record_value_with_count(100, u16::MAX));
    assert_eq!(Err(RecordError::CountOverflow), histogram.record_value(100));
    assert_eq!(u64::from(u16::MAX), histogram.get_total_count());
}

#[test]
fn record_value_with_expected_interval() {
    let mut histogram = Histogram::<u64>::with_high_sigvdig(HIGHEST_TRACKABLE, SIG_V_DIGITS).unwrap();
    succ!(histogram.record_value_with_expected_interval(TEST_VALUE_LEVEL, TEST_VALUE_LEVEL / 4));

    for quarter in 1..5 {
        assert_eq!(Some(1), histogram.get_count_at_value((TEST_VALUE_LEVEL * quarter) / 4));
    }
    assert_eq!(4, histogram.get_total_count());
    verify_max_value(&histogram);
}

#[test]
fn various_stats() {
    let histogram = raw_stat_histo();
    assert_eq!(10001, histogram.get_total_count());
    assert_eq!(1000, histogram.get_min_value());
    assert!(histogram.values_are_equivalent(100000000, histogram.get_max_value()));
    assert_eq!(1000, histogram.get_value_at_percentile(50.0));
    assert_eq!(1000, histogram.get_value_at_percentile(99.99));
    assert!(histogram.values_are_equivalent(100000000, histogram.get_value_at_percentile(100.0)));

    let expected_mean = (1000.0 * 10000.0 + 100000000.0) / 10001.0;
    assert_approx_eq!(histogram.get_mean(), expected_mean, expected_mean * 0.001);
    verify_max_value(&histogram);
}

#[test]
fn percentile_at_or_below_value() {
    let histogram = histo_with_values(&[1, 2, 3, 4]);
    assert_approx_eq!(histogram.get_percentile_at_or_below_value(2), 50.0, 0.0001);
    assert_approx_eq!(histogram.get_percentile_at_or_below_value(4), 100.0, 0.0001);
    assert_approx_eq!(histogram.get_percentile_at_or_below_value(u64::MAX), 100.0, 0.0001);
}

#[test]
fn reset() {
    let mut histogram = raw_stat_histo();
    histogram.reset();
    assert_eq!(0, histogram.get_total_count());
    assert_eq!(0, histogram.get_max_value());
    assert_eq!(None, histogram.recorded_values().next());
}

#[test]
fn set_count_at_index_then_establish_tracking_values() {
    let mut histogram = Histogram::<u32>::with_high_sigvdig(HIGHEST_TRACKABLE, SIG_V_DIGITS).unwrap();
    succ!(histogram.set_count_at_index(5, 3));
    succ!(histogram.set_count_at_index(2000, 1));
    assert_eq!(
        Err(RecordError::ValueOutOfRange),
        histogram.set_count_at_index(histogram.counts_array_length(), 1)
    );
    histogram.establish_internal_tracking_values();

    assert_eq!(4, histogram.get_total_count());
    assert_eq!(5, histogram.get_min_non_zero_value());
    assert_eq!(2000, histogram.get_max_value());
    verify_max_value(&histogram);
}
