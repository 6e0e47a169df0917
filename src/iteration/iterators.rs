use crate::core::{ConfigurationError, IterationError, ReadableHistogram};
use crate::iteration::*;
use crate::iteration::histogram_iterator::HistogramIterator;
use crate::iteration::iteration_strategy::*;

/// Newtype wrappers for HistogramIterator with concrete strategies

macro_rules! delegate_iterator {
    ($name:ident) => {
        impl<'a, T: 'a + ReadableHistogram> $name<'a, T> {
            /// True while another step can be produced. Does not advance.
            pub fn has_next(&self) -> bool {
                self.0.has_next()
            }

            /// Produces the next step, failing with `IterationError::Exhausted` past the end.
            pub fn next_value(&mut self) -> Result<IterationValue, IterationError> {
                self.0.next_value()
            }
        }

        /// Ends with `None` both when exhausted and when the histogram's total count changed since
        /// the last reset. Use `next_value` to tell the two apart.
        impl<'a, T: 'a + ReadableHistogram> Iterator for $name<'a, T> {
            type Item = IterationValue;
            fn next(&mut self) -> Option<IterationValue> {
                match self.0.next_value() {
                    Ok(value) => Some(value),
                    Err(IterationError::Exhausted) => None,
                    Err(IterationError::HistogramModified) => {
                        tracing::warn!(iterator = stringify!($name), "histogram changed during iteration, ending early");
                        None
                    }
                }
            }
        }
    };
}

pub struct AllValuesIterator<'a, T: 'a>(HistogramIterator<'a, T, AllValuesStrategy>);

impl<'a, T: 'a + ReadableHistogram> AllValuesIterator<'a, T> {
    pub fn new(histogram: &'a T) -> AllValuesIterator<'a, T> {
        AllValuesIterator(HistogramIterator::new(histogram, AllValuesStrategy::new()))
    }
    pub fn reset(&mut self) {
        let histogram = self.0.histogram();
        self.reset_with(histogram);
    }
    pub fn reset_with(&mut self, histogram: &'a T) {
        self.0.reset(histogram, AllValuesStrategy::new());
    }
}

delegate_iterator!(AllValuesIterator);

pub struct RecordedValuesIterator<'a, T: 'a>(HistogramIterator<'a, T, RecordedValuesStrategy>);

impl<'a, T: 'a + ReadableHistogram> RecordedValuesIterator<'a, T> {
    pub fn new(histogram: &'a T) -> RecordedValuesIterator<'a, T> {
        RecordedValuesIterator(HistogramIterator::new(histogram, RecordedValuesStrategy::new()))
    }
    pub fn reset(&mut self) {
        let histogram = self.0.histogram();
        self.reset_with(histogram);
    }
    pub fn reset_with(&mut self, histogram: &'a T) {
        self.0.reset(histogram, RecordedValuesStrategy::new());
    }
}

delegate_iterator!(RecordedValuesIterator);

pub struct LinearIterator<'a, T: 'a>(HistogramIterator<'a, T, LinearStrategy>);

impl<'a, T: 'a + ReadableHistogram> LinearIterator<'a, T> {
    pub fn new(histogram: &'a T, value_units_per_bucket: u64) -> Result<LinearIterator<'a, T>, ConfigurationError> {
        let strategy = LinearStrategy::new(histogram, value_units_per_bucket)?;
        Ok(LinearIterator(HistogramIterator::new(histogram, strategy)))
    }
    pub fn reset(&mut self, value_units_per_bucket: u64) -> Result<(), ConfigurationError> {
        let histogram = self.0.histogram();
        self.reset_with(histogram, value_units_per_bucket)
    }
    pub fn reset_with(&mut self, histogram: &'a T, value_units_per_bucket: u64) -> Result<(), ConfigurationError> {
        let strategy = LinearStrategy::new(histogram, value_units_per_bucket)?;
        self.0.reset(histogram, strategy);
        Ok(())
    }
}

delegate_iterator!(LinearIterator);

/// Steps through value levels `value_units_in_first_bucket * floor(log_base)^n`, each step
/// covering the values up to and including its level.
pub struct LogarithmicIterator<'a, T: 'a>(HistogramIterator<'a, T, LogarithmicStrategy>);

impl<'a, T: 'a + ReadableHistogram> LogarithmicIterator<'a, T> {
    pub fn new(
        histogram: &'a T,
        value_units_in_first_bucket: u64,
        log_base: f64,
    ) -> Result<LogarithmicIterator<'a, T>, ConfigurationError> {
        let strategy = LogarithmicStrategy::new(histogram, value_units_in_first_bucket, log_base)?;
        tracing::trace!(value_units_in_first_bucket, log_base, "created logarithmic iterator");
        Ok(LogarithmicIterator(HistogramIterator::new(histogram, strategy)))
    }

    pub fn reset(&mut self, value_units_in_first_bucket: u64, log_base: f64) -> Result<(), ConfigurationError> {
        let histogram = self.0.histogram();
        self.reset_with(histogram, value_units_in_first_bucket, log_base)
    }

    pub fn reset_with(
        &mut self,
        histogram: &'a T,
        value_units_in_first_bucket: u64,
        log_base: f64,
    ) -> Result<(), ConfigurationError> {
        let strategy = LogarithmicStrategy::new(histogram, value_units_in_first_bucket, log_base)?;
        self.0.reset(histogram, strategy);
        Ok(())
    }
}

delegate_iterator!(LogarithmicIterator);

/// Steps through percentile levels that approach 100% in halving distances, ending with one
/// step at exactly 100% whenever anything was recorded.
pub struct PercentileIterator<'a, T: 'a>(HistogramIterator<'a, T, PercentileStrategy>);

impl<'a, T: 'a + ReadableHistogram> PercentileIterator<'a, T> {
    pub fn new(histogram: &'a T, percentile_ticks_per_half_distance: u32) -> Result<PercentileIterator<'a, T>, ConfigurationError> {
        let strategy = PercentileStrategy::new(percentile_ticks_per_half_distance)?;
        tracing::trace!(percentile_ticks_per_half_distance, "created percentile iterator");
        Ok(PercentileIterator(HistogramIterator::new(histogram, strategy)))
    }
    pub fn reset(&mut self, percentile_ticks_per_half_distance: u32) -> Result<(), ConfigurationError> {
        let histogram = self.0.histogram();
        self.reset_with(histogram, percentile_ticks_per_half_distance)
    }
    pub fn reset_with(&mut self, histogram: &'a T, percentile_ticks_per_half_distance: u32) -> Result<(), ConfigurationError> {
        let strategy = PercentileStrategy::new(percentile_ticks_per_half_distance)?;
        self.0.reset(histogram, strategy);
        Ok(())
    }
}

delegate_iterator!(PercentileIterator);
