use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum CreationError {
    #[error("lowest discernible value must be at least 1")]
    LowIsZero,
    #[error("lowest discernible value must not exceed u64::MAX / 2")]
    LowGtMax,
    #[error("highest trackable value must be at least twice the lowest discernible value")]
    HighLt2Low,
    #[error("number of significant value digits must be between 0 and 5")]
    SignificantValueDigitsExceedsMax,
    #[error("cannot represent significant value digits for the given lowest discernible value")]
    CantReprSigDigitsLtLowestDiscernible,
    #[error("counts array would exceed the maximum supported length")]
    RequiresExcessiveArrayLen,
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RecordError {
    #[error("value is outside of the trackable range")]
    ValueOutOfRange,
    #[error("count at value would overflow the counter type")]
    CountOverflow,
}

/// Rejected iterator parameters. Raised by constructors and `reset`, before any traversal step.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("value units per bucket must be positive")]
    ValueUnitsIsZero,
    #[error("log base {0} does not grow the reporting level (integer part must be at least 2)")]
    LogBaseTooSmall(f64),
    #[error("percentile ticks per half distance must be positive")]
    PercentileTicksIsZero,
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum IterationError {
    #[error("iterator is exhausted")]
    Exhausted,
    #[error("histogram total count changed during iteration")]
    HistogramModified,
}

/// Malformed or unusable counts payloads. Every variant reports how many bytes were fully
/// decoded before the failure.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum DecodingError {
    #[error("payload length {length_in_bytes} exceeds the {remaining} bytes left in the buffer")]
    LengthExceedsBuffer { length_in_bytes: usize, remaining: usize },
    #[error("truncated value after {bytes_consumed} bytes")]
    TruncatedValue { bytes_consumed: usize },
    #[error("negative count {count} at index {index} after {bytes_consumed} bytes")]
    NegativeCount { index: u32, count: i64, bytes_consumed: usize },
    #[error("bucket index overflow after {bytes_consumed} bytes")]
    IndexOverflow { bytes_consumed: usize },
    #[error("payload index {index} exceeds the counts array after {bytes_consumed} bytes")]
    PayloadExceededCountsArrayLength { index: u32, bytes_consumed: usize },
    #[error("count at index {index} exceeds the counter type after {bytes_consumed} bytes")]
    CountExceedsTypeMax { index: u32, bytes_consumed: usize },
}

impl DecodingError {
    pub fn bytes_consumed(&self) -> usize {
        match *self {
            DecodingError::LengthExceedsBuffer { .. } => 0,
            DecodingError::TruncatedValue { bytes_consumed }
            | DecodingError::NegativeCount { bytes_consumed, .. }
            | DecodingError::IndexOverflow { bytes_consumed }
            | DecodingError::PayloadExceededCountsArrayLength { bytes_consumed, .. }
            | DecodingError::CountExceedsTypeMax { bytes_consumed, .. } => bytes_consumed,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SerializationError {
    #[error("value has its top bit set and cannot be zigzag encoded")]
    ValueNotLEBEncodable,
    #[error("target buffer capacity is insufficient")]
    BufferCapacityInsufficient,
}
