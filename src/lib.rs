//! Traversal and compact counts decoding for HdrHistogram.
//!
//! Iterators walk a histogram's counts array once and stop wherever their strategy says:
//! at logarithmically growing values, at percentiles approaching 100%, at linear value steps,
//! at every recorded bucket or at every bucket. Counts decoders turn V2 (ZigZag LEB128) and
//! fixed width counts payloads back into `(index, count)` pairs.
//!
//! ```
//! use hdr_traverse::st::Histogram;
//!
//! let mut histogram = Histogram::<u64>::with_high_sigvdig(3_600_000_000, 3).unwrap();
//! histogram.record_value(10).unwrap();
//! histogram.record_value(1000).unwrap();
//!
//! let levels: Vec<u64> = histogram
//!     .logarithmic_bucket_values(10, 2.0)
//!     .unwrap()
//!     .map(|v| v.value_iterated_to)
//!     .collect();
//! assert_eq!(levels, vec![10, 20, 40, 80, 160, 320, 640, 1280]);
//! ```

#[macro_use]
mod core;
pub mod st;
pub mod iteration;
pub mod serialization;

pub use crate::core::errors::*;
pub use crate::core::{Counter, HistogramSettings, ReadableHistogram};

#[cfg(test)]
pub mod tests;
