#[macro_use]
pub mod util;
pub mod errors;
pub mod histogram_settings;
pub mod constants;
pub mod counter;
pub mod readable_histogram;

pub use self::counter::Counter;

pub use self::errors::*;
pub use self::histogram_settings::HistogramSettings;
pub use self::readable_histogram::ReadableHistogram;
