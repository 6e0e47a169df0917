pub mod histogram;

pub use self::histogram::Histogram;
