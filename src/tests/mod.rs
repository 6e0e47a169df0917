#[macro_use]
pub mod util;
pub mod histogram;
pub mod serialization;
