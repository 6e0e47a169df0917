pub mod zigzag;
pub mod counts_decoder;
pub mod counts_encoder;

pub use self::counts_decoder::{CountsDecoder, FixedWidthCountsDecoder, ZigZagCountsDecoder};
pub use self::counts_encoder::{encode_counts, get_required_byte_buffer_capacity};
