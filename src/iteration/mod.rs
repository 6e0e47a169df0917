pub mod iteration_value;
pub mod iteration_state;
pub mod histogram_iterator;
pub mod iteration_strategy;
pub mod iterators;

pub use self::histogram_iterator::HistogramIterator;
pub use self::iteration_state::IterationState;
pub use self::iteration_strategy::IterationStrategy;
pub use self::iteration_value::IterationValue;
pub use self::iterators::*;
