pub mod example;
pub mod mnist;

pub use example::{LabeledExample, max_index};
pub use mnist::{load, parse_idx_pair, Split};
