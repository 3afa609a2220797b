use rayon::prelude::*;

use crate::data::{max_index, LabeledExample};
use crate::error::Result;
use crate::network::Network;

/// Number of examples whose highest output unit matches the hot index of
/// the target. Ties resolve to the lowest index.
pub fn evaluate(network: &Network, data: &[LabeledExample]) -> Result<usize> {
    data.par_iter()
        .map(|example| -> Result<usize> {
            let output = network.feed_forward(&example.input)?;
            Ok(usize::from(max_index(&output) == example.label()))
        })
        .sum()
}
