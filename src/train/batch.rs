use rayon::prelude::*;

use crate::data::LabeledExample;
use crate::network::{backprop, Gradients, Network};
use crate::train::train_config::TrainingParameters;

/// Sums the backprop gradients of every example in `batch`.
///
/// Examples are processed in parallel against a shared read-only view of the
/// network. Each rayon job folds into its own accumulator and the partial
/// sums are reduced pairwise, so the result depends only on the set of
/// examples up to floating-point reassociation.
pub fn batch_gradients(network: &Network, batch: &[LabeledExample], params: &TrainingParameters) -> Gradients {
    batch
        .par_iter()
        .fold(
            || Gradients::zeros_like(network),
            |mut acc, example| {
                acc += &backprop(network, example, params.cost);
                acc
            },
        )
        .reduce(|| Gradients::zeros_like(network), Gradients::merge)
}

/// Applies one regularized gradient-descent step from summed gradients.
///
/// ```text
/// b ← b - (η/m)·∇b
/// w ← (1 - η·λ/n)·w - (η/m)·∇w
/// ```
/// where `m` is the batch size and `n` the full training-set size. Biases
/// are not decayed.
pub fn apply_update(
    network: &mut Network,
    grads: &Gradients,
    batch_size: usize,
    total_size: usize,
    params: &TrainingParameters,
) {
    assert!(batch_size > 0, "cannot apply an update from an empty batch");
    assert!(total_size >= batch_size, "training set is smaller than the batch");

    let step = params.learning_rate / batch_size as f64;
    let decay = 1.0 - params.learning_rate * (params.lambda / total_size as f64);

    for (b, gb) in network.biases.iter_mut().zip(&grads.biases) {
        assert_eq!(b.len(), gb.len(), "bias gradient shape mismatch");
        for (x, g) in b.iter_mut().zip(gb) {
            *x -= step * g;
        }
    }

    for (w, gw) in network.weights.iter_mut().zip(&grads.weights) {
        assert_eq!((w.rows, w.cols), (gw.rows, gw.cols), "weight gradient shape mismatch");
        for (row, grow) in w.data.iter_mut().zip(&gw.data) {
            for (x, g) in row.iter_mut().zip(grow) {
                *x = decay * *x - step * g;
            }
        }
    }
}

/// Updates `network` with one mini-batch. All per-example gradients are
/// computed before the network is touched.
pub fn process_batch(
    network: &mut Network,
    batch: &[LabeledExample],
    total_size: usize,
    params: &TrainingParameters,
) {
    let grads = batch_gradients(network, batch, params);
    apply_update(network, &grads, batch.len(), total_size, params);
}
