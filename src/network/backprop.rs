use crate::activation::sigmoid_prime;
use crate::cost::CostType;
use crate::data::LabeledExample;
use crate::math::matrix::Matrix;
use crate::network::gradients::Gradients;
use crate::network::network::Network;

/// Gradient of the cost of a single example with respect to every bias and
/// weight of `network`. Reads the network only.
///
/// The example's input and target lengths must match the input and output
/// layers; a mismatch is a caller bug and panics.
pub fn backprop(network: &Network, example: &LabeledExample, cost: CostType) -> Gradients {
    assert_eq!(
        example.target.len(),
        network.output_size(),
        "example target does not match the output layer"
    );

    let trace = network.forward_trace(&example.input);
    let layers = network.weights.len();

    let mut bias_grads = vec![Vec::new(); layers];
    let mut weight_grads = vec![Matrix::default(); layers];

    // Output layer: δ_L = cost'(z_L, a_L, y)
    let z_out = &trace.zs[layers - 1];
    let a_out = &trace.activations[layers];
    let mut delta: Vec<f64> = z_out.iter()
        .zip(a_out)
        .zip(&example.target)
        .map(|((&z, &a), &y)| cost.delta(z, a, y))
        .collect();

    // Walk back through the layers: ∂C/∂w = δ · a_{l-1}ᵀ, ∂C/∂b = δ,
    // then δ_{l-1} = (W_lᵀ · δ_l) ⊙ σ'(z_{l-1}).
    for l in (0..layers).rev() {
        weight_grads[l] = Matrix::outer(&delta, &trace.activations[l]);

        let next = if l > 0 {
            network.weights[l]
                .transpose_mul_vec(&delta)
                .into_iter()
                .zip(&trace.zs[l - 1])
                .map(|(sum, &z)| sum * sigmoid_prime(z))
                .collect()
        } else {
            Vec::new()
        };

        bias_grads[l] = std::mem::replace(&mut delta, next);
    }

    Gradients { biases: bias_grads, weights: weight_grads }
}
