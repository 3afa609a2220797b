use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::sigmoid;
use crate::cost::CostType;
use crate::data::LabeledExample;
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// How initial weights are drawn. Biases are always N(0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitScheme {
    /// Weights from N(0, 1).
    Standard,
    /// Weights from N(0, 1) divided by sqrt(fan-in), which keeps hidden
    /// units out of sigmoid saturation on wide inputs.
    #[default]
    Scaled,
}

/// Fully-connected sigmoid network.
///
/// Layer 0 is the input layer and carries no parameters. For every later
/// layer `l`, `biases[l - 1]` has `sizes[l]` entries and `weights[l - 1]`
/// is a `sizes[l] × sizes[l - 1]` matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub(crate) sizes: Vec<usize>,
    pub(crate) biases: Vec<Vec<f64>>,
    pub(crate) weights: Vec<Matrix>,
}

/// Pre-activations and activations recorded by a forward pass.
/// `activations[0]` is the input; `zs[l]` feeds `activations[l + 1]`.
pub(crate) struct ForwardTrace {
    pub zs: Vec<Vec<f64>>,
    pub activations: Vec<Vec<f64>>,
}

impl Network {
    /// Builds a network with randomly drawn parameters, e.g. `&[784, 30, 10]`.
    pub fn new<R: Rng + ?Sized>(sizes: &[usize], init: InitScheme, rng: &mut R) -> Result<Network> {
        check_sizes(sizes)?;

        let biases = sizes[1..].iter()
            .map(|&n| (0..n).map(|_| Matrix::sample_standard_normal(rng)).collect())
            .collect();

        let weights = sizes.windows(2)
            .map(|pair| {
                let (fan_in, fan_out) = (pair[0], pair[1]);
                let scale = match init {
                    InitScheme::Standard => 1.0,
                    InitScheme::Scaled => 1.0 / (fan_in as f64).sqrt(),
                };
                Matrix::random_normal(fan_out, fan_in, scale, rng)
            })
            .collect();

        Ok(Network { sizes: sizes.to_vec(), biases, weights })
    }

    /// Builds a network from explicit parameters, checking every shape.
    pub fn from_parameters(sizes: Vec<usize>, biases: Vec<Vec<f64>>, weights: Vec<Matrix>) -> Result<Network> {
        let network = Network { sizes, biases, weights };
        network.validate()?;
        Ok(network)
    }

    /// Network of the given topology with every weight and bias set to zero.
    pub fn zeros(sizes: &[usize]) -> Result<Network> {
        check_sizes(sizes)?;
        Ok(Network {
            sizes: sizes.to_vec(),
            biases: sizes[1..].iter().map(|&n| vec![0.0; n]).collect(),
            weights: sizes.windows(2).map(|p| Matrix::zeros(p[1], p[0])).collect(),
        })
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn biases(&self) -> &[Vec<f64>] {
        &self.biases
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn input_size(&self) -> usize {
        self.sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    /// Runs the input through every layer and returns the output activations.
    pub fn feed_forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_size() {
            return Err(Error::DimensionMismatch { expected: self.input_size(), actual: input.len() });
        }

        let mut current = input.to_vec();
        for (w, b) in self.weights.iter().zip(&self.biases) {
            current = weighted_input(w, b, &current).into_iter().map(sigmoid).collect();
        }
        Ok(current)
    }

    /// Forward pass that keeps every intermediate vector for backprop.
    /// The caller guarantees `input.len() == self.input_size()`.
    pub(crate) fn forward_trace(&self, input: &[f64]) -> ForwardTrace {
        assert_eq!(input.len(), self.input_size(), "example input does not match the input layer");

        let mut zs = Vec::with_capacity(self.weights.len());
        let mut activations = Vec::with_capacity(self.sizes.len());
        activations.push(input.to_vec());

        for (w, b) in self.weights.iter().zip(&self.biases) {
            let z = weighted_input(w, b, &activations[activations.len() - 1]);
            activations.push(z.iter().copied().map(sigmoid).collect());
            zs.push(z);
        }

        ForwardTrace { zs, activations }
    }

    /// Mean cost over `data` plus the L2 penalty ½·(λ/n)·Σw².
    pub fn total_cost(&self, data: &[LabeledExample], cost: CostType, lambda: f64) -> Result<f64> {
        if data.is_empty() {
            return Ok(0.0);
        }
        let n = data.len() as f64;
        let mut total = 0.0;
        for example in data {
            let output = self.feed_forward(&example.input)?;
            total += cost.value(&output, &example.target) / n;
        }
        let squared: f64 = self.weights.iter().map(Matrix::sum_of_squares).sum();
        Ok(total + 0.5 * (lambda / n) * squared)
    }

    /// Checks the layer sizes and that every parameter tensor matches them.
    pub fn validate(&self) -> Result<()> {
        check_sizes(&self.sizes)?;

        let layers = self.sizes.len() - 1;
        if self.biases.len() != layers || self.weights.len() != layers {
            return Err(Error::InvalidTopology(format!(
                "{} layer sizes need {} bias vectors and weight matrices, got {} and {}",
                self.sizes.len(), layers, self.biases.len(), self.weights.len()
            )));
        }

        for l in 0..layers {
            let (fan_in, fan_out) = (self.sizes[l], self.sizes[l + 1]);
            if self.biases[l].len() != fan_out {
                return Err(Error::InvalidTopology(format!(
                    "layer {} has {} units but {} biases", l + 1, fan_out, self.biases[l].len()
                )));
            }
            let w = &self.weights[l];
            if w.rows != fan_out || w.cols != fan_in || !w.is_consistent() {
                return Err(Error::InvalidTopology(format!(
                    "layer {} weights must be {}x{}, got {}x{}", l + 1, fan_out, fan_in, w.rows, w.cols
                )));
            }
        }
        Ok(())
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let network: Network = serde_json::from_reader(reader)?;
        network.validate()?;
        Ok(network)
    }
}

/// z = W·a + b
fn weighted_input(w: &Matrix, b: &[f64], a: &[f64]) -> Vec<f64> {
    w.mul_vec(a).into_iter().zip(b).map(|(wa, b)| wa + b).collect()
}

fn check_sizes(sizes: &[usize]) -> Result<()> {
    if sizes.len() < 2 {
        return Err(Error::InvalidTopology(format!(
            "need at least an input and an output layer, got {} layer(s)", sizes.len()
        )));
    }
    if let Some(l) = sizes.iter().position(|&n| n == 0) {
        return Err(Error::InvalidTopology(format!("layer {} has no units", l)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn new_builds_parameters_of_the_right_shape() {
        let net = Network::new(&[784, 30, 10], InitScheme::Scaled, &mut rng()).unwrap();
        assert_eq!(net.biases().len(), 2);
        assert_eq!(net.biases()[0].len(), 30);
        assert_eq!((net.weights()[0].rows, net.weights()[0].cols), (30, 784));
        assert_eq!((net.weights()[1].rows, net.weights()[1].cols), (10, 30));
        net.validate().unwrap();
    }

    #[test]
    fn rejects_degenerate_topologies() {
        assert!(matches!(Network::new(&[5], InitScheme::Standard, &mut rng()), Err(Error::InvalidTopology(_))));
        assert!(matches!(Network::new(&[], InitScheme::Standard, &mut rng()), Err(Error::InvalidTopology(_))));
        assert!(matches!(Network::new(&[3, 0, 2], InitScheme::Standard, &mut rng()), Err(Error::InvalidTopology(_))));
    }

    #[test]
    fn same_seed_gives_same_network() {
        let a = Network::new(&[4, 3, 2], InitScheme::Standard, &mut rng()).unwrap();
        let b = Network::new(&[4, 3, 2], InitScheme::Standard, &mut rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn scaled_init_shrinks_weights_by_fan_in() {
        let std_net = Network::new(&[400, 20], InitScheme::Standard, &mut rng()).unwrap();
        let scaled = Network::new(&[400, 20], InitScheme::Scaled, &mut rng()).unwrap();
        let ratio = std_net.weights()[0].data[3][7] / scaled.weights()[0].data[3][7];
        assert!((ratio - 20.0).abs() < 1e-9);
    }

    #[test]
    fn feed_forward_rejects_wrong_input_length() {
        let net = Network::zeros(&[3, 2]).unwrap();
        for bad in [vec![], vec![1.0, 2.0], vec![1.0, 2.0, 3.0, 4.0]] {
            match net.feed_forward(&bad) {
                Err(Error::DimensionMismatch { expected, actual }) => {
                    assert_eq!(expected, 3);
                    assert_eq!(actual, bad.len());
                }
                other => panic!("expected DimensionMismatch, got {:?}", other),
            }
        }
    }

    #[test]
    fn feed_forward_matches_hand_computation() {
        let net = Network::from_parameters(
            vec![2, 2, 1],
            vec![vec![0.1, -0.2], vec![0.3]],
            vec![
                Matrix::from_data(vec![vec![0.5, -1.0], vec![2.0, 0.25]]),
                Matrix::from_data(vec![vec![1.5, -0.5]]),
            ],
        ).unwrap();

        let input = [0.0, 1.0];
        let h0 = sigmoid(0.5 * 0.0 + -1.0 * 1.0 + 0.1);
        let h1 = sigmoid(2.0 * 0.0 + 0.25 * 1.0 - 0.2);
        let out = sigmoid(1.5 * h0 - 0.5 * h1 + 0.3);

        let got = net.feed_forward(&input).unwrap();
        assert_eq!(got.len(), 1);
        assert!((got[0] - out).abs() < 1e-9);
    }

    #[test]
    fn forward_trace_agrees_with_feed_forward() {
        let net = Network::new(&[3, 4, 2], InitScheme::Standard, &mut rng()).unwrap();
        let input = [0.2, 0.7, 0.1];
        let trace = net.forward_trace(&input);
        assert_eq!(trace.activations.len(), 3);
        assert_eq!(trace.zs.len(), 2);
        assert_eq!(trace.activations[2], net.feed_forward(&input).unwrap());
    }

    #[test]
    fn from_parameters_rejects_misshaped_weights() {
        let res = Network::from_parameters(
            vec![2, 1],
            vec![vec![0.0]],
            vec![Matrix::zeros(2, 1)],
        );
        assert!(matches!(res, Err(Error::InvalidTopology(_))));
    }

    #[test]
    fn json_round_trip_is_exact() {
        let net = Network::new(&[6, 5, 3], InitScheme::Standard, &mut rng()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        net.save_json(&path).unwrap();
        let loaded = Network::load_json(&path).unwrap();
        assert_eq!(net, loaded);
    }

    #[test]
    fn load_json_validates_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(
            &path,
            r#"{"sizes":[2,1],"biases":[[0.0,0.0]],"weights":[{"rows":1,"cols":2,"data":[[0.0,0.0]]}]}"#,
        ).unwrap();
        assert!(matches!(Network::load_json(&path), Err(Error::InvalidTopology(_))));
    }

    #[test]
    fn total_cost_adds_l2_penalty() {
        let mut net = Network::zeros(&[1, 1]).unwrap();
        net.weights[0].data[0][0] = 2.0;
        let data = vec![LabeledExample::new(vec![0.0], vec![0.5])];
        // output is sigmoid(0) = 0.5, so the quadratic term vanishes
        let c = net.total_cost(&data, CostType::Quadratic, 1.0).unwrap();
        assert!((c - 2.0).abs() < 1e-12);
    }
}
