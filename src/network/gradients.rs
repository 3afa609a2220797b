use std::ops::AddAssign;

use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// Per-parameter gradients with the same shape as a network's biases and
/// weights. Built fresh for each mini-batch and dropped after the update.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub biases: Vec<Vec<f64>>,
    pub weights: Vec<Matrix>,
}

impl Gradients {
    /// Zero-filled accumulator shaped like `network`.
    pub fn zeros_like(network: &Network) -> Gradients {
        Gradients {
            biases: network.biases.iter().map(|b| vec![0.0; b.len()]).collect(),
            weights: network.weights.iter().map(|w| Matrix::zeros(w.rows, w.cols)).collect(),
        }
    }

    /// Sums two accumulators; used as the reduction step of a parallel fold.
    pub fn merge(mut self, other: Gradients) -> Gradients {
        self += &other;
        self
    }
}

impl AddAssign<&Gradients> for Gradients {
    fn add_assign(&mut self, rhs: &Gradients) {
        assert_eq!(self.biases.len(), rhs.biases.len(), "gradient layer count mismatch");
        for (b, rb) in self.biases.iter_mut().zip(&rhs.biases) {
            assert_eq!(b.len(), rb.len(), "bias gradient length mismatch");
            for (x, y) in b.iter_mut().zip(rb) {
                *x += y;
            }
        }
        for (w, rw) in self.weights.iter_mut().zip(&rhs.weights) {
            *w += rw;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_like_matches_network_shape() {
        let net = Network::zeros(&[4, 3, 2]).unwrap();
        let g = Gradients::zeros_like(&net);
        assert_eq!(g.biases.iter().map(Vec::len).collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!((g.weights[0].rows, g.weights[0].cols), (3, 4));
        assert_eq!((g.weights[1].rows, g.weights[1].cols), (2, 3));
    }

    #[test]
    fn merge_sums_elementwise() {
        let net = Network::zeros(&[2, 1]).unwrap();
        let mut a = Gradients::zeros_like(&net);
        a.biases[0][0] = 1.5;
        a.weights[0].data[0][1] = -2.0;
        let mut b = Gradients::zeros_like(&net);
        b.biases[0][0] = 0.5;
        b.weights[0].data[0][1] = 3.0;

        let sum = a.merge(b);
        assert_eq!(sum.biases[0][0], 2.0);
        assert_eq!(sum.weights[0].data[0], vec![0.0, 1.0]);
    }
}
