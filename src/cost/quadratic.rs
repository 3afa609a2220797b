use crate::activation::sigmoid_prime;

/// Quadratic (mean-squared style) cost.
pub struct QuadraticCost;

impl QuadraticCost {
    /// Scalar cost: ½·‖a - y‖²
    pub fn value(activations: &[f64], targets: &[f64]) -> f64 {
        0.5 * activations.iter().zip(targets.iter())
            .map(|(a, y)| (a - y).powi(2))
            .sum::<f64>()
    }

    /// Output error term: (a - y)·σ'(z)
    pub fn delta(z: f64, a: f64, y: f64) -> f64 {
        (a - y) * sigmoid_prime(z)
    }
}
