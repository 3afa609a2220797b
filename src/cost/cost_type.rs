use serde::{Serialize, Deserialize};

use crate::cost::cross_entropy::CrossEntropyCost;
use crate::cost::quadratic::QuadraticCost;

/// Selects which cost function drives the output-layer error signal.
///
/// - `CrossEntropy` — converges faster on saturated sigmoid outputs; the
///   error term is `a - y`.
/// - `Quadratic`    — error term is `(a - y)·σ'(z)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CostType {
    #[default]
    CrossEntropy,
    Quadratic,
}

impl CostType {
    /// Output-layer error for one unit from its pre-activation `z`,
    /// activation `a` and target `y`.
    pub fn delta(self, z: f64, a: f64, y: f64) -> f64 {
        match self {
            CostType::CrossEntropy => CrossEntropyCost::delta(z, a, y),
            CostType::Quadratic    => QuadraticCost::delta(z, a, y),
        }
    }

    /// Scalar cost of one output vector against its target.
    pub fn value(self, activations: &[f64], targets: &[f64]) -> f64 {
        match self {
            CostType::CrossEntropy => CrossEntropyCost::value(activations, targets),
            CostType::Quadratic    => QuadraticCost::value(activations, targets),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::{sigmoid, sigmoid_prime};

    #[test]
    fn cross_entropy_delta_is_raw_difference() {
        assert_eq!(CostType::CrossEntropy.delta(3.0, 0.75, 1.0), -0.25);
    }

    #[test]
    fn quadratic_delta_folds_in_sigmoid_derivative() {
        let z = 0.4;
        let a = sigmoid(z);
        let expected = (a - 1.0) * sigmoid_prime(z);
        assert_eq!(CostType::Quadratic.delta(z, a, 1.0), expected);
    }

    #[test]
    fn cross_entropy_value_ignores_saturated_terms() {
        let c = CostType::CrossEntropy.value(&[1.0, 0.0], &[1.0, 0.0]);
        assert_eq!(c, 0.0);
    }

    #[test]
    fn quadratic_value_is_half_squared_norm() {
        assert_eq!(CostType::Quadratic.value(&[0.5, 1.0], &[1.5, 0.0]), 1.0);
    }

    #[test]
    fn serializes_as_snake_case() {
        let s = serde_json::to_string(&CostType::CrossEntropy).unwrap();
        assert_eq!(s, "\"cross_entropy\"");
    }
}
