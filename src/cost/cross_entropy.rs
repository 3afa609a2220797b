/// Cross-entropy cost for sigmoid output units.
pub struct CrossEntropyCost;

impl CrossEntropyCost {
    /// Scalar cost: sum(-y·ln(a) - (1-y)·ln(1-a))
    ///
    /// A term evaluating to NaN (0·ln 0 when `a` saturates to exactly the
    /// target) contributes zero.
    pub fn value(activations: &[f64], targets: &[f64]) -> f64 {
        activations.iter().zip(targets.iter())
            .map(|(a, y)| -y * a.ln() - (1.0 - y) * (1.0 - a).ln())
            .map(|c| if c.is_nan() { 0.0 } else { c })
            .sum()
    }

    /// Output error term: a - y. The sigmoid derivative cancels against the
    /// derivative of the cost, so `z` is unused.
    pub fn delta(_z: f64, a: f64, y: f64) -> f64 {
        a - y
    }
}
