use serde::{Serialize, Deserialize};

/// One labelled sample: a feature vector and its one-hot target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl LabeledExample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> LabeledExample {
        LabeledExample { input, target }
    }

    /// Class index encoded by the target vector.
    pub fn label(&self) -> usize {
        max_index(&self.target)
    }
}

/// Index of the largest element. The first maximum wins ties, and an empty
/// slice yields 0.
pub fn max_index(v: &[f64]) -> usize {
    let mut best = f64::NEG_INFINITY;
    let mut index = 0;
    for (i, &x) in v.iter().enumerate() {
        if x > best {
            best = x;
            index = i;
        }
    }
    index
}
