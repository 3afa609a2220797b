use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use serde::{Serialize, Deserialize};

use crate::cost::CostType;
use crate::error::{Error, Result};
use crate::train::epoch_stats::EpochStats;

/// Hyperparameters for one SGD run.
///
/// - `epochs`               — full passes over the training data
/// - `batch_size`           — examples per mini-batch; the last batch of an
///                            epoch may be smaller
/// - `learning_rate`        — η
/// - `lambda`               — L2 regularization strength λ
/// - `cost`                 — cost function driving the output error
/// - `improvement_patience` — epochs without a new best evaluation score
///                            tolerated before training stops
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingParameters {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub lambda: f64,
    pub cost: CostType,
    pub improvement_patience: usize,
}

impl Default for TrainingParameters {
    fn default() -> Self {
        TrainingParameters {
            epochs: 30,
            batch_size: 10,
            learning_rate: 0.5,
            lambda: 5.0,
            cost: CostType::CrossEntropy,
            improvement_patience: 10,
        }
    }
}

impl TrainingParameters {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::InvalidParameters("batch size must be at least 1".to_owned()));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(Error::InvalidParameters(format!(
                "learning rate must be a positive number, got {}", self.learning_rate
            )));
        }
        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(Error::InvalidParameters(format!(
                "lambda must be a non-negative number, got {}", self.lambda
            )));
        }
        Ok(())
    }
}

/// Configuration for an `sgd` run.
///
/// # Fields
/// - `params`      — the hyperparameters
/// - `progress_tx` — optional channel sender; one `EpochStats` is sent per
///                   completed epoch.  If the receiver is dropped the loop
///                   stops before the next epoch.
/// - `stop_flag`   — optional atomic flag; when set to `true` from another
///                   thread the loop stops after the current epoch.
pub struct TrainConfig {
    pub params: TrainingParameters,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel and no stop flag.
    pub fn new(params: TrainingParameters) -> Self {
        TrainConfig {
            params,
            progress_tx: None,
            stop_flag: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        TrainingParameters::default().validate().unwrap();
    }

    #[test]
    fn rejects_unusable_values() {
        let bad = [
            TrainingParameters { batch_size: 0, ..Default::default() },
            TrainingParameters { learning_rate: 0.0, ..Default::default() },
            TrainingParameters { learning_rate: f64::NAN, ..Default::default() },
            TrainingParameters { lambda: -1.0, ..Default::default() },
        ];
        for params in bad {
            assert!(matches!(params.validate(), Err(Error::InvalidParameters(_))), "{:?}", params);
        }
    }
}
