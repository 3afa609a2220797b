use serde::{Serialize, Deserialize};

/// Per-epoch statistics emitted by `sgd`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `EpochStats` value at the end of every completed epoch.
/// The full list is also returned in the `TrainingReport`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Correctly classified evaluation examples, if an evaluation set was given.
    pub correct: Option<usize>,
    /// Size of the evaluation set (0 when none was given).
    pub evaluated: usize,
    /// Mean training cost plus the L2 term, measured after the epoch's updates.
    pub train_cost: f64,
    /// Same measure over the evaluation set, if one was given.
    pub evaluation_cost: Option<f64>,
    /// Mini-batches applied during the epoch.
    pub batches: usize,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

impl EpochStats {
    /// Evaluation accuracy as a fraction in [0, 1].
    pub fn accuracy(&self) -> Option<f64> {
        match self.correct {
            Some(c) if self.evaluated > 0 => Some(c as f64 / self.evaluated as f64),
            _ => None,
        }
    }
}
