use std::sync::atomic::Ordering;
use std::time::Instant;

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::data::LabeledExample;
use crate::error::{Error, Result};
use crate::network::Network;
use crate::train::batch::process_batch;
use crate::train::epoch_stats::EpochStats;
use crate::train::evaluate::evaluate;
use crate::train::train_config::TrainConfig;

/// Why a training run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Every requested epoch ran.
    EpochsExhausted,
    /// The evaluation score failed to set a new best for more than
    /// `improvement_patience` consecutive epochs.
    NoImprovement,
    /// The stop flag was raised or the progress receiver went away.
    Interrupted,
}

/// Outcome of an `sgd` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub epochs_run: usize,
    pub stop_reason: StopReason,
    /// Best evaluation score seen, if an evaluation set was given.
    pub best_score: Option<usize>,
    pub history: Vec<EpochStats>,
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` with mini-batch stochastic gradient descent.
///
/// # Arguments
/// - `network`    — mutable reference to the network; modified in place
/// - `training`   — training examples; reshuffled in place every epoch
/// - `evaluation` — optional held-out set scored after every epoch and used
///                  for early stopping; an empty slice counts as absent
/// - `config`     — hyperparameters, optional progress channel, optional stop flag
/// - `rng`        — source for the per-epoch shuffles
///
/// Each epoch is cut into contiguous mini-batches of `batch_size`; when the
/// training set is not a multiple of the batch size the final, shorter batch
/// is still applied. Batches are applied strictly in order.
///
/// # Errors
/// `InvalidParameters` for unusable hyperparameters and `DimensionMismatch`
/// when an example does not fit the network. Both are checked before the
/// first update.
pub fn sgd<R: Rng + ?Sized>(
    network: &mut Network,
    training: &mut [LabeledExample],
    evaluation: Option<&[LabeledExample]>,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainingReport> {
    let params = &config.params;
    params.validate()?;
    check_examples(network, training)?;
    let evaluation = evaluation.filter(|set| !set.is_empty());
    if let Some(set) = evaluation {
        check_examples(network, set)?;
    }

    let total = training.len();
    let mut best = 0usize;
    let mut since_best = 0usize;
    let mut history = Vec::with_capacity(params.epochs);
    let mut stop_reason = StopReason::EpochsExhausted;

    for epoch in 1..=params.epochs {
        if stop_requested(config) {
            stop_reason = StopReason::Interrupted;
            break;
        }

        let t_start = Instant::now();

        // ── One full pass over the training data ───────────────────────────
        training.shuffle(rng);
        let mut batches = 0usize;
        for batch in training.chunks(params.batch_size) {
            process_batch(network, batch, total, params);
            batches += 1;
        }
        debug!("Epoch {}: applied {} mini-batches", epoch, batches);

        // ── Evaluation ────────────────────────────────────────────────────
        let correct = evaluation.map(|set| evaluate(network, set)).transpose()?;
        let evaluated = evaluation.map_or(0, <[LabeledExample]>::len);
        let train_cost = network.total_cost(training, params.cost, params.lambda)?;
        let evaluation_cost = evaluation
            .map(|set| network.total_cost(set, params.cost, params.lambda))
            .transpose()?;

        let stats = EpochStats {
            epoch,
            total_epochs: params.epochs,
            correct,
            evaluated,
            train_cost,
            evaluation_cost,
            batches,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        match (correct, stats.accuracy(), evaluation_cost) {
            (Some(c), Some(acc), Some(cost)) => info!(
                "Epoch {} complete ({} ms), cost: {:.5}, test: {}/{} ({:.2}%), test cost: {:.5}",
                epoch, stats.elapsed_ms, train_cost, c, evaluated, acc * 100.0, cost
            ),
            _ => info!("Epoch {} complete ({} ms), cost: {:.5}", epoch, stats.elapsed_ms, train_cost),
        }

        history.push(stats.clone());

        // ── Emit progress ─────────────────────────────────────────────────
        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                stop_reason = StopReason::Interrupted;
                break;
            }
        }

        // ── Early stopping ────────────────────────────────────────────────
        if let Some(c) = correct {
            if c > best {
                best = c;
                since_best = 0;
            } else {
                since_best += 1;
                if since_best > params.improvement_patience {
                    info!("No improvement in {} epochs, stopping", since_best);
                    stop_reason = StopReason::NoImprovement;
                    break;
                }
            }
        }
    }

    Ok(TrainingReport {
        epochs_run: history.len(),
        stop_reason,
        best_score: evaluation.map(|_| best),
        history,
    })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config.stop_flag.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Every input must fit the input layer and every target the output layer.
fn check_examples(network: &Network, data: &[LabeledExample]) -> Result<()> {
    for example in data {
        if example.input.len() != network.input_size() {
            return Err(Error::DimensionMismatch { expected: network.input_size(), actual: example.input.len() });
        }
        if example.target.len() != network.output_size() {
            return Err(Error::DimensionMismatch { expected: network.output_size(), actual: example.target.len() });
        }
    }
    Ok(())
}
