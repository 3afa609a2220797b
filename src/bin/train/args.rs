use std::path::PathBuf;

use clap::Parser;
use digit_net::CostType;

#[derive(Parser, Debug, Clone)]
#[command(name = "train")]
#[command(about = "Train a sigmoid MLP on MNIST with mini-batch SGD")]
#[command(version)]
pub struct Args {
    /// Directory holding the MNIST IDX files.
    #[arg(long, default_value = "resources")]
    pub data_dir: PathBuf,

    /// Where the trained model is written.
    #[arg(long, default_value = "configs/network.json")]
    pub model: PathBuf,

    /// Hidden layer sizes, input to output.
    #[arg(long, value_delimiter = ',', default_value = "30")]
    pub hidden: Vec<usize>,

    /// Maximum number of training epochs.
    #[arg(long, default_value_t = 30)]
    pub epochs: usize,

    /// Number of examples per mini-batch.
    #[arg(long, default_value_t = 10)]
    pub batch_size: usize,

    /// Learning rate (eta).
    #[arg(long, default_value_t = 0.5)]
    pub learning_rate: f64,

    /// L2 regularization strength (lambda).
    #[arg(long, default_value_t = 5.0)]
    pub lambda: f64,

    /// Cost function used for the output error.
    #[arg(long, value_enum, default_value_t = CostType::CrossEntropy)]
    pub cost: CostType,

    /// Epochs without a new best test score before stopping.
    #[arg(long, default_value_t = 10)]
    pub patience: usize,

    /// Examples from the training split used for training; the rest are
    /// held out for per-epoch evaluation.
    #[arg(long, default_value_t = 50_000)]
    pub train_size: usize,

    /// Skip per-epoch evaluation (and therefore early stopping).
    #[arg(long)]
    pub no_test: bool,

    /// Draw weights from N(0, 1) instead of N(0, 1/fan-in).
    #[arg(long)]
    pub unscaled_init: bool,

    /// Seed for initialization and shuffling; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write per-epoch timing statistics as JSON to this file.
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long, short)]
    pub verbose: bool,
}
