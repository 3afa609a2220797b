use std::path::PathBuf;

use clap::Parser;
use digit_net::Split;

#[derive(Parser, Debug, Clone)]
#[command(name = "infer")]
#[command(about = "Score a trained model against an MNIST split")]
#[command(version)]
pub struct Args {
    /// Directory holding the MNIST IDX files.
    #[arg(long, default_value = "resources")]
    pub data_dir: PathBuf,

    /// Model file written by `train`.
    #[arg(long, default_value = "configs/network.json")]
    pub model: PathBuf,

    /// Dataset split to score.
    #[arg(long, value_enum, default_value_t = Split::Test)]
    pub split: Split,
}
