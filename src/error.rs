use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the library reports to its caller.
///
/// Shape violations inside the training kernels are not represented here:
/// those are invariant breaks and panic through `assert!`.
#[derive(Error, Debug)]
pub enum Error {
    /// Fewer than two layers, or a layer with zero units.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// Forward propagation was given an input of the wrong length.
    #[error("input vector has length {actual}, input layer expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("cannot read dataset file '{}': {source}", path.display())]
    DatasetIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was readable but its IDX contents are malformed.
    #[error("corrupt dataset: {0}")]
    DatasetFormat(String),

    #[error("dataset mismatch: {images} images but {labels} labels")]
    DatasetMismatch { images: usize, labels: usize },

    #[error("invalid training parameters: {0}")]
    InvalidParameters(String),

    #[error("model serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
