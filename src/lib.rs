pub mod error;
pub mod math;
pub mod activation;
pub mod cost;
pub mod network;
pub mod data;
pub mod train;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use cost::CostType;
pub use network::{backprop, Gradients, InitScheme, Network};
pub use data::{LabeledExample, Split};
pub use train::{evaluate, sgd, StopReason, TrainConfig, TrainingParameters, TrainingReport};
