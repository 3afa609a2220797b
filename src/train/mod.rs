pub mod batch;
pub mod epoch_stats;
pub mod evaluate;
pub mod train_config;
pub mod loop_fn;

pub use batch::{apply_update, batch_gradients, process_batch};
pub use epoch_stats::EpochStats;
pub use evaluate::evaluate;
pub use train_config::{TrainConfig, TrainingParameters};
pub use loop_fn::{sgd, StopReason, TrainingReport};
