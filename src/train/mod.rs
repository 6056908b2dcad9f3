pub mod epoch_stats;
pub mod metrics;
pub mod train_config;
pub mod trainer;

pub use epoch_stats::EpochStats;
pub use metrics::{argmax, classify, evaluate, Evaluation, Prediction};
pub use train_config::TrainConfig;
pub use trainer::{TrainOutcome, Trainer, TrainerState};
