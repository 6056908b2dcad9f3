pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod data;
pub mod error;
pub mod interactive;
pub mod logging;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use network::{BackpropOrder, ModelDocument, Network};
pub use loss::mse::MseLoss;
pub use optim::sgd::Sgd;
pub use data::{DataFormat, Dataset, Sample};
pub use train::{EpochStats, TrainConfig, Trainer, TrainerState};
pub use error::{Error, Result};
