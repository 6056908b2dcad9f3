use crate::network::backprop::BackpropOrder;

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
/// Training stops once the validation MSE drops below this.
pub const ERROR_THRESHOLD: f64 = 0.01;

/// Configuration for a `Trainer` run.
///
/// # Fields
/// - `learning_rate`   — gradient-descent step size
/// - `error_threshold` — validation MSE below which training has converged
/// - `max_epochs`      — optional cap; `None` trains until convergence
/// - `order`           — update order inside backpropagation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub error_threshold: f64,
    pub max_epochs: Option<usize>,
    pub order: BackpropOrder,
}

impl TrainConfig {
    pub fn new(learning_rate: f64) -> Self {
        TrainConfig {
            learning_rate,
            ..TrainConfig::default()
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            learning_rate: DEFAULT_LEARNING_RATE,
            error_threshold: ERROR_THRESHOLD,
            max_epochs: None,
            order: BackpropOrder::UpdatedWeights,
        }
    }
}
