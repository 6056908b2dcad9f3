/// Statistics reported at every epoch boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Mean per-sample squared error over the epoch's training updates.
    pub train_mse: f64,
    /// Mean per-sample squared error over the validation set.
    pub validation_mse: f64,
    /// Validation samples whose predicted class matched the target class.
    pub correct: usize,
    /// Size of the validation set.
    pub total: usize,
}

impl EpochStats {
    pub fn accuracy_percent(&self) -> f64 {
        self.correct as f64 / self.total as f64 * 100.0
    }
}
