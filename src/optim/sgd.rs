use crate::network::{backprop::BackpropOrder, network::Network};

/// Plain per-example gradient descent.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
    pub order: BackpropOrder,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate, order: BackpropOrder::default() }
    }

    pub fn with_order(mut self, order: BackpropOrder) -> Sgd {
        self.order = order;
        self
    }

    /// Applies one weight update for `target` to a network that has just run
    /// `forward` on the matching input. Returns that example's squared error.
    pub fn step(&self, network: &mut Network, target: &[f64]) -> f64 {
        network.backpropagate_with(target, self.learning_rate, self.order)
    }
}
