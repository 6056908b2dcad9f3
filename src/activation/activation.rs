use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Activation applied by every unit of a layer.
///
/// Serialized in lowercase, which is also the `activation` field of an
/// exported model document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationFunction {
    /// Pass-through; used for the input layer.
    Linear,
    /// σ(x) = 1 / (1 + e^-x)
    Logistic,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Linear => x,
            ActivationFunction::Logistic => 1.0 / (1.0 + E.powf(-x)),
        }
    }

    /// Derivative expressed in terms of the unit's output `y = function(x)`.
    /// Backpropagation only keeps activations, never the weighted sums.
    pub fn derivative(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Linear => 1.0,
            ActivationFunction::Logistic => y * (1.0 - y),
        }
    }
}
