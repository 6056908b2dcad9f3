use crate::loss::mse::MseLoss;
use crate::network::network::Network;

/// Which output weights the hidden-layer deltas are computed from.
///
/// Both orders descend the error surface; they diverge numerically after the
/// first update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackpropOrder {
    /// Output weights are updated first and the hidden deltas read the
    /// updated values.
    #[default]
    UpdatedWeights,
    /// Hidden deltas read the output weights as they were during the forward
    /// pass (textbook backpropagation).
    SnapshotWeights,
}

impl Network {
    /// One gradient-descent step on squared error for `target`, using the
    /// activations left by the preceding [`Network::forward`] call.
    ///
    /// Returns the sum of squared errors of that forward pass.
    pub fn backpropagate(&mut self, target: &[f64], learning_rate: f64) -> f64 {
        self.backpropagate_with(target, learning_rate, BackpropOrder::UpdatedWeights)
    }

    /// Like [`Network::backpropagate`] with an explicit update order.
    ///
    /// # Panics
    /// Panics if `target.len() != output_size`.
    pub fn backpropagate_with(
        &mut self,
        target: &[f64],
        learning_rate: f64,
        order: BackpropOrder,
    ) -> f64 {
        let outputs = self.output_size();
        let hiddens = self.hidden_size();
        let inputs = self.input_size();
        assert_eq!(target.len(), outputs, "target length must equal output_size");

        let sse = MseLoss::sse(&self.output_activation, target);

        // δo = σ'(yo) · ∂E/∂yo
        let error = MseLoss::derivative(&self.output_activation, target);
        let output_deltas: Vec<f64> = self.output_activation.iter().zip(error.iter())
            .map(|(&y, &e)| Network::OUTPUT_ACTIVATION.derivative(y) * e)
            .collect();

        let snapshot = match order {
            BackpropOrder::SnapshotWeights => Some(self.output_weights.clone()),
            BackpropOrder::UpdatedWeights => None,
        };

        // Bias row included: hidden_activation[hiddens] == 1.0
        for h in 0..=hiddens {
            for o in 0..outputs {
                self.output_weights[(h, o)] -=
                    learning_rate * (output_deltas[o] * self.hidden_activation[h]);
            }
        }

        let weights = snapshot.as_ref().unwrap_or(&self.output_weights);
        let hidden_deltas: Vec<f64> = (0..hiddens)
            .map(|h| {
                let back: f64 = (0..outputs).map(|o| output_deltas[o] * weights[(h, o)]).sum();
                Network::HIDDEN_ACTIVATION.derivative(self.hidden_activation[h]) * back
            })
            .collect();

        for i in 0..=inputs {
            for h in 0..hiddens {
                self.hidden_weights[(i, h)] -=
                    learning_rate * (hidden_deltas[h] * self.input_activation[i]);
            }
        }

        sse
    }
}
