use rand::Rng;

use crate::activation::activation::ActivationFunction;
use crate::math::matrix::Matrix;

/// Bound of the uniform range initial weights are drawn from.
pub const WEIGHT_START: f64 = 0.1;

/// Input → hidden → output network with logistic hidden and output units.
///
/// The input and hidden activation vectors carry one extra trailing slot fixed
/// at 1.0 (the bias unit); its weights are the last row of the following
/// weight matrix. Forward propagation never writes the bias slots.
#[derive(Debug, Clone)]
pub struct Network {
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    pub(crate) input_activation: Vec<f64>,
    pub(crate) hidden_activation: Vec<f64>,
    pub(crate) output_activation: Vec<f64>,
    /// (input_size + 1) × hidden_size
    pub(crate) hidden_weights: Matrix,
    /// (hidden_size + 1) × output_size
    pub(crate) output_weights: Matrix,
}

impl Network {
    pub const HIDDEN_ACTIVATION: ActivationFunction = ActivationFunction::Logistic;
    pub const OUTPUT_ACTIVATION: ActivationFunction = ActivationFunction::Logistic;

    /// Allocates the network and draws every weight from
    /// U[-WEIGHT_START, WEIGHT_START], hidden weights first.
    pub fn build<R: Rng + ?Sized>(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        rng: &mut R,
    ) -> Network {
        assert!(input_size > 0, "input_size must be at least 1");
        assert!(hidden_size > 0, "hidden_size must be at least 1");
        assert!(output_size > 0, "output_size must be at least 1");

        let hidden_weights = Matrix::uniform(input_size + 1, hidden_size, WEIGHT_START, rng);
        let output_weights = Matrix::uniform(hidden_size + 1, output_size, WEIGHT_START, rng);
        Network::from_weights(hidden_weights, output_weights)
    }

    /// Rebuilds a network around existing weight matrices. Layer sizes are
    /// derived from the matrix shapes.
    ///
    /// # Panics
    /// Panics if the shapes do not chain (`output_weights.rows` must be
    /// `hidden_weights.cols + 1`) or a layer would be empty.
    pub fn from_weights(hidden_weights: Matrix, output_weights: Matrix) -> Network {
        assert!(hidden_weights.rows >= 2, "hidden weights need an input row and a bias row");
        assert!(hidden_weights.cols >= 1, "hidden layer must have at least one unit");
        assert!(output_weights.cols >= 1, "output layer must have at least one unit");
        assert_eq!(
            output_weights.rows,
            hidden_weights.cols + 1,
            "output weights must have one row per hidden unit plus the bias row"
        );

        let input_size = hidden_weights.rows - 1;
        let hidden_size = hidden_weights.cols;
        let output_size = output_weights.cols;

        Network {
            input_size,
            hidden_size,
            output_size,
            input_activation: vec![1.0; input_size + 1],
            hidden_activation: vec![1.0; hidden_size + 1],
            output_activation: vec![1.0; output_size],
            hidden_weights,
            output_weights,
        }
    }

    /// Propagates `input` through the network and returns the output
    /// activations. The returned slice is overwritten by the next call.
    ///
    /// # Panics
    /// Panics if `input.len() != input_size`.
    pub fn forward(&mut self, input: &[f64]) -> &[f64] {
        assert_eq!(input.len(), self.input_size, "input length must equal input_size");

        self.input_activation[..self.input_size].copy_from_slice(input);

        for h in 0..self.hidden_size {
            let mut sum = 0.0;
            for i in 0..=self.input_size {
                sum += self.input_activation[i] * self.hidden_weights[(i, h)];
            }
            self.hidden_activation[h] = Self::HIDDEN_ACTIVATION.function(sum);
        }

        for o in 0..self.output_size {
            let mut sum = 0.0;
            for h in 0..=self.hidden_size {
                sum += self.hidden_activation[h] * self.output_weights[(h, o)];
            }
            self.output_activation[o] = Self::OUTPUT_ACTIVATION.function(sum);
        }

        &self.output_activation
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Inputs of the last forward pass followed by the bias slot.
    pub fn input_activation(&self) -> &[f64] {
        &self.input_activation
    }

    /// Hidden outputs of the last forward pass followed by the bias slot.
    pub fn hidden_activation(&self) -> &[f64] {
        &self.hidden_activation
    }

    pub fn output_activation(&self) -> &[f64] {
        &self.output_activation
    }

    pub fn hidden_weights(&self) -> &Matrix {
        &self.hidden_weights
    }

    pub fn output_weights(&self) -> &Matrix {
        &self.output_weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn network() -> Network {
        Network::build(8, 3, 2, &mut StdRng::seed_from_u64(0))
    }

    #[test]
    fn test_build_dimensions() {
        let net = network();
        assert_eq!(net.hidden_weights().dims(), (9, 3));
        assert_eq!(net.output_weights().dims(), (4, 2));
        assert_eq!(net.input_activation().len(), 9);
        assert_eq!(net.hidden_activation().len(), 4);
        assert_eq!(net.output_activation().len(), 2);
    }

    #[test]
    fn test_build_weights_within_start_range() {
        let net = network();
        let all = net.hidden_weights().data.iter().chain(net.output_weights().data.iter()).flatten();
        for w in all {
            assert!(w.abs() <= WEIGHT_START);
        }
    }

    #[test]
    fn test_forward_is_deterministic() {
        let mut net = network();
        let input = [0.1, 0.5, 0.9, 0.0, 1.0, 0.3, 0.7, 0.2];
        let first = net.forward(&input).to_vec();
        let second = net.forward(&input).to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_forward_matches_hand_computation() {
        // 1 input, 1 hidden, 1 output
        let hidden = Matrix::from_data(vec![vec![0.5], vec![-0.25]]);
        let output = Matrix::from_data(vec![vec![2.0], vec![0.1]]);
        let mut net = Network::from_weights(hidden, output);

        let out = net.forward(&[1.0])[0];

        let sigma = |x: f64| 1.0 / (1.0 + (-x).exp());
        let h = sigma(1.0 * 0.5 + 1.0 * -0.25);
        assert_relative_eq!(out, sigma(h * 2.0 + 1.0 * 0.1), epsilon = 1e-12);
        assert_relative_eq!(net.hidden_activation()[0], h, epsilon = 1e-12);
    }

    #[test]
    fn test_forward_keeps_bias_slots() {
        let mut net = network();
        net.forward(&[3.0; 8]);
        assert_eq!(net.input_activation()[8], 1.0);
        assert_eq!(net.hidden_activation()[3], 1.0);
    }

    #[test]
    #[should_panic]
    fn test_forward_rejects_wrong_input_length() {
        network().forward(&[0.0; 3]);
    }

    #[test]
    #[should_panic]
    fn test_from_weights_rejects_unchained_shapes() {
        Network::from_weights(Matrix::zeros(9, 3), Matrix::zeros(3, 2));
    }
}
