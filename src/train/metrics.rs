use crate::data::dataset::Dataset;
use crate::loss::mse::MseLoss;
use crate::network::network::Network;

/// Index of the largest value strictly greater than every earlier candidate,
/// scanning from a running maximum of 0.0.
///
/// Ties keep the earliest index, and a vector with no positive entry maps
/// to class 0.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    let mut max = 0.0;
    for (i, &v) in values.iter().enumerate() {
        if v > max {
            max = v;
            best = i;
        }
    }
    best
}

/// Result of one pass over a dataset without weight updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub sse: f64,
    pub mse: f64,
    pub correct: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub expected: usize,
    pub predicted: usize,
}

impl Prediction {
    pub fn is_correct(&self) -> bool {
        self.expected == self.predicted
    }
}

/// Squared error and argmax accuracy of `network` over `dataset`.
pub fn evaluate(network: &mut Network, dataset: &Dataset) -> Evaluation {
    let mut sse = 0.0;
    let mut correct = 0;

    for sample in dataset {
        let output = network.forward(&sample.input);
        sse += MseLoss::sse(output, &sample.target);
        if argmax(output) == argmax(&sample.target) {
            correct += 1;
        }
    }

    let total = dataset.len();
    Evaluation {
        sse,
        mse: if total == 0 { 0.0 } else { sse / total as f64 },
        correct,
        total,
    }
}

/// Expected and predicted class of every sample, in dataset order.
pub fn classify(network: &mut Network, dataset: &Dataset) -> Vec<Prediction> {
    dataset
        .iter()
        .map(|sample| Prediction {
            expected: argmax(&sample.target),
            predicted: argmax(network.forward(&sample.input)),
        })
        .collect()
}
