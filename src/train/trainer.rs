use tracing::{debug, info, warn};

use crate::data::dataset::Dataset;
use crate::error::{Error, Result};
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::metrics::evaluate;
use crate::train::train_config::TrainConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerState {
    /// Feeding training samples one at a time.
    Running,
    /// A full pass over the training set just finished; the next step
    /// validates and decides whether to continue.
    EpochBoundary,
    Converged,
    MaxEpochsExceeded,
}

impl TrainerState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TrainerState::Converged | TrainerState::MaxEpochsExceeded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainOutcome {
    pub state: TrainerState,
    pub epochs: usize,
    /// Statistics of the final epoch.
    pub last: EpochStats,
}

/// Online gradient descent over a fixed-order training set, validated at
/// every epoch boundary.
///
/// The training set is used in the order given; shuffle it beforehand.
pub struct Trainer {
    network: Network,
    training: Dataset,
    validation: Dataset,
    optimizer: Sgd,
    config: TrainConfig,
    state: TrainerState,
    epoch: usize,
    iteration: usize,
    epoch_sse: f64,
    last: Option<EpochStats>,
}

impl Trainer {
    /// # Panics
    /// Panics if either dataset is empty, a sample does not match the
    /// network's layer sizes, or `max_epochs` is `Some(0)`.
    pub fn new(network: Network, training: Dataset, validation: Dataset, config: TrainConfig) -> Trainer {
        assert!(!training.is_empty(), "training set must not be empty");
        assert!(!validation.is_empty(), "validation set must not be empty");
        assert_ne!(config.max_epochs, Some(0), "max_epochs must be at least 1");
        for sample in training.iter().chain(validation.iter()) {
            assert_eq!(sample.input.len(), network.input_size(), "sample input length must equal input_size");
            assert_eq!(sample.target.len(), network.output_size(), "sample target length must equal output_size");
        }

        Trainer {
            network,
            training,
            validation,
            optimizer: Sgd::new(config.learning_rate).with_order(config.order),
            config,
            state: TrainerState::Running,
            epoch: 0,
            iteration: 0,
            epoch_sse: 0.0,
            last: None,
        }
    }

    /// Advances by one training iteration, or processes the pending epoch
    /// boundary. Terminal states are left unchanged.
    pub fn step(&mut self) -> TrainerState {
        match self.state {
            TrainerState::Running => {
                let sample = &self.training.samples()[self.iteration];
                self.network.forward(&sample.input);
                self.epoch_sse += self.optimizer.step(&mut self.network, &sample.target);

                self.iteration += 1;
                if self.iteration == self.training.len() {
                    self.state = TrainerState::EpochBoundary;
                }
            }
            TrainerState::EpochBoundary => self.finish_epoch(),
            TrainerState::Converged | TrainerState::MaxEpochsExceeded => {}
        }
        self.state
    }

    /// Steps until a terminal state, calling `on_epoch` at every epoch
    /// boundary.
    ///
    /// Returns `Error::MaxEpochsExceeded` if the epoch cap was hit first; the
    /// trainer and its network stay available either way.
    pub fn run<F>(&mut self, mut on_epoch: F) -> Result<TrainOutcome>
    where
        F: FnMut(&EpochStats),
    {
        while !self.state.is_terminal() {
            let before = self.state;
            self.step();
            if before == TrainerState::EpochBoundary {
                if let Some(stats) = &self.last {
                    on_epoch(stats);
                }
            }
        }

        // At least one epoch boundary precedes any terminal state.
        let last = self.last.expect("terminal state reached without an epoch");
        match self.state {
            TrainerState::MaxEpochsExceeded => Err(Error::MaxEpochsExceeded {
                epochs: self.epoch,
                validation_mse: last.validation_mse,
            }),
            state => Ok(TrainOutcome { state, epochs: self.epoch, last }),
        }
    }

    fn finish_epoch(&mut self) {
        self.epoch += 1;
        let train_mse = self.epoch_sse / self.training.len() as f64;
        let eval = evaluate(&mut self.network, &self.validation);

        let stats = EpochStats {
            epoch: self.epoch,
            train_mse,
            validation_mse: eval.mse,
            correct: eval.correct,
            total: eval.total,
        };
        debug!(
            epoch = stats.epoch,
            train_mse = stats.train_mse,
            validation_mse = stats.validation_mse,
            correct = stats.correct,
            "epoch finished"
        );
        self.last = Some(stats);

        if eval.mse < self.config.error_threshold {
            info!(epoch = self.epoch, validation_mse = eval.mse, "converged");
            self.state = TrainerState::Converged;
        } else if self.config.max_epochs.is_some_and(|max| self.epoch >= max) {
            warn!(epoch = self.epoch, validation_mse = eval.mse, "epoch limit reached");
            self.state = TrainerState::MaxEpochsExceeded;
        } else {
            self.iteration = 0;
            self.epoch_sse = 0.0;
            self.state = TrainerState::Running;
        }
    }

    pub fn state(&self) -> TrainerState {
        self.state
    }

    /// Completed epochs.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn last_stats(&self) -> Option<&EpochStats> {
        self.last.as_ref()
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn validation(&self) -> &Dataset {
        &self.validation
    }

    pub fn into_network(self) -> Network {
        self.network
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::Sample;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dataset(n: usize) -> Dataset {
        Dataset::new(
            (0..n)
                .map(|i| {
                    let class = i % 2;
                    Sample {
                        input: vec![class as f64, 1.0 - class as f64],
                        target: if class == 0 { vec![1.0, 0.0] } else { vec![0.0, 1.0] },
                    }
                })
                .collect(),
        )
    }

    fn trainer(config: TrainConfig) -> Trainer {
        let network = Network::build(2, 3, 2, &mut StdRng::seed_from_u64(0));
        Trainer::new(network, dataset(4), dataset(2), config)
    }

    #[test]
    fn test_epoch_boundary_after_every_sample() {
        let mut t = trainer(TrainConfig::default());
        assert_eq!(t.step(), TrainerState::Running);
        assert_eq!(t.step(), TrainerState::Running);
        assert_eq!(t.step(), TrainerState::Running);
        assert_eq!(t.step(), TrainerState::EpochBoundary);
        assert_eq!(t.epoch(), 0);

        let next = t.step();
        assert_eq!(t.epoch(), 1);
        assert_eq!(next, TrainerState::Running);
        let stats = t.last_stats().unwrap();
        assert_eq!(stats.total, 2);
        assert!(stats.train_mse > 0.0);
    }

    #[test]
    fn test_epoch_error_is_not_cumulative() {
        let config = TrainConfig { error_threshold: 0.0, ..TrainConfig::default() };
        let mut t = trainer(config);

        while t.epoch() < 1 {
            t.step();
        }
        let first = *t.last_stats().unwrap();

        // Replay epoch 2 on a copy of the network as it stands now.
        let mut replay = t.network().clone();
        let optimizer = Sgd::new(config.learning_rate).with_order(config.order);
        let training = dataset(4);
        let mut sse = 0.0;
        for sample in &training {
            replay.forward(&sample.input);
            sse += optimizer.step(&mut replay, &sample.target);
        }

        while t.epoch() < 2 {
            t.step();
        }
        let second = t.last_stats().unwrap();

        assert_eq!(second.epoch, 2);
        assert_relative_eq!(second.train_mse, sse / training.len() as f64, epsilon = 1e-12);
        assert!(second.train_mse < first.train_mse + sse / training.len() as f64);
        assert_eq!(t.network().hidden_weights(), replay.hidden_weights());
    }

    #[test]
    fn test_max_epochs_is_reported() {
        let config = TrainConfig { max_epochs: Some(3), error_threshold: 0.0, ..TrainConfig::default() };
        let mut t = trainer(config);
        let mut seen = Vec::new();

        let err = t.run(|stats| seen.push(stats.epoch)).unwrap_err();

        assert!(matches!(err, Error::MaxEpochsExceeded { epochs: 3, .. }));
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(t.state(), TrainerState::MaxEpochsExceeded);
        assert_eq!(t.step(), TrainerState::MaxEpochsExceeded);
    }

    #[test]
    fn test_converges_on_trivial_problem() {
        let config = TrainConfig { learning_rate: 2.0, max_epochs: Some(20_000), ..TrainConfig::default() };
        let mut t = trainer(config);

        let outcome = t.run(|_| {}).unwrap();

        assert_eq!(outcome.state, TrainerState::Converged);
        assert!(outcome.last.validation_mse < 0.01);
        assert_eq!(outcome.last.correct, 2);
        assert_eq!(outcome.epochs, t.epoch());
    }

    #[test]
    fn test_bias_slots_after_training() {
        let config = TrainConfig { max_epochs: Some(5), error_threshold: 0.0, ..TrainConfig::default() };
        let mut t = trainer(config);
        let _ = t.run(|_| {});
        let net = t.into_network();
        assert_eq!(net.input_activation()[2], 1.0);
        assert_eq!(net.hidden_activation()[3], 1.0);
    }

    #[test]
    #[should_panic]
    fn test_rejects_empty_validation() {
        let network = Network::build(2, 3, 2, &mut StdRng::seed_from_u64(0));
        Trainer::new(network, dataset(4), Dataset::default(), TrainConfig::default());
    }
}
