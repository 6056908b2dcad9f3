use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use nn4md::data::dataset::{load_dataset, LEARNING_SIZE, SHUFFLE_SEED, TEST_SIZE};
use nn4md::train::{classify, train_config};
use nn4md::{
    interactive, logging, BackpropOrder, DataFormat, EpochStats, ModelDocument, Network,
    TrainConfig, Trainer,
};

/// Trains a one-hidden-layer network on pulse-induction metal detector
/// readings, saves its weights and answers queries interactively.
#[derive(Parser)]
#[command(version, disable_help_flag = true)]
struct Cli {
    /// Seed of the weight initialisation generator
    #[arg(short = 's', value_name = "INT", default_value_t = 0, allow_negative_numbers = true)]
    seed: i64,
    /// Hidden neurons
    #[arg(short = 'h', value_name = "INT", default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..))]
    hiddens: u64,
    /// Learning rate
    #[arg(short = 'r', value_name = "FLOAT", default_value_t = train_config::DEFAULT_LEARNING_RATE)]
    rate: f64,
    /// Training data (tab-separated)
    #[arg(long, value_name = "PATH", default_value = "train.dat")]
    train: PathBuf,
    /// Validation data (tab-separated)
    #[arg(long, value_name = "PATH", default_value = "test.dat")]
    test: PathBuf,
    /// Where the trained weights are written
    #[arg(long, value_name = "PATH", default_value = "nn4md.json")]
    output: PathBuf,
    /// Validation MSE below which training stops
    #[arg(long, value_name = "FLOAT", default_value_t = train_config::ERROR_THRESHOLD)]
    threshold: f64,
    /// Give up after this many epochs
    #[arg(long, value_name = "INT", value_parser = clap::value_parser!(u64).range(1..))]
    max_epochs: Option<u64>,
    /// Compute hidden deltas from the pre-update output weights
    #[arg(long)]
    textbook_backprop: bool,
    /// Skip training and query a previously saved model
    #[arg(long, value_name = "PATH")]
    load: Option<PathBuf>,
    /// Exit after training instead of prompting for test data
    #[arg(long)]
    no_interactive: bool,
    /// More log output (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose).context("failed to install logger")?;

    let format = DataFormat::default();
    let mut network = match &cli.load {
        Some(path) => {
            let network = ModelDocument::load_json(path)
                .and_then(|doc| doc.into_network_for(format.inputs, format.outputs))
                .with_context(|| format!("failed to load model {}", path.display()))?;
            info!(path = %path.display(), hidden = network.hidden_size(), "model loaded");
            network
        }
        None => train(&cli, &format)?,
    };

    if !cli.no_interactive {
        println!("--- TESTING ---");
        interactive::run(&mut network, &format, io::stdin().lock(), io::stdout().lock())?;
    }
    Ok(())
}

fn train(cli: &Cli, format: &DataFormat) -> Result<Network> {
    println!("Seed: {}", cli.seed);
    println!("Hidden Neurons: {}", cli.hiddens);
    println!("Learning Rate: {}", cli.rate);

    let mut init_rng = StdRng::seed_from_u64(cli.seed as u64);
    let network = Network::build(format.inputs, cli.hiddens as usize, format.outputs, &mut init_rng);

    println!("Parse train data...");
    let mut training = load_dataset(&cli.train, LEARNING_SIZE, format)
        .with_context(|| format!("failed to read training data {}", cli.train.display()))?;
    println!("Shuffle...");
    training.shuffle(&mut StdRng::seed_from_u64(SHUFFLE_SEED));
    println!("Parse validation data...");
    let validation = load_dataset(&cli.test, TEST_SIZE, format)
        .with_context(|| format!("failed to read validation data {}", cli.test.display()))?;

    let config = TrainConfig {
        learning_rate: cli.rate,
        error_threshold: cli.threshold,
        max_epochs: cli.max_epochs.map(|n| n as usize),
        order: if cli.textbook_backprop {
            BackpropOrder::SnapshotWeights
        } else {
            BackpropOrder::UpdatedWeights
        },
    };

    println!("--- TRAINING ---");
    let mut trainer = Trainer::new(network, training, validation, config);
    let outcome = trainer.run(print_epoch)?;

    let validation = trainer.validation().clone();
    let mut network = trainer.into_network();

    println!("Test results:");
    for prediction in classify(&mut network, &validation) {
        let line = format!("{}  ->  {}", prediction.expected, prediction.predicted);
        if prediction.is_correct() {
            println!("{}", line.green());
        } else {
            println!("{}", line.red());
        }
    }
    print_epoch(&outcome.last);

    ModelDocument::from_network(&network)
        .save_json(&cli.output)
        .with_context(|| format!("failed to write model {}", cli.output.display()))?;
    Ok(network)
}

fn print_epoch(stats: &EpochStats) {
    println!(
        "Epoch: {}\tMSE: {:.5}\tMSE: {:.5}\tAcc.: {}\t{:.2} %",
        stats.epoch,
        stats.train_mse,
        stats.validation_mse,
        stats.correct,
        stats.accuracy_percent()
    );
}
