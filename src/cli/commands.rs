// ============================================================
// Layer 1: CLI Commands and Arguments
// ============================================================
// Four subcommands: `run` (the default), `train`, `evaluate`
// and `submit`. Every flag defaults to the value the pipeline
// has always used, so a bare invocation reproduces it.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::train_use_case::{
    TrainConfig, DEFAULT_MODEL_DIR, DEFAULT_SUBMISSION_CSV, DEFAULT_TEST_CSV,
    DEFAULT_TRAIN_CSV, DEFAULT_VALIDATION_CSV,
};
use crate::data::{preprocessor::SequenceLengths, splitter::VALIDATION_FRACTION};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train, evaluate on the validation split, then write the submission
    Run(RunArgs),

    /// Fit the vocabulary, split the data and train the model
    Train(TrainArgs),

    /// Print precision / recall / F1 for a labelled CSV
    Evaluate(EvaluateArgs),

    /// Label a test CSV and write id,target
    Submit(SubmitArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    /// Labelled training CSV (id,keyword,location,text,target)
    #[arg(long, default_value = DEFAULT_TRAIN_CSV)]
    pub train_csv: String,

    /// Where the held-out validation rows are written
    #[arg(long, default_value = DEFAULT_VALIDATION_CSV)]
    pub validation_csv: String,

    /// Directory for the model, tokenizer, config and metrics
    #[arg(long, default_value = DEFAULT_MODEL_DIR)]
    pub model_dir: String,

    #[arg(long, default_value_t = 30)]
    pub epochs: usize,

    #[arg(
        long,
        default_value_t = 32,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..),
    )]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Fraction of rows, taken from the end of the file, held out
    #[arg(long, default_value_t = VALIDATION_FRACTION)]
    pub validation_fraction: f64,

    /// Seed for weight initialisation and batch shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl Default for TrainArgs {
    fn default() -> Self {
        TrainConfig::default().into()
    }
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            train_csv:           a.train_csv,
            validation_csv:      a.validation_csv,
            model_dir:           a.model_dir,
            lengths:             SequenceLengths::default(),
            epochs:              a.epochs,
            batch_size:          a.batch_size,
            learning_rate:       a.lr,
            validation_fraction: a.validation_fraction,
            seed:                a.seed,
            ..TrainConfig::default()
        }
    }
}

impl From<TrainConfig> for TrainArgs {
    fn from(c: TrainConfig) -> Self {
        TrainArgs {
            train_csv:           c.train_csv,
            validation_csv:      c.validation_csv,
            model_dir:           c.model_dir,
            epochs:              c.epochs,
            batch_size:          c.batch_size,
            lr:                  c.learning_rate,
            validation_fraction: c.validation_fraction,
            seed:                c.seed,
        }
    }
}

/// Arguments for the full pipeline
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub train: TrainArgs,

    /// Unlabelled test CSV (id,keyword,location,text)
    #[arg(long, default_value = DEFAULT_TEST_CSV)]
    pub test_csv: String,

    /// Submission file to write
    #[arg(long, default_value = DEFAULT_SUBMISSION_CSV)]
    pub submission_csv: String,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            train:          TrainArgs::default(),
            test_csv:       DEFAULT_TEST_CSV.to_string(),
            submission_csv: DEFAULT_SUBMISSION_CSV.to_string(),
        }
    }
}

/// All arguments for the `evaluate` command
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Labelled CSV to score
    #[arg(long, default_value = DEFAULT_VALIDATION_CSV)]
    pub csv: String,

    /// Directory written by `train`
    #[arg(long, default_value = DEFAULT_MODEL_DIR)]
    pub model_dir: String,
}

/// All arguments for the `submit` command
#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[arg(long, default_value = DEFAULT_TEST_CSV)]
    pub test_csv: String,

    #[arg(long, default_value = DEFAULT_SUBMISSION_CSV)]
    pub submission_csv: String,

    /// Directory written by `train`
    #[arg(long, default_value = DEFAULT_MODEL_DIR)]
    pub model_dir: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_defaults_match_pipeline_constants() {
        let cfg: TrainConfig = TrainArgs::default().into();
        assert_eq!(cfg.epochs, 30);
        assert_eq!(cfg.batch_size, 32);
        assert_eq!(cfg.validation_fraction, 0.3);
        assert_eq!(cfg.lengths, SequenceLengths::default());
    }

    #[test]
    fn test_parsed_train_flags() {
        let cli = Cli::try_parse_from([
            "tweet-disaster-classifier", "train", "--epochs", "3", "--train-csv", "x.csv",
        ]).unwrap();
        match cli.command {
            Some(Commands::Train(a)) => {
                assert_eq!(a.epochs, 3);
                assert_eq!(a.train_csv, "x.csv");
                assert_eq!(a.batch_size, 32);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let parsed = Cli::try_parse_from([
            "tweet-disaster-classifier", "train", "--batch-size", "0",
        ]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from([
            "tweet-disaster-classifier", "run", "--batch-size", "1",
        ]).unwrap();
        match cli.command {
            Some(Commands::Run(a)) => assert_eq!(a.train.batch_size, 1),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["tweet-disaster-classifier"]).unwrap();
        assert!(cli.command.is_none());
    }
}
