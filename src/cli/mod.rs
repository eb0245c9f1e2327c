// ============================================================
// Layer 1: CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes to the use cases.
// Results are printed here; all work happens in Layer 2.
//
// Running with no subcommand behaves like `run` with every
// default: train for 30 epochs, evaluate, write the submission.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EvaluateArgs, RunArgs, SubmitArgs, TrainArgs};

use crate::application::{predict_use_case::PredictUseCase, train_use_case::TrainUseCase};

#[derive(Parser, Debug)]
#[command(
    name = "tweet-disaster-classifier",
    version,
    about = "Train an embedding + attention + BiGRU classifier on disaster tweets."
)]
pub struct Cli {
    /// The step to run; defaults to the full pipeline
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
            Commands::Run(args)      => run_pipeline(args),
            Commands::Train(args)    => run_train(args),
            Commands::Evaluate(args) => run_evaluate(args),
            Commands::Submit(args)   => run_submit(args),
        }
    }
}

fn run_pipeline(args: RunArgs) -> Result<()> {
    let model_dir      = args.train.model_dir.clone();
    let validation_csv = args.train.validation_csv.clone();

    run_train(args.train)?;

    let use_case = PredictUseCase::from_model_dir(&model_dir)?;
    let report   = use_case.evaluate(&validation_csv)?;
    println!("Evaluation Metrics: {report}");

    use_case.submit(&args.test_csv, &args.submission_csv)?;
    println!("csv file has been generated!");
    Ok(())
}

fn run_train(args: TrainArgs) -> Result<()> {
    tracing::info!("Starting training on '{}'", args.train_csv);
    let cfg = TrainUseCase::new(args.into()).execute()?;
    println!("Training complete. Model saved to '{}'.", cfg.model_dir);
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    let report = PredictUseCase::from_model_dir(&args.model_dir)?.evaluate(&args.csv)?;
    println!("Evaluation Metrics: {report}");
    Ok(())
}

fn run_submit(args: SubmitArgs) -> Result<()> {
    let rows = PredictUseCase::from_model_dir(&args.model_dir)?
        .submit(&args.test_csv, &args.submission_csv)?;
    println!("Wrote {rows} predictions to '{}'", args.submission_csv);
    Ok(())
}
