// ============================================================
// Layer 5: Training Loop
// ============================================================
// Custom train step over Burn's DataLoader and Adam:
//
//   forward (autodiff) → BCE loss → backward → Adam step
//
// plus accuracy accumulation, then a validation pass per epoch.
//
// Key Burn insight:
//   - Training uses TrainBackend (Autodiff<Inner>) for gradients
//   - model.valid() returns the model on the inner backend
//   - the validation batcher must therefore use the inner backend too
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::TweetBatcher, dataset::TweetDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::evaluator::DECISION_THRESHOLD;
use crate::ml::model::{TextClassificationConfig, TextClassificationModel};
use crate::ml::TrainBackend;

/// Train on the default device and save the final weights.
pub fn run_training(
    cfg:           &TrainConfig,
    model_cfg:     &TextClassificationConfig,
    train_dataset: TweetDataset,
    val_dataset:   TweetDataset,
    ckpt_manager:  &CheckpointManager,
) -> Result<()> {
    let device: <TrainBackend as Backend>::Device = Default::default();
    tracing::info!("Using device: {:?}", device);

    TrainBackend::seed(cfg.seed);
    let model: TextClassificationModel<TrainBackend> = model_cfg.init(&device);
    tracing::info!("Model ready: {} parameters", model.num_params());

    let logger = MetricsLogger::create(&cfg.model_dir)?;
    let (model, _history) = train_loop(cfg, model, train_dataset, val_dataset, &device, Some(&logger))?;

    // Stand-in for a model summary: architecture and size
    tracing::info!(
        "Model summary: {}\ntotal parameters: {}",
        model_cfg,
        model.num_params(),
    );

    ckpt_manager.save_model(&model.valid())?;
    tracing::info!("Training complete!");
    Ok(())
}

pub fn train_loop<B: AutodiffBackend>(
    cfg:           &TrainConfig,
    mut model:     TextClassificationModel<B>,
    train_dataset: TweetDataset,
    val_dataset:   TweetDataset,
    device:        &B::Device,
    logger:        Option<&MetricsLogger>,
) -> Result<(TextClassificationModel<B>, Vec<EpochMetrics>)> {

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let mut optim = AdamConfig::new().with_epsilon(1e-7).init();

    // ── Training data loader (autodiff backend, reshuffled every epoch) ───────
    let train_loader = DataLoaderBuilder::new(TweetBatcher::<B>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (inner backend, no autodiff) ─────────
    let val_loader = DataLoaderBuilder::new(TweetBatcher::<B::InnerBackend>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let mut history = Vec::with_capacity(cfg.epochs);

    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;
        let mut correct  = 0usize;
        let mut seen     = 0usize;

        for batch in train_loader.iter() {
            let output = model.forward_classification(batch);

            loss_sum += output.loss.clone().into_scalar().elem::<f64>();
            batches  += 1;
            seen     += output.targets.dims()[0];
            correct  += count_correct(output.probabilities, output.targets);

            let grads = output.loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.learning_rate, model, grads);
        }

        // ── Validation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();

        let mut val_loss_sum = 0.0f64;
        let mut val_batches  = 0usize;
        let mut val_correct  = 0usize;
        let mut val_seen     = 0usize;

        for batch in val_loader.iter() {
            let output = model_valid.forward_classification(batch);

            val_loss_sum += output.loss.into_scalar().elem::<f64>();
            val_batches  += 1;
            val_seen     += output.targets.dims()[0];
            val_correct  += count_correct(output.probabilities, output.targets);
        }

        let m = EpochMetrics::new(
            epoch,
            mean(loss_sum, batches),
            fraction(correct, seen),
            mean(val_loss_sum, val_batches),
            fraction(val_correct, val_seen),
        );

        println!(
            "Epoch {:>3}/{} | loss={:.4} | accuracy={:.4} | val_loss={:.4} | val_accuracy={:.4}",
            epoch, cfg.epochs, m.train_loss, m.train_acc, m.val_loss, m.val_acc,
        );

        if let Some(logger) = logger {
            logger.log(&m)?;
        }
        history.push(m);
    }

    Ok((model, history))
}

/// Number of rows where the thresholded probability equals the target.
fn count_correct<B: Backend>(probabilities: Tensor<B, 1>, targets: Tensor<B, 1, Int>) -> usize {
    probabilities
        .greater_elem(DECISION_THRESHOLD)
        .int()
        .equal(targets)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>() as usize
}

fn mean(sum: f64, count: usize) -> f64 {
    if count > 0 { sum / count as f64 } else { f64::NAN }
}

fn fraction(hits: usize, total: usize) -> f64 {
    if total > 0 { hits as f64 / total as f64 } else { 0.0 }
}
