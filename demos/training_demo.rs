//! Training Demo - Simple Sequence Classification
//!
//! Trains a GRU -> LSTM -> linear network with Adam on a synthetic task where
//! the label is carried by one input feature.

use burn::backend::{Autodiff, NdArray};
use rnn_builder::prelude::*;
use rnn_builder::train::synthetic_task;

fn main() -> Result<(), BuilderError> {
    env_logger::init();
    println!("=== rnn-builder Training Example ===\n");

    type Backend = Autodiff<NdArray<f32>>;
    let device = Default::default();

    let (inputs, targets) = synthetic_task::<Backend>(128, 5, 15, 3, 4.0, 42, &device);
    println!("Task: {} sequences of shape {:?}", 128, inputs.dims());

    let layers = LayerSpec::from_json(r#"[["gru", 20], ["lstm", 8], ["linear", 1]]"#)?;
    let model = RnnConfig::new(15, layers)
        .with_hidden_activations("relu")
        .with_output_activation("sigmoid")
        .with_initialiser("xavier")
        .with_seed(42)
        .init::<Backend>(&device)?;

    let config = TrainConfig {
        learning_rate: 0.02,
        iterations: 300,
        log_every: 25,
    };
    let (_, report) = fit(model, inputs, targets, &config)?;

    println!("Initial loss: {:.4}", report.losses.first().copied().unwrap_or(f32::NAN));
    println!("Final loss:   {:.4}", report.final_loss());
    println!("\n=== Training Example completed! ===");
    Ok(())
}
