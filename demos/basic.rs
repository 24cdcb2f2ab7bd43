//! Basic Example - Assembling a Recurrent Network
//!
//! Builds a GRU -> LSTM -> linear network from a layer list and runs a forward pass.

use burn::backend::NdArray;
use burn::tensor::{Distribution, Tensor};
use rnn_builder::prelude::*;

fn main() -> Result<(), BuilderError> {
    println!("=== rnn-builder Basic Example ===\n");

    type Backend = NdArray<f32>;
    let device = Default::default();

    let layers = LayerSpec::from_json(r#"[["gru", 25], ["lstm", 23], ["linear", 5], ["linear", 10]]"#)?;
    let rnn = RnnConfig::new(5, layers)
        .with_hidden_activations("relu")
        .with_output_activation("softmax")
        .with_initialiser("xavier")
        .with_batch_norm(true)
        .init::<Backend>(&device)?;

    println!("Hidden layers:");
    for layer in rnn.hidden_layers() {
        println!(
            "  {:<6} {:>3} -> {:<3}",
            layer.kind(),
            layer.input_size(),
            layer.output_size()
        );
    }
    println!("Output layers:");
    for layer in rnn.output_layers() {
        println!(
            "  {:<6} {:>3} -> {:<3}",
            layer.kind(),
            layer.input_size(),
            layer.output_size()
        );
    }
    println!("Batch norm layers: {}", rnn.batch_norm_layers().len());
    println!();

    let input = Tensor::<Backend, 3>::random([4, 10, 5], Distribution::Normal(0.0, 1.0), &device);
    let output = rnn.forward(input)?;
    println!("Output shape: {:?}", output.dims());

    let sums = output.sum_dim(2);
    println!("Softmax sums (first sample): {:?}", sums.narrow(0, 0, 1).into_data());

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
