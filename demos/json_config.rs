//! JSON Config Example
//!
//! Describes a two-headed network in JSON, loads it from disk and shows how
//! invalid descriptions are reported.

use burn::backend::NdArray;
use burn::tensor::Tensor;
use rnn_builder::prelude::*;

const CONFIG: &str = r#"{
    "input_dim": 8,
    "layers": [["gru", 16], ["lstm", 12], [["lstm", 4], ["linear", 3]]],
    "hidden_activations": "relu",
    "output_activation": ["softmax", null],
    "initialiser": "glorot_uniform",
    "dropout": 0.1
}"#;

fn main() -> Result<(), BuilderError> {
    println!("=== rnn-builder JSON Config Example ===\n");

    type Backend = NdArray<f32>;
    let device = Default::default();

    let path = std::env::temp_dir().join("rnn_builder_demo.json");
    std::fs::write(&path, CONFIG)?;

    let config = load_config(&path)?;
    println!("Loaded config from {}", path.display());
    println!("  layers: {}", config.layers.to_value());

    let rnn = config.init::<Backend>(&device)?;
    let output = rnn.forward(Tensor::zeros([2, 6, 8], &device))?;
    println!("  output shape: {:?} (4 softmax + 3 raw)", output.dims());
    println!();

    println!("Rejected descriptions:");
    for bad in [
        r#"[["gruu", 33]]"#,
        r#"[["linear", 12, 33]]"#,
        r#"[["linear", 33], ["gru", 12], ["gru", 33]]"#,
        r#"[["lstm", 0]]"#,
    ] {
        match LayerSpec::from_json(bad) {
            Ok(_) => println!("  {bad:<45} accepted?!"),
            Err(err) => println!("  {bad:<45} {err}"),
        }
    }

    std::fs::remove_file(&path)?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
