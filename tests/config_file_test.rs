//! Tests for loading network configurations from JSON files

use std::io::Write;

use burn::backend::NdArray;
use burn::tensor::Tensor;
use rnn_builder::prelude::*;
use tempfile::NamedTempFile;

type Backend = NdArray<f32>;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"{
            "input_dim": 15,
            "layers": [["lstm", 20], ["gru", 10], ["linear", 20], ["linear", 1]],
            "hidden_activations": "relu",
            "output_activation": "sigmoid",
            "initialiser": "xavier",
            "dropout": 0.25,
            "batch_norm": true,
            "seed": 7
        }"#,
    );

    let config = load_config(file.path()).expect("valid config");
    assert_eq!(config.input_dim, 15);
    assert_eq!(config.layers.hidden().len(), 3);
    assert_eq!(config.output_activation, ActivationSpec::from("sigmoid"));
    assert_eq!(config.dropout, 0.25);
    assert!(config.batch_norm);
    assert_eq!(config.seed, Some(7));

    let rnn = config.init::<Backend>(&Default::default()).unwrap();
    assert_eq!(rnn.batch_norm_layers().len(), 3);
    assert_eq!(rnn.dropout_prob(), 0.25);

    let out = rnn.forward(Tensor::zeros([2, 3, 15], &Default::default())).unwrap();
    assert_eq!(out.dims(), [2, 3, 1]);
}

#[test]
fn test_load_minimal_config_uses_defaults() {
    let file = write_config(r#"{"input_dim": 4, "layers": [["gru", 3]]}"#);

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.hidden_activations, ActivationSpec::from("relu"));
    assert_eq!(config.output_activation, ActivationSpec::Single(None));
    assert_eq!(config.initialiser, "default");
    assert_eq!(config.dropout, 0.0);
    assert!(!config.batch_norm);
    assert_eq!(config.y_range, None);
}

#[test]
fn test_load_per_head_activations() {
    let file = write_config(
        r#"{
            "input_dim": 5,
            "layers": [["gru", 25], [["lstm", 10], ["linear", 15]]],
            "output_activation": ["softmax", null]
        }"#,
    );

    let rnn = load_config(file.path())
        .unwrap()
        .init::<Backend>(&Default::default())
        .unwrap();
    assert_eq!(rnn.output_activations(), &[Activation::Softmax, Activation::Identity]);
}

#[test]
fn test_load_rejects_semantic_errors() {
    let cases = [
        r#"{"input_dim": 4, "layers": [["gru", 3]], "initialiser": "Xavier_"}"#,
        r#"{"input_dim": 4, "layers": [["gru", 3]], "hidden_activations": "aa"}"#,
        r#"{"input_dim": 4, "layers": [["gru", 3]], "y_range": [4.0, 1.0]}"#,
        r#"{"input_dim": 4, "layers": [["gru", 3]], "dropout": 1.5}"#,
        r#"{"input_dim": 0, "layers": [["gru", 3]]}"#,
        r#"{"input_dim": 4, "layers": [["linear", 3], ["gru", 3]]}"#,
    ];
    for contents in cases {
        let file = write_config(contents);
        assert!(load_config(file.path()).is_err(), "accepted {contents}");
    }
}

#[test]
fn test_load_invalid_json() {
    let file = write_config("{ not json");
    assert!(matches!(load_config(file.path()), Err(BuilderError::Config(_))));
}

#[test]
fn test_load_missing_file() {
    let result = load_config("definitely/not/a/real/config.json");
    assert!(matches!(result, Err(BuilderError::Config(_))));
}
