//! Error type shared by the specification parser, the config validator and
//! the forward executor.

use thiserror::Error;

/// Everything that can go wrong while describing, compiling or running a network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuilderError {
    #[error("layers must be provided as a non-empty list")]
    EmptyLayers,

    #[error("layer {index}: {message}")]
    MalformedLayer { index: usize, message: String },

    #[error("layer {index}: unknown layer type '{name}', use one of linear, gru, lstm")]
    UnknownLayerType { index: usize, name: String },

    #[error("layer {index}: width must be >= 1")]
    ZeroWidth { index: usize },

    #[error("layer {index}: linear layers may only come at the end, found {kind} after a linear layer")]
    LinearNotTrailing { index: usize, kind: String },

    #[error("input_dim must be >= 1")]
    InvalidInputDim,

    #[error("invalid activation '{0}'")]
    InvalidActivation(String),

    #[error("invalid initialiser '{0}'")]
    InvalidInitialiser(String),

    #[error("{what}: expected {expected} activations, got {actual}")]
    ActivationCount {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("y_range must be two finite values with lower < upper, got ({0}, {1})")]
    InvalidYRange(f64, f64),

    #[error("dropout probability must be in [0, 1), got {0}")]
    InvalidDropout(f64),

    #[error("input shape {actual:?} does not match expected [batch, seq, {expected}]")]
    InputShape { expected: usize, actual: [usize; 3] },

    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for BuilderError {
    fn from(err: serde_json::Error) -> Self {
        BuilderError::Config(err.to_string())
    }
}

impl From<std::io::Error> for BuilderError {
    fn from(err: std::io::Error) -> Self {
        BuilderError::Config(err.to_string())
    }
}
