//! # rnn-builder
//!
//! Assemble recurrent networks mixing GRU, LSTM and linear layers from a
//! declarative layer list, on top of the Burn framework.
//!
//! ## Features
//!
//! - **Layer specs**: `[["gru", 25], ["lstm", 23], ["linear", 10]]`, parsed and validated
//! - **Width chaining**: each layer consumes its predecessor's output width
//! - **Multiple heads**: a final group like `[["lstm", 10], ["linear", 15]]` runs heads in parallel
//! - **Auxiliary layers**: optional batch norm and dropout after every hidden layer
//! - **Output transforms**: per-head output activations and an optional `y_range`
//! - **JSON configs**: the whole network description deserialises with serde
//!
//! ## Quick Start
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use rnn_builder::prelude::*;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let layers = LayerSpec::from_json(r#"[["gru", 20], ["lstm", 8], ["linear", 1]]"#).unwrap();
//! let rnn = RnnConfig::new(15, layers)
//!     .with_output_activation("sigmoid")
//!     .with_initialiser("xavier")
//!     .init::<Backend>(&device)
//!     .unwrap();
//!
//! let x = Tensor::<Backend, 3>::zeros([4, 5, 15], &device);
//! let y = rnn.forward(x).unwrap();
//! assert_eq!(y.dims(), [4, 5, 1]);
//! ```
//!
//! Invalid descriptions are rejected before any weights are allocated:
//!
//! ```rust
//! use rnn_builder::prelude::*;
//!
//! assert!(LayerSpec::from_json(r#"[["linear", 33], ["gru", 12], ["gru", 33]]"#).is_err());
//! assert!(LayerSpec::from_json(r#"[["gruu", 33]]"#).is_err());
//! ```

pub mod activation;
pub mod cells;
pub mod config;
pub mod error;
pub mod initializer;
pub mod network;
pub mod rnn;
pub mod spec;
pub mod train;

pub mod prelude {
    pub use crate::activation::Activation;
    pub use crate::cells::{GruCell, LstmCell};
    pub use crate::config::{load_config, ActivationSpec, RnnConfig};
    pub use crate::error::BuilderError;
    pub use crate::initializer::InitializerKind;
    pub use crate::network::{last_timestep, Rnn};
    pub use crate::rnn::{Gru, Lstm};
    pub use crate::spec::{LayerDescriptor, LayerKind, LayerSpec};
    pub use crate::train::{fit, TrainConfig, TrainReport};
}
