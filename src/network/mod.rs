//! # Assembled Recurrent Networks
//!
//! [`Rnn`] is the network produced by [`RnnConfig::init`](crate::config::RnnConfig::init).
//! It is split into two groups:
//!
//! - **hidden layers**: the recurrent layers and any trailing linear reducers,
//!   chained so that each consumes the previous layer's width;
//! - **output layers**: one or more heads, each consuming the last hidden width.
//!
//! ## Forward Pass
//!
//! ```text
//! x [batch, seq, input_dim]
//!   -> for each hidden layer: layer -> (activation if linear) -> batch norm? -> dropout?
//!   -> for each head: head -> output activation          (heads run in parallel)
//!   -> concatenate heads on the feature axis
//!   -> y_range? lower + (upper - lower) * sigmoid(out)
//! ```
//!
//! Dropout and batch-norm statistics follow Burn's convention: they are in
//! training mode on an autodiff backend and in inference mode otherwise.

mod compiler;
mod layer;

pub use layer::{BatchNormLayer, CompiledLayer};

use burn::module::{Ignored, Module};
use burn::nn::Dropout;
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::activation::Activation;
use crate::error::BuilderError;

/// A network assembled from a layer specification.
#[derive(Module, Debug)]
pub struct Rnn<B: Backend> {
    hidden_layers: Vec<CompiledLayer<B>>,
    output_layers: Vec<CompiledLayer<B>>,
    batch_norm_layers: Vec<BatchNormLayer<B>>,
    dropout: Dropout,
    hidden_activations: Ignored<Vec<Activation>>,
    output_activations: Ignored<Vec<Activation>>,
    y_range: Ignored<Option<(f64, f64)>>,
    input_dim: usize,
}

impl<B: Backend> Rnn<B> {
    pub fn hidden_layers(&self) -> &[CompiledLayer<B>] {
        &self.hidden_layers
    }

    pub fn output_layers(&self) -> &[CompiledLayer<B>] {
        &self.output_layers
    }

    /// One per hidden layer when batch norm is enabled, empty otherwise.
    pub fn batch_norm_layers(&self) -> &[BatchNormLayer<B>] {
        &self.batch_norm_layers
    }

    pub fn dropout_prob(&self) -> f64 {
        self.dropout.prob
    }

    pub fn hidden_activations(&self) -> &[Activation] {
        &self.hidden_activations
    }

    pub fn output_activations(&self) -> &[Activation] {
        &self.output_activations
    }

    pub fn y_range(&self) -> Option<(f64, f64)> {
        *self.y_range
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Width of the concatenated head outputs.
    pub fn output_dim(&self) -> usize {
        self.output_layers.iter().map(CompiledLayer::output_size).sum()
    }

    /// Runs the network on `[batch, seq, input_dim]`, producing `[batch, seq, output_dim]`.
    ///
    /// # Errors
    /// [`BuilderError::InputShape`] when the feature axis does not match `input_dim`
    /// or the batch or sequence axis is empty.
    pub fn forward(&self, input: Tensor<B, 3>) -> Result<Tensor<B, 3>, BuilderError> {
        self.check_input(&input)?;
        Ok(self.forward_unchecked(input))
    }

    /// [`Rnn::forward`] without the shape check, for hot loops over data already
    /// known to fit.
    ///
    /// # Panics
    /// If the sequence axis is empty and the network has a recurrent layer.
    pub fn forward_unchecked(&self, input: Tensor<B, 3>) -> Tensor<B, 3> {
        let mut x = input;
        for (ix, layer) in self.hidden_layers.iter().enumerate() {
            x = layer.forward(x);
            if layer.as_linear().is_some() {
                x = self.hidden_activations[ix].apply(x);
            }
            if let Some(norm) = self.batch_norm_layers.get(ix) {
                x = norm.forward(x);
            }
            if self.dropout.prob > 0.0 {
                x = self.dropout.forward(x);
            }
        }

        let heads: Vec<Tensor<B, 3>> = self
            .output_layers
            .iter()
            .zip(self.output_activations.iter())
            .map(|(head, act)| act.apply(head.forward(x.clone())))
            .collect();
        let out = Tensor::cat(heads, 2);

        match *self.y_range {
            Some((lower, upper)) => activation::sigmoid(out)
                .mul_scalar(upper - lower)
                .add_scalar(lower),
            None => out,
        }
    }

    fn check_input(&self, input: &Tensor<B, 3>) -> Result<(), BuilderError> {
        let dims = input.dims();
        let [batch, seq, features] = dims;
        if features != self.input_dim || batch == 0 || seq == 0 {
            return Err(BuilderError::InputShape {
                expected: self.input_dim,
                actual: dims,
            });
        }
        Ok(())
    }
}

/// Output of the final timestep: `[batch, seq, features]` -> `[batch, features]`.
pub fn last_timestep<B: Backend>(output: Tensor<B, 3>) -> Tensor<B, 2> {
    let [_, seq_len, _] = output.dims();
    output.narrow(1, seq_len - 1, 1).squeeze::<2>(1)
}
