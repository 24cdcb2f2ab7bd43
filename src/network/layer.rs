//! Compiled layer wrappers

use burn::module::Module;
use burn::nn::{BatchNorm, BatchNormConfig, Initializer, Linear};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::cells::linear_layer;
use crate::rnn::{Gru, Lstm};
use crate::spec::{LayerDescriptor, LayerKind};

/// One layer of a compiled network: exactly one of the three slots is filled.
#[derive(Module, Debug)]
pub struct CompiledLayer<B: Backend> {
    linear: Option<Linear<B>>,
    gru: Option<Gru<B>>,
    lstm: Option<Lstm<B>>,
    input_size: usize,
    output_size: usize,
}

impl<B: Backend> CompiledLayer<B> {
    /// Instantiates the layer described by `descriptor`, consuming `input_size` features.
    pub fn new(
        descriptor: LayerDescriptor,
        input_size: usize,
        initializer: Option<&Initializer>,
        device: &B::Device,
    ) -> Self {
        let width = descriptor.width;
        let (linear, gru, lstm) = match descriptor.kind {
            LayerKind::Linear => (
                Some(linear_layer(input_size, width, true, initializer, device)),
                None,
                None,
            ),
            LayerKind::Gru => (
                None,
                Some(Gru::with_initializer(input_size, width, initializer, device)),
                None,
            ),
            LayerKind::Lstm => (
                None,
                None,
                Some(Lstm::with_initializer(input_size, width, initializer, device)),
            ),
        };

        Self {
            linear,
            gru,
            lstm,
            input_size,
            output_size: width,
        }
    }

    pub fn kind(&self) -> LayerKind {
        if self.gru.is_some() {
            LayerKind::Gru
        } else if self.lstm.is_some() {
            LayerKind::Lstm
        } else {
            LayerKind::Linear
        }
    }

    /// Features consumed per timestep (`in_features` / `input_size`).
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Features produced per timestep (`out_features` / `hidden_size`).
    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn as_linear(&self) -> Option<&Linear<B>> {
        self.linear.as_ref()
    }

    pub fn as_gru(&self) -> Option<&Gru<B>> {
        self.gru.as_ref()
    }

    pub fn as_lstm(&self) -> Option<&Lstm<B>> {
        self.lstm.as_ref()
    }

    /// `[batch, seq, input_size]` -> `[batch, seq, output_size]`.
    ///
    /// Recurrent layers return the output of every timestep; linear layers are
    /// applied to each timestep independently.
    pub fn forward(&self, input: Tensor<B, 3>) -> Tensor<B, 3> {
        if let Some(gru) = &self.gru {
            return gru.forward(input, None).0;
        }
        if let Some(lstm) = &self.lstm {
            return lstm.forward(input, None).0;
        }
        match &self.linear {
            Some(linear) => linear.forward(input),
            None => input,
        }
    }
}

/// Batch normalisation over the feature channel of a `[batch, seq, features]` tensor.
#[derive(Module, Debug)]
pub struct BatchNormLayer<B: Backend> {
    norm: BatchNorm<B, 1>,
    num_features: usize,
}

impl<B: Backend> BatchNormLayer<B> {
    pub fn new(num_features: usize, device: &B::Device) -> Self {
        Self {
            norm: BatchNormConfig::new(num_features).init(device),
            num_features,
        }
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Normalises each feature over the batch and sequence axes.
    pub fn forward(&self, input: Tensor<B, 3>) -> Tensor<B, 3> {
        // BatchNorm expects channels on axis 1: [batch, features, seq]
        let channels_first = input.swap_dims(1, 2);
        self.norm.forward(channels_first).swap_dims(1, 2)
    }
}
