//! Turns a validated [`RnnConfig`] into an [`Rnn`].

use burn::module::Ignored;
use burn::nn::DropoutConfig;
use burn::tensor::backend::Backend;
use log::debug;

use super::{BatchNormLayer, CompiledLayer, Rnn};
use crate::config::RnnConfig;
use crate::error::BuilderError;

impl RnnConfig {
    /// Validates the configuration and instantiates every layer on `device`.
    ///
    /// Hidden layers are chained: the first consumes `input_dim`, each later one
    /// consumes its predecessor's width. All output heads consume the width of the
    /// last hidden layer.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<Rnn<B>, BuilderError> {
        let validated = self.validate()?;
        if let Some(seed) = self.seed {
            B::seed(seed);
        }
        let initializer = validated.initializer.to_burn();

        let mut width = self.input_dim;
        let mut hidden_layers = Vec::with_capacity(self.layers.hidden().len());
        for descriptor in self.layers.hidden() {
            debug!("hidden layer {}: {} -> {}", descriptor, width, descriptor.width);
            hidden_layers.push(CompiledLayer::new(
                *descriptor,
                width,
                initializer.as_ref(),
                device,
            ));
            width = descriptor.width;
        }

        let output_layers = self
            .layers
            .heads()
            .iter()
            .map(|descriptor| {
                debug!("output head {}: {} -> {}", descriptor, width, descriptor.width);
                CompiledLayer::new(*descriptor, width, initializer.as_ref(), device)
            })
            .collect();

        let batch_norm_layers = if self.batch_norm {
            self.layers
                .hidden()
                .iter()
                .map(|descriptor| BatchNormLayer::new(descriptor.width, device))
                .collect()
        } else {
            Vec::new()
        };

        debug!(
            "compiled network: {} hidden, {} head(s), batch_norm={}, dropout={}, init={}",
            hidden_layers.len(),
            self.layers.heads().len(),
            self.batch_norm,
            self.dropout,
            validated.initializer
        );

        Ok(Rnn {
            hidden_layers,
            output_layers,
            batch_norm_layers,
            dropout: DropoutConfig::new(self.dropout).init(),
            hidden_activations: Ignored(validated.hidden_activations),
            output_activations: Ignored(validated.output_activations),
            y_range: Ignored(self.y_range),
            input_dim: self.input_dim,
        })
    }
}
