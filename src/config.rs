//! Network configuration
//!
//! [`RnnConfig`] gathers everything needed to assemble a network: the layer
//! specification plus the scalar settings (activations, initialiser, dropout,
//! batch norm, output range). Activation and initialiser names are kept as the
//! user wrote them and checked by [`RnnConfig::validate`], so a config can be
//! deserialised from JSON first and rejected with a precise error afterwards.
//!
//! # Example
//!
//! ```json
//! {
//!   "input_dim": 15,
//!   "layers": [["gru", 20], ["lstm", 8], ["linear", 1]],
//!   "hidden_activations": "relu",
//!   "output_activation": "sigmoid",
//!   "initialiser": "xavier",
//!   "dropout": 0.1,
//!   "batch_norm": true,
//!   "y_range": [-1.0, 1.0]
//! }
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::activation::Activation;
use crate::error::BuilderError;
use crate::initializer::InitializerKind;
use crate::spec::LayerSpec;

/// One activation name for every layer, or one per layer.
///
/// `null` (or `"none"`) stands for the identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivationSpec {
    Single(Option<String>),
    PerLayer(Vec<Option<String>>),
}

impl ActivationSpec {
    /// Resolves the names into exactly `count` activations.
    ///
    /// A single name is repeated for every layer; a list must have one entry per layer.
    fn resolve(&self, count: usize, what: &'static str) -> Result<Vec<Activation>, BuilderError> {
        match self {
            ActivationSpec::Single(name) => {
                let activation = parse_optional(name.as_deref())?;
                Ok(vec![activation; count])
            }
            ActivationSpec::PerLayer(names) => {
                if names.len() != count {
                    return Err(BuilderError::ActivationCount {
                        what,
                        expected: count,
                        actual: names.len(),
                    });
                }
                names
                    .iter()
                    .map(|name| parse_optional(name.as_deref()))
                    .collect()
            }
        }
    }
}

impl Default for ActivationSpec {
    fn default() -> Self {
        ActivationSpec::Single(None)
    }
}

impl From<&str> for ActivationSpec {
    fn from(name: &str) -> Self {
        ActivationSpec::Single(Some(name.to_string()))
    }
}

impl From<Option<&str>> for ActivationSpec {
    fn from(name: Option<&str>) -> Self {
        ActivationSpec::Single(name.map(str::to_string))
    }
}

impl From<Vec<&str>> for ActivationSpec {
    fn from(names: Vec<&str>) -> Self {
        ActivationSpec::PerLayer(names.into_iter().map(|n| Some(n.to_string())).collect())
    }
}

fn parse_optional(name: Option<&str>) -> Result<Activation, BuilderError> {
    name.map_or(Ok(Activation::Identity), str::parse)
}

fn default_hidden_activations() -> ActivationSpec {
    ActivationSpec::from("relu")
}

fn default_initialiser() -> String {
    InitializerKind::Default.name().to_string()
}

/// Full description of a recurrent network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RnnConfig {
    /// Number of features per timestep in the input.
    pub input_dim: usize,
    /// Hidden layers followed by the output head(s).
    pub layers: LayerSpec,
    /// Activation applied after each linear hidden layer.
    #[serde(default = "default_hidden_activations")]
    pub hidden_activations: ActivationSpec,
    /// Activation applied to each output head.
    #[serde(default)]
    pub output_activation: ActivationSpec,
    #[serde(default = "default_initialiser")]
    pub initialiser: String,
    /// Dropout probability applied after every hidden layer.
    #[serde(default)]
    pub dropout: f64,
    #[serde(default)]
    pub batch_norm: bool,
    /// `(lower, upper)`: squashes the output into this open interval.
    #[serde(default)]
    pub y_range: Option<(f64, f64)>,
    /// Seeds the backend RNG before the weights are drawn.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// The outcome of a successful [`RnnConfig::validate`].
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedConfig {
    /// One per hidden layer.
    pub hidden_activations: Vec<Activation>,
    /// One per output head.
    pub output_activations: Vec<Activation>,
    pub initializer: InitializerKind,
}

impl RnnConfig {
    pub fn new(input_dim: usize, layers: LayerSpec) -> Self {
        Self {
            input_dim,
            layers,
            hidden_activations: default_hidden_activations(),
            output_activation: ActivationSpec::default(),
            initialiser: default_initialiser(),
            dropout: 0.0,
            batch_norm: false,
            y_range: None,
            seed: None,
        }
    }

    pub fn with_hidden_activations(mut self, activations: impl Into<ActivationSpec>) -> Self {
        self.hidden_activations = activations.into();
        self
    }

    pub fn with_output_activation(mut self, activation: impl Into<ActivationSpec>) -> Self {
        self.output_activation = activation.into();
        self
    }

    pub fn with_initialiser(mut self, initialiser: &str) -> Self {
        self.initialiser = initialiser.to_string();
        self
    }

    pub fn with_dropout(mut self, dropout: f64) -> Self {
        self.dropout = dropout;
        self
    }

    pub fn with_batch_norm(mut self, batch_norm: bool) -> Self {
        self.batch_norm = batch_norm;
        self
    }

    pub fn with_y_range(mut self, lower: f64, upper: f64) -> Self {
        self.y_range = Some((lower, upper));
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks every scalar setting against the layer specification.
    pub fn validate(&self) -> Result<ValidatedConfig, BuilderError> {
        if self.input_dim == 0 {
            return Err(BuilderError::InvalidInputDim);
        }

        let hidden_activations = self
            .hidden_activations
            .resolve(self.layers.hidden().len(), "hidden_activations")?;
        let output_activations = self
            .output_activation
            .resolve(self.layers.heads().len(), "output_activation")?;
        let initializer = self.initialiser.parse::<InitializerKind>()?;

        if let Some((lower, upper)) = self.y_range {
            if !(lower.is_finite() && upper.is_finite() && lower < upper) {
                return Err(BuilderError::InvalidYRange(lower, upper));
            }
        }

        if !(0.0..1.0).contains(&self.dropout) {
            return Err(BuilderError::InvalidDropout(self.dropout));
        }

        Ok(ValidatedConfig {
            hidden_activations,
            output_activations,
            initializer,
        })
    }
}

/// Loads and validates a network configuration from a JSON file.
///
/// ```no_run
/// use rnn_builder::config::load_config;
///
/// let cfg = load_config("config/classifier.json").unwrap();
/// assert!(cfg.input_dim > 0);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RnnConfig, BuilderError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let config: RnnConfig = serde_json::from_str(&contents)?;
    config.validate()?;
    debug!("loaded network config from {}", path.display());
    Ok(config)
}
