//! Named activation functions
//!
//! Layer specifications refer to activations by name (`"relu"`, `"softmax"`, ...).
//! This module maps those names onto Burn tensor operations. Functions that Burn
//! does not ship directly (ELU, SELU, hard-shrink, ...) are composed from
//! element-wise primitives.

use std::fmt;
use std::str::FromStr;

use burn::tensor::activation;
use burn::tensor::{backend::Backend, Tensor};
use serde::{Deserialize, Serialize};

use crate::error::BuilderError;

const LEAKY_RELU_SLOPE: f64 = 0.01;
const HARD_SHRINK_LAMBDA: f64 = 0.5;
const SELU_ALPHA: f64 = 1.673_263_242_354_377_3;
const SELU_SCALE: f64 = 1.050_700_987_355_480_5;

/// An element-wise (or, for the softmax family, last-axis) activation.
///
/// Names are matched case-insensitively; `"none"` is the identity.
///
/// # Example
///
/// ```rust
/// use burn::backend::NdArray;
/// use burn::tensor::Tensor;
/// use rnn_builder::activation::Activation;
///
/// type Backend = NdArray<f32>;
/// let device = Default::default();
///
/// let act: Activation = "ReLU".parse().unwrap();
/// let x = Tensor::<Backend, 1>::from_floats([-1.0, 2.0], &device);
/// let y = act.apply(x);
/// assert_eq!(y.into_data().to_vec::<f32>().unwrap(), vec![0.0, 2.0]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Activation {
    Identity,
    Elu,
    HardShrink,
    HardTanh,
    LeakyRelu,
    LogSigmoid,
    Relu,
    Relu6,
    Selu,
    Sigmoid,
    Softplus,
    LogSoftmax,
    Softmax,
    Tanh,
}

impl Activation {
    /// Every accepted activation, in the order used for error messages.
    pub const ALL: [Activation; 14] = [
        Activation::Elu,
        Activation::HardShrink,
        Activation::HardTanh,
        Activation::LeakyRelu,
        Activation::LogSigmoid,
        Activation::Relu,
        Activation::Relu6,
        Activation::Selu,
        Activation::Sigmoid,
        Activation::Softplus,
        Activation::LogSoftmax,
        Activation::Softmax,
        Activation::Tanh,
        Activation::Identity,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Activation::Identity => "none",
            Activation::Elu => "elu",
            Activation::HardShrink => "hardshrink",
            Activation::HardTanh => "hardtanh",
            Activation::LeakyRelu => "leakyrelu",
            Activation::LogSigmoid => "logsigmoid",
            Activation::Relu => "relu",
            Activation::Relu6 => "relu6",
            Activation::Selu => "selu",
            Activation::Sigmoid => "sigmoid",
            Activation::Softplus => "softplus",
            Activation::LogSoftmax => "logsoftmax",
            Activation::Softmax => "softmax",
            Activation::Tanh => "tanh",
        }
    }

    /// Applies the activation. Softmax and log-softmax normalise over the last axis.
    pub fn apply<B: Backend, const D: usize>(self, x: Tensor<B, D>) -> Tensor<B, D> {
        match self {
            Activation::Identity => x,
            Activation::Elu => {
                let negative = x.clone().clamp_max(0.0).exp().sub_scalar(1.0);
                x.clamp_min(0.0) + negative
            }
            Activation::HardShrink => {
                let inside = x.clone().abs().lower_equal_elem(HARD_SHRINK_LAMBDA);
                x.mask_fill(inside, 0.0)
            }
            Activation::HardTanh => x.clamp(-1.0, 1.0),
            Activation::LeakyRelu => {
                let negative = activation::relu(x.clone().neg()).mul_scalar(LEAKY_RELU_SLOPE);
                activation::relu(x) - negative
            }
            Activation::LogSigmoid => activation::log_sigmoid(x),
            Activation::Relu => activation::relu(x),
            Activation::Relu6 => activation::relu(x).clamp_max(6.0),
            Activation::Selu => {
                let negative = x
                    .clone()
                    .clamp_max(0.0)
                    .exp()
                    .sub_scalar(1.0)
                    .mul_scalar(SELU_ALPHA);
                (x.clamp_min(0.0) + negative).mul_scalar(SELU_SCALE)
            }
            Activation::Sigmoid => activation::sigmoid(x),
            // relu(x) + log(1 + exp(-|x|)) stays finite for large inputs
            Activation::Softplus => {
                let tail = x.clone().abs().neg().exp().log1p();
                activation::relu(x) + tail
            }
            Activation::LogSoftmax => activation::log_softmax(x, D - 1),
            Activation::Softmax => activation::softmax(x, D - 1),
            Activation::Tanh => x.tanh(),
        }
    }
}

impl FromStr for Activation {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Activation::ALL
            .into_iter()
            .find(|act| act.name() == lowered)
            .ok_or_else(|| BuilderError::InvalidActivation(s.to_string()))
    }
}

impl TryFrom<String> for Activation {
    type Error = BuilderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Activation> for String {
    fn from(act: Activation) -> Self {
        act.name().to_string()
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
