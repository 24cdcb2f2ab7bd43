//! # Declarative Layer Specifications
//!
//! A network is described as an ordered list of layer descriptors. Every entry
//! but the last is a hidden layer; the last entry describes the output head(s):
//!
//! ```text
//! [["gru", 25], ["lstm", 23], ["linear", 5], ["linear", 10]]
//!   hidden: gru 25 -> lstm 23 -> linear 5      head: linear 10
//!
//! [["gru", 25], ["lstm", 23], [["lstm", 10], ["linear", 15]]]
//!   hidden: gru 25 -> lstm 23                  heads: lstm 10 | linear 15
//! ```
//!
//! Output heads run in parallel on the last hidden representation and their
//! outputs are concatenated along the feature axis.
//!
//! ## Rules
//!
//! | Rule | Rejected example |
//! |------|------------------|
//! | Known layer type | `["gruu", 33]` |
//! | Exactly `[type, width]` | `["linear", 12, 33]` |
//! | Positive integer width | `["lstm", 0]`, `["gru", 2.5]` |
//! | Linear layers only trail recurrent ones | `[["linear", 33], ["gru", 12], ["gru", 33]]` |
//! | Head groups only in last position | `[[["gru", 2]], ["gru", 3]]` |
//!
//! ## Example
//!
//! ```rust
//! use rnn_builder::spec::{LayerKind, LayerSpec};
//!
//! let spec = LayerSpec::from_json(r#"[["gru", 25], ["lstm", 23], [["lstm", 10], ["linear", 15]]]"#)
//!     .unwrap();
//!
//! assert_eq!(spec.hidden().len(), 2);
//! assert_eq!(spec.heads().len(), 2);
//! assert_eq!(spec.heads()[1].kind, LayerKind::Linear);
//! assert_eq!(spec.output_dim(), 25);
//! ```

mod descriptor;

pub use descriptor::{LayerDescriptor, LayerKind};

use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BuilderError;

/// A validated layer specification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct LayerSpec {
    hidden: Vec<LayerDescriptor>,
    heads: Vec<LayerDescriptor>,
}

impl LayerSpec {
    /// Builds a specification from typed descriptors.
    ///
    /// # Errors
    /// Fails when `heads` is empty, a width is zero, or a recurrent layer follows a
    /// linear one.
    pub fn new(
        hidden: Vec<LayerDescriptor>,
        heads: Vec<LayerDescriptor>,
    ) -> Result<Self, BuilderError> {
        if heads.is_empty() {
            return Err(BuilderError::EmptyLayers);
        }
        let spec = Self { hidden, heads };
        spec.validate()?;
        Ok(spec)
    }

    /// Convenience for the common single-head case: the last descriptor is the head.
    pub fn sequential(mut layers: Vec<LayerDescriptor>) -> Result<Self, BuilderError> {
        let head = layers.pop().ok_or(BuilderError::EmptyLayers)?;
        Self::new(layers, vec![head])
    }

    /// Parses the declarative JSON form, e.g. `[["gru", 20], ["linear", 1]]`.
    pub fn from_value(value: &Value) -> Result<Self, BuilderError> {
        let entries = value.as_array().ok_or_else(|| BuilderError::MalformedLayer {
            index: 0,
            message: "layers must be provided as a list".to_string(),
        })?;
        let (last, rest) = entries.split_last().ok_or(BuilderError::EmptyLayers)?;

        let mut hidden = Vec::with_capacity(rest.len());
        for (index, entry) in rest.iter().enumerate() {
            if is_head_group(entry) {
                return Err(BuilderError::MalformedLayer {
                    index,
                    message: "only the final entry may group several output heads".to_string(),
                });
            }
            hidden.push(LayerDescriptor::from_value(index, entry)?);
        }

        let first_head = rest.len();
        let heads = if is_head_group(last) {
            let group = last.as_array().map(Vec::as_slice).unwrap_or_default();
            group
                .iter()
                .enumerate()
                .map(|(offset, entry)| LayerDescriptor::from_value(first_head + offset, entry))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            vec![LayerDescriptor::from_value(first_head, last)?]
        };

        trace!(
            "parsed layer spec: {} hidden, {} head(s)",
            hidden.len(),
            heads.len()
        );
        Self::new(hidden, heads)
    }

    /// Parses the declarative form from JSON text.
    pub fn from_json(text: &str) -> Result<Self, BuilderError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Hidden layers, in order.
    pub fn hidden(&self) -> &[LayerDescriptor] {
        &self.hidden
    }

    /// Output heads, in order.
    pub fn heads(&self) -> &[LayerDescriptor] {
        &self.heads
    }

    /// Width fed into the output heads, given the network input width.
    pub fn head_input_dim(&self, input_dim: usize) -> usize {
        self.hidden.last().map_or(input_dim, |layer| layer.width)
    }

    /// Total output width: the sum of all head widths.
    pub fn output_dim(&self) -> usize {
        self.heads.iter().map(|head| head.width).sum()
    }

    /// Serialises back into the declarative JSON form.
    pub fn to_value(&self) -> Value {
        let mut entries: Vec<Value> = self.hidden.iter().map(LayerDescriptor::to_value).collect();
        match self.heads.as_slice() {
            [single] => entries.push(single.to_value()),
            heads => entries.push(Value::Array(
                heads.iter().map(LayerDescriptor::to_value).collect(),
            )),
        }
        Value::Array(entries)
    }

    fn validate(&self) -> Result<(), BuilderError> {
        let mut seen_linear = false;
        for (index, layer) in self.hidden.iter().chain(self.heads.iter()).enumerate() {
            if layer.width == 0 {
                return Err(BuilderError::ZeroWidth { index });
            }
            if seen_linear && layer.kind != LayerKind::Linear {
                return Err(BuilderError::LinearNotTrailing {
                    index,
                    kind: layer.kind.to_string(),
                });
            }
            seen_linear |= layer.kind == LayerKind::Linear;
        }
        Ok(())
    }
}

impl TryFrom<Value> for LayerSpec {
    type Error = BuilderError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

impl From<LayerSpec> for Value {
    fn from(spec: LayerSpec) -> Self {
        spec.to_value()
    }
}

/// A head group is a list whose first element is itself a list.
fn is_head_group(entry: &Value) -> bool {
    entry
        .as_array()
        .is_some_and(|items| items.is_empty() || items[0].is_array())
}
