use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BuilderError;

/// The kind of layer a descriptor asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Linear,
    Gru,
    Lstm,
}

impl LayerKind {
    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Linear => "linear",
            LayerKind::Gru => "gru",
            LayerKind::Lstm => "lstm",
        }
    }

    pub fn is_recurrent(self) -> bool {
        !matches!(self, LayerKind::Linear)
    }
}

impl FromStr for LayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(LayerKind::Linear),
            "gru" => Ok(LayerKind::Gru),
            "lstm" => Ok(LayerKind::Lstm),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One `[type, width]` entry of a layer specification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerDescriptor {
    pub kind: LayerKind,
    /// Output width of the layer (hidden size for recurrent layers).
    pub width: usize,
}

impl LayerDescriptor {
    pub fn new(kind: LayerKind, width: usize) -> Self {
        Self { kind, width }
    }

    pub fn linear(width: usize) -> Self {
        Self::new(LayerKind::Linear, width)
    }

    pub fn gru(width: usize) -> Self {
        Self::new(LayerKind::Gru, width)
    }

    pub fn lstm(width: usize) -> Self {
        Self::new(LayerKind::Lstm, width)
    }

    /// Parses `["gru", 25]`. `index` is only used to label errors.
    pub(crate) fn from_value(index: usize, value: &Value) -> Result<Self, BuilderError> {
        let malformed = |message: &str| BuilderError::MalformedLayer {
            index,
            message: message.to_string(),
        };

        let items = value
            .as_array()
            .ok_or_else(|| malformed("each layer must be a list of the form [layer_type, width]"))?;
        let [tag, width] = items.as_slice() else {
            return Err(malformed("layer must be of the form [layer_type, width]"));
        };

        let tag = tag
            .as_str()
            .ok_or_else(|| malformed("first element of a layer must be its type name"))?;
        let kind = tag
            .parse::<LayerKind>()
            .map_err(|name| BuilderError::UnknownLayerType { index, name })?;

        let width = width
            .as_u64()
            .ok_or_else(|| malformed("layer width must be a positive integer"))?;
        if width == 0 {
            return Err(BuilderError::ZeroWidth { index });
        }
        let width = usize::try_from(width).map_err(|_| malformed("layer width is too large"))?;

        Ok(Self { kind, width })
    }

    pub(crate) fn to_value(&self) -> Value {
        Value::Array(vec![
            Value::String(self.kind.name().to_string()),
            Value::from(self.width),
        ])
    }
}

impl fmt::Display for LayerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.kind, self.width)
    }
}
