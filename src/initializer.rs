//! Weight initialiser names
//!
//! Maps the user-facing initialiser names onto [`burn::nn::Initializer`]. Aliases
//! follow the usual conventions: `glorot*` is Xavier, `he*` is Kaiming.

use std::fmt;
use std::str::FromStr;

use burn::nn::Initializer;
use serde::{Deserialize, Serialize};

use crate::error::BuilderError;

/// A named weight initialisation scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InitializerKind {
    /// Keep Burn's per-layer default.
    #[default]
    Default,
    Uniform,
    Normal,
    XavierUniform,
    XavierNormal,
    KaimingUniform,
    KaimingNormal,
}

impl InitializerKind {
    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            InitializerKind::Default => "default",
            InitializerKind::Uniform => "uniform",
            InitializerKind::Normal => "normal",
            InitializerKind::XavierUniform => "xavier_uniform",
            InitializerKind::XavierNormal => "xavier_normal",
            InitializerKind::KaimingUniform => "kaiming_uniform",
            InitializerKind::KaimingNormal => "kaiming_normal",
        }
    }

    /// The Burn initializer to hand to layer configs, `None` for the layer default.
    pub fn to_burn(self) -> Option<Initializer> {
        let relu_gain = 2.0f64.sqrt();
        match self {
            InitializerKind::Default => None,
            InitializerKind::Uniform => Some(Initializer::Uniform { min: 0.0, max: 1.0 }),
            InitializerKind::Normal => Some(Initializer::Normal {
                mean: 0.0,
                std: 1.0,
            }),
            InitializerKind::XavierUniform => Some(Initializer::XavierUniform { gain: 1.0 }),
            InitializerKind::XavierNormal => Some(Initializer::XavierNormal { gain: 1.0 }),
            InitializerKind::KaimingUniform => Some(Initializer::KaimingUniform {
                gain: relu_gain,
                fan_out_only: false,
            }),
            InitializerKind::KaimingNormal => Some(Initializer::KaimingNormal {
                gain: relu_gain,
                fan_out_only: false,
            }),
        }
    }
}

impl FromStr for InitializerKind {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.to_ascii_lowercase().as_str() {
            "default" => InitializerKind::Default,
            "uniform" => InitializerKind::Uniform,
            "normal" => InitializerKind::Normal,
            "xavier" | "xavier_uniform" | "glorot" | "glorot_uniform" => {
                InitializerKind::XavierUniform
            }
            "xavier_normal" | "glorot_normal" => InitializerKind::XavierNormal,
            "kaiming" | "kaiming_uniform" | "he" | "he_uniform" => InitializerKind::KaimingUniform,
            "kaiming_normal" | "he_normal" => InitializerKind::KaimingNormal,
            _ => return Err(BuilderError::InvalidInitialiser(s.to_string())),
        };
        Ok(kind)
    }
}

impl TryFrom<String> for InitializerKind {
    type Error = BuilderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InitializerKind> for String {
    fn from(kind: InitializerKind) -> Self {
        kind.name().to_string()
    }
}

impl fmt::Display for InitializerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve() {
        let cases = [
            ("xavier", InitializerKind::XavierUniform),
            ("Glorot_Uniform", InitializerKind::XavierUniform),
            ("glorot_normal", InitializerKind::XavierNormal),
            ("he", InitializerKind::KaimingUniform),
            ("HE_NORMAL", InitializerKind::KaimingNormal),
            ("default", InitializerKind::Default),
        ];
        for (name, expected) in cases {
            assert_eq!(name.parse::<InitializerKind>().unwrap(), expected, "{name}");
        }
    }

    #[test]
    fn test_unknown_names_rejected() {
        for name in ["aa", "Xavier_", "-1", "eye"] {
            assert!(matches!(
                name.parse::<InitializerKind>(),
                Err(BuilderError::InvalidInitialiser(_))
            ));
        }
    }

    #[test]
    fn test_default_defers_to_layer() {
        assert!(InitializerKind::Default.to_burn().is_none());
        assert!(matches!(
            InitializerKind::XavierUniform.to_burn(),
            Some(Initializer::XavierUniform { .. })
        ));
    }
}
