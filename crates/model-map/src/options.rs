use serde::{Deserialize, Serialize};

/// How strictly missing keys are treated while decoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Missing keys resolve to the field's default value
    #[default]
    Lenient,
    /// Missing keys on plain scalar fields are an error. Explicit `null`
    /// is still accepted, and fields that are optional by contract
    /// (`avatar_url`, `scopes`, nested objects) are never required.
    Strict,
}

/// Options shared by every decoder. Immutable once handed to a registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub mode: DecodeMode,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self {
            mode: DecodeMode::Strict,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.mode == DecodeMode::Strict
    }
}
