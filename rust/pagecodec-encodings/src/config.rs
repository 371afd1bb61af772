use pagecodec_common::verify_arg;
use serde::{Deserialize, Serialize};

/// Column-level settings for byte-array page decoders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ByteArrayDecoderConfig {
    /// Width of every value for fixed-width columns. `None` or `Some(0)`
    /// selects length-prefixed values.
    pub fixed_length: Option<usize>,

    /// Whether dictionary pages of fixed-width columns store their entries
    /// without length prefixes. When unset, dictionary pages are always read
    /// as length-prefixed values.
    pub dictionary_fixed_length: bool,
}

impl ByteArrayDecoderConfig {
    /// Configuration for a column of `length`-byte values.
    pub fn fixed(length: usize) -> Self {
        Self {
            fixed_length: Some(length),
            ..Default::default()
        }
    }

    /// Parses and validates a configuration.
    pub fn from_json(json: &str) -> pagecodec_common::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Fixed-width dictionary framing needs a non-zero value width.
    pub fn validate(&self) -> pagecodec_common::Result<()> {
        verify_arg!(
            dictionary_fixed_length,
            !self.dictionary_fixed_length || self.value_length().is_some()
        );
        Ok(())
    }

    /// Value width for PLAIN data pages.
    pub fn value_length(&self) -> Option<usize> {
        self.fixed_length.filter(|&len| len != 0)
    }

    /// Value width for dictionary pages.
    pub fn dictionary_value_length(&self) -> Option<usize> {
        if self.dictionary_fixed_length {
            self.value_length()
        } else {
            None
        }
    }
}
