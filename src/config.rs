// src/config.rs

//! Configuration types for the pacer

// dependencies
use crate::errors::PacerError;

/// Default key substituted when a caller passes an empty key.
pub(crate) const DEFAULT_KEY: &str = "pacer.default";

/// Configuration for pacer behavior
#[derive(Debug, Clone)]
pub struct PacerConfig {
    pub(crate) default_key: String,
    pub(crate) inline_fallback: bool,
}

impl PacerConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self {
            default_key: DEFAULT_KEY.to_string(),
            inline_fallback: true,
        }
    }

    /// Builder-style: set the key substituted for empty keys.
    /// An empty key never drops a call; it coordinates under this key.
    pub fn default_key(mut self, key: impl Into<String>) -> Self {
        self.default_key = key.into();
        self
    }

    /// Builder-style: whether a failed execution-context dispatch runs the
    /// operation inline (true, the default) or only reports the failure
    pub fn inline_fallback(mut self, enabled: bool) -> Self {
        self.inline_fallback = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), PacerError> {
        if self.default_key.is_empty() {
            return Err(PacerError::EmptyDefaultKey);
        }
        Ok(())
    }
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self::new()
    }
}
