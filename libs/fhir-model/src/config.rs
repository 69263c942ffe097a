//! Model configuration
//!
//! Controls the optional parts of build-time validation. The structural checks
//! (required elements, choice membership, containment) are always on; the
//! switches here only cover the lexical and reference checks that some callers
//! (bulk importers, test fixtures) prefer to relax.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Maximum length of a string value (1 MiB)
pub const DEFAULT_MAX_STRING_LENGTH: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Reject string values containing control characters below U+0020
    /// (other than tab, carriage return and line feed)
    pub check_control_chars: bool,

    /// Check the resource type found in `Reference.reference` / `Reference.type`
    /// against the element's declared target types
    pub check_reference_types: bool,

    /// Enforce `ele-1`: every non-resource node has a value or children
    pub require_value_or_children: bool,

    /// Maximum length of string-like primitive values
    pub max_string_length: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl ModelConfig {
    /// All checks enabled
    pub fn strict() -> Self {
        Self {
            check_control_chars: true,
            check_reference_types: true,
            require_value_or_children: true,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
        }
    }

    /// Structural checks only
    pub fn lenient() -> Self {
        Self {
            check_control_chars: false,
            check_reference_types: false,
            require_value_or_children: false,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
        }
    }

    pub fn builder() -> ModelConfigBuilder {
        ModelConfigBuilder::default()
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModelConfigBuilder {
    config: ModelConfig,
}

impl ModelConfigBuilder {
    pub fn lenient(mut self) -> Self {
        self.config = ModelConfig::lenient();
        self
    }

    pub fn check_control_chars(mut self, enabled: bool) -> Self {
        self.config.check_control_chars = enabled;
        self
    }

    pub fn check_reference_types(mut self, enabled: bool) -> Self {
        self.config.check_reference_types = enabled;
        self
    }

    pub fn require_value_or_children(mut self, enabled: bool) -> Self {
        self.config.require_value_or_children = enabled;
        self
    }

    pub fn max_string_length(mut self, length: usize) -> Self {
        self.config.max_string_length = length;
        self
    }

    pub fn build(self) -> ModelConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_strict() {
        assert_eq!(ModelConfig::default(), ModelConfig::strict());
        assert!(ModelConfig::default().check_reference_types);
    }

    #[test]
    fn builder_overrides_preset() {
        let config = ModelConfig::builder()
            .lenient()
            .check_reference_types(true)
            .max_string_length(64)
            .build();

        assert!(config.check_reference_types);
        assert!(!config.check_control_chars);
        assert_eq!(config.max_string_length, 64);
    }

    #[test]
    fn yaml_fills_missing_fields_with_defaults() {
        let config = ModelConfig::from_yaml("check_reference_types: false\n").unwrap();

        assert!(!config.check_reference_types);
        assert!(config.check_control_chars);
        assert_eq!(config.max_string_length, DEFAULT_MAX_STRING_LENGTH);
    }

    #[test]
    fn yaml_round_trip() {
        let config = ModelConfig::lenient();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(ModelConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn invalid_yaml_is_a_config_error() {
        let err = ModelConfig::from_yaml("max_string_length: [1, 2]").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
