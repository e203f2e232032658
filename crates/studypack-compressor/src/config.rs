//! Configuration for the concise-text compressor

use serde::{Deserialize, Serialize};

/// Limits applied while compressing study elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressorConfig {
    /// Hard ceiling on the output length (characters) before the `...` marker
    pub max_chars: usize,

    /// Filtered tokens kept per definition
    pub definition_tokens: usize,

    /// Filtered tokens kept per question and per answer
    pub qa_tokens: usize,
}

impl CompressorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_chars == 0 {
            return Err("max_chars must be greater than 0".to_string());
        }
        if self.definition_tokens == 0 {
            return Err("definition_tokens must be greater than 0".to_string());
        }
        if self.qa_tokens == 0 {
            return Err("qa_tokens must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for CompressorConfig {
    /// Roughly 500 tokens of downstream context
    fn default() -> Self {
        Self {
            max_chars: 2000,
            definition_tokens: 15,
            qa_tokens: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CompressorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_limits_rejected() {
        for config in [
            CompressorConfig { max_chars: 0, ..Default::default() },
            CompressorConfig { definition_tokens: 0, ..Default::default() },
            CompressorConfig { qa_tokens: 0, ..Default::default() },
        ] {
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CompressorConfig { max_chars: 500, ..Default::default() };
        let parsed = CompressorConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
