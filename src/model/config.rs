//! Model Configuration Module
//!
//! Defines the serializable hyperparameter set for the classifier, with
//! validation of the pooling geometry the architecture hard-codes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::cnn::{VggSimpleConfig, FLATTENED_FEATURES};
use crate::utils::error::{Result, VggSimpleError};

/// Hyperparameter configuration for the classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Number of output classes
    pub num_classes: usize,

    /// Input image size (width and height, assumed square)
    pub input_size: usize,

    /// Number of input channels (3 for RGB)
    pub in_channels: usize,

    /// Dropout rate for regularization (0.0 to 1.0)
    pub dropout_rate: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            num_classes: 10,
            input_size: 200,
            in_channels: 3,
            dropout_rate: 0.15,
        }
    }
}

impl ModelConfig {
    /// Create a configuration for a given number of classes
    pub fn new(num_classes: usize) -> Self {
        Self {
            num_classes,
            ..Default::default()
        }
    }

    /// Spatial size of the feature map after both 5× pooling stages
    pub fn pooled_size(&self) -> usize {
        self.input_size / 25
    }

    /// Flattened feature length produced by the feature extractor
    pub fn flattened_features(&self) -> usize {
        self.pooled_size() * self.pooled_size() * 128
    }

    /// Validate the configuration
    ///
    /// The convolutions preserve spatial size, so the input size must pool
    /// down to exactly the 8×8 map the classifier head is sized for.
    pub fn validate(&self) -> Result<()> {
        if self.num_classes == 0 {
            return Err(VggSimpleError::Config(
                "num_classes must be greater than 0".to_string(),
            ));
        }

        if self.in_channels != 3 {
            return Err(VggSimpleError::Config(format!(
                "the architecture expects 3 input channels, got {}",
                self.in_channels
            )));
        }

        if !(0.0..1.0).contains(&self.dropout_rate) {
            return Err(VggSimpleError::Config(
                "dropout_rate must be in range [0.0, 1.0)".to_string(),
            ));
        }

        if self.input_size % 25 != 0 || self.flattened_features() != FLATTENED_FEATURES {
            return Err(VggSimpleError::Config(format!(
                "input_size {} does not pool down to the 8×8 map expected by \
                 the classifier head (use 200)",
                self.input_size
            )));
        }

        Ok(())
    }

    /// Lower a validated configuration into the architecture config
    pub fn classifier_config(&self) -> Result<VggSimpleConfig> {
        self.validate()?;
        Ok(VggSimpleConfig::new()
            .with_num_classes(self.num_classes)
            .with_dropout_rate(self.dropout_rate))
    }

    /// Save the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| VggSimpleError::Serialization(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| VggSimpleError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ModelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pooled_size(), 8);
        assert_eq!(config.flattened_features(), 8192);
    }

    #[test]
    fn test_zero_classes_rejected() {
        let config = ModelConfig::new(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_dropout_rejected() {
        let config = ModelConfig {
            dropout_rate: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_incompatible_input_size_rejected() {
        let config = ModelConfig {
            input_size: 64,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        // A multiple of 25 that still pools to the wrong map size
        let config = ModelConfig {
            input_size: 100,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_classifier_config_carries_hyperparameters() {
        let config = ModelConfig::new(42);
        let classifier = config.classifier_config().unwrap();
        assert_eq!(classifier.num_classes, 42);
        assert_eq!(classifier.dropout_rate, 0.15);
    }
}
