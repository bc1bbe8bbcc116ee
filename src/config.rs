//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{PhonoResult, ValidationError};
use crate::ordering::{CaseOrdering, ReplayOrder};

/// Parameters for an inventory simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Observations of a phoneme required before it counts as sampled.
    pub threshold: usize,
    /// Count each cluster as its two constituents instead of one unit.
    pub split_consonant_clusters: bool,
    /// Replay order; `None` replays in insertion order.
    pub ordering: Option<ReplayOrder>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold: 1,
            split_consonant_clusters: true,
            ordering: Some(ReplayOrder::Strategy(CaseOrdering::EasyFirst)),
        }
    }
}

impl EngineConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidConfig`] if `threshold` is 0.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.threshold == 0 {
            return Err(ValidationError::InvalidConfig {
                reason: "threshold must be > 0".to_string(),
            });
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration. Missing keys take defaults.
    ///
    /// # Errors
    /// Returns a config error for malformed JSON and a validation error for
    /// out-of-range values.
    pub fn from_json_str(json: &str) -> PhonoResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let config = EngineConfig {
            threshold: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(EngineConfig::from_json_str(r#"{"threshold":0}"#)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn json_fills_defaults() {
        let config = EngineConfig::from_json_str(r#"{"threshold":3}"#).unwrap();
        assert_eq!(config.threshold, 3);
        assert!(config.split_consonant_clusters);
        assert_eq!(
            config.ordering,
            Some(ReplayOrder::Strategy(CaseOrdering::EasyFirst))
        );

        let json = serde_json::json!({
            "split_consonant_clusters": false,
            "ordering": { "type": "strategy", "value": "tree_order" },
        })
        .to_string();
        let config = EngineConfig::from_json_str(&json).unwrap();
        assert!(!config.split_consonant_clusters);
        assert_eq!(
            config.ordering,
            Some(ReplayOrder::Strategy(CaseOrdering::TreeOrder))
        );
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(EngineConfig::from_json_str("{threshold:").unwrap_err().is_config());
    }
}
