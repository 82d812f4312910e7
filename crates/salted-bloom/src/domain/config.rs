//! Bloom filter configuration and validation
//!
//! # Example
//!
//! ```
//! use salted_bloom::{BloomFilter, FilterConfigBuilder};
//!
//! let config = FilterConfigBuilder::new()
//!     .expected_count(500)
//!     .false_positive_rate(0.05)
//!     .build()
//!     .expect("Valid config");
//!
//! let filter = BloomFilter::from_config(&config).unwrap();
//! assert_eq!(filter.expected_count(), 500);
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::parameters::FilterParams;
use crate::error::FilterError;

/// How the bit array and hash count are chosen
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Sizing {
    /// Explicit bits per element and hash count
    BitsPerElement {
        bits_per_element: f64,
        hash_count: usize,
    },
    /// Total bit budget; the optimal hash count is derived
    BitBudget { size_bits: usize },
    /// Target false positive probability; bits and hash count are derived
    FalsePositiveRate { probability: f64 },
}

/// Bloom filter configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Number of elements the filter is sized for
    pub expected_count: usize,
    /// Sizing strategy
    pub sizing: Sizing,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            expected_count: 10_000,
            sizing: Sizing::FalsePositiveRate { probability: 0.01 },
        }
    }
}

impl FilterConfig {
    /// Create a new configuration with validation
    pub fn new(expected_count: usize, sizing: Sizing) -> Result<Self, FilterError> {
        let config = Self {
            expected_count,
            sizing,
        };
        config.validate()?;
        Ok(config)
    }

    /// Resolve the sizing into concrete filter parameters
    pub fn params(&self) -> Result<FilterParams, FilterError> {
        match self.sizing {
            Sizing::BitsPerElement {
                bits_per_element,
                hash_count,
            } => FilterParams::from_bits_per_element(bits_per_element, self.expected_count, hash_count),
            Sizing::BitBudget { size_bits } => {
                FilterParams::from_bit_budget(size_bits, self.expected_count)
            }
            Sizing::FalsePositiveRate { probability } => {
                FilterParams::from_false_positive_rate(probability, self.expected_count)
            }
        }
    }

    /// Validate that the configuration yields a constructible filter
    pub fn validate(&self) -> Result<(), FilterError> {
        self.params().map(|_| ())
    }

    /// Parse and validate a JSON configuration
    ///
    /// ```json
    /// { "expected_count": 10000, "sizing": { "mode": "false_positive_rate", "probability": 0.01 } }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        let config: FilterConfig =
            serde_json::from_str(json).map_err(|e| FilterError::InvalidConfig(e.to_string()))?;
        trace!(?config, "Parsed filter config");
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> Result<String, FilterError> {
        serde_json::to_string_pretty(self).map_err(|e| FilterError::InvalidConfig(e.to_string()))
    }

    /// Builder-style method to set the expected count
    pub fn with_expected_count(mut self, expected_count: usize) -> Self {
        self.expected_count = expected_count;
        self
    }

    /// Builder-style method to set the sizing strategy
    pub fn with_sizing(mut self, sizing: Sizing) -> Self {
        self.sizing = sizing;
        self
    }
}

/// Builder for FilterConfig with validation
///
/// The last sizing method called wins.
#[derive(Default)]
pub struct FilterConfigBuilder {
    expected_count: Option<usize>,
    sizing: Option<Sizing>,
}

impl FilterConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of elements the filter is sized for
    pub fn expected_count(mut self, count: usize) -> Self {
        self.expected_count = Some(count);
        self
    }

    /// Size for a target false positive probability
    pub fn false_positive_rate(mut self, probability: f64) -> Self {
        self.sizing = Some(Sizing::FalsePositiveRate { probability });
        self
    }

    /// Size from a total bit budget
    pub fn bit_budget(mut self, size_bits: usize) -> Self {
        self.sizing = Some(Sizing::BitBudget { size_bits });
        self
    }

    /// Size from explicit bits per element and hash count
    pub fn bits_per_element(mut self, bits_per_element: f64, hash_count: usize) -> Self {
        self.sizing = Some(Sizing::BitsPerElement {
            bits_per_element,
            hash_count,
        });
        self
    }

    /// Build the FilterConfig, validating all parameters
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        let defaults = FilterConfig::default();

        let config = FilterConfig {
            expected_count: self.expected_count.unwrap_or(defaults.expected_count),
            sizing: self.sizing.unwrap_or(defaults.sizing),
        };

        config.validate()?;
        Ok(config)
    }
}
