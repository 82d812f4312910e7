//! Error types for the salted Bloom filter

use thiserror::Error;

/// Errors that can occur when building or poking a Bloom filter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("Invalid bits per element: {value} (must be finite and > 0)")]
    InvalidBitsPerElement { value: f64 },

    #[error("Invalid expected element count: {count} (must be > 0)")]
    InvalidExpectedCount { count: usize },

    #[error("Invalid hash function count: {count} (must be >= 1)")]
    InvalidHashCount { count: usize },

    #[error("Hash function count exceeds salt capacity: {requested} > {max}")]
    HashCountTooLarge { requested: usize, max: usize },

    #[error("Invalid false positive rate: {fpr} (must be strictly between 0 and 1)")]
    InvalidFalsePositiveRate { fpr: f64 },

    #[error("Invalid bit budget: {size} (must be > 0)")]
    InvalidBitBudget { size: usize },

    #[error("Filter size exceeds maximum: {size} > {max}")]
    FilterTooLarge { size: u64, max: u64 },

    #[error("Bit index out of range: {index} >= {size}")]
    BitIndexOutOfRange { index: usize, size: usize },

    #[error("Invalid filter configuration: {0}")]
    InvalidConfig(String),
}

impl FilterError {
    /// Whether this error was raised while sizing a new filter
    pub fn is_construction_error(&self) -> bool {
        !matches!(
            self,
            FilterError::BitIndexOutOfRange { .. } | FilterError::InvalidConfig(_)
        )
    }
}
