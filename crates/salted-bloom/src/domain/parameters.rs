//! Bloom filter sizing
//!
//! Formulas:
//! - m = ceil(bits_per_element * n)
//! - k = round(bits_per_element * ln(2))        -- optimal k for a bit budget
//! - bits_per_element = -ln(p) / (ln(2)^2)      -- optimal bits for a target p
//! - k = ceil(-ln(p) / ln(2))                   -- optimal k for a target p
//! - FPR = (1 - e^(-kn/m))^k

use std::f64::consts::LN_2;

use serde::{Deserialize, Serialize};

use super::hash_functions::MAX_HASH_COUNT;
use crate::error::FilterError;

/// Largest bit array a filter may use.
///
/// Bit indices are `|h| mod m` for a 32-bit hash `h`, so `|h| <= 2^31` and no
/// index above `2^31` is reachable.
pub const MAX_SIZE_BITS: usize = 1 << 31;

/// Validated sizing of a Bloom filter
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Requested bits per expected element
    pub bits_per_element: f64,
    /// Number of elements the filter is sized for (n)
    pub expected_count: usize,
    /// Number of bits in the filter (m)
    pub size_bits: usize,
    /// Number of hash functions (k)
    pub hash_count: usize,
}

impl FilterParams {
    /// Canonical sizing: `m = ceil(bits_per_element * expected_count)`.
    pub fn from_bits_per_element(
        bits_per_element: f64,
        expected_count: usize,
        hash_count: usize,
    ) -> Result<Self, FilterError> {
        if !bits_per_element.is_finite() || bits_per_element <= 0.0 {
            return Err(FilterError::InvalidBitsPerElement {
                value: bits_per_element,
            });
        }
        if expected_count == 0 {
            return Err(FilterError::InvalidExpectedCount {
                count: expected_count,
            });
        }
        if hash_count == 0 {
            return Err(FilterError::InvalidHashCount { count: hash_count });
        }
        if hash_count > MAX_HASH_COUNT {
            return Err(FilterError::HashCountTooLarge {
                requested: hash_count,
                max: MAX_HASH_COUNT,
            });
        }

        let size = (bits_per_element * expected_count as f64).ceil();
        if !size.is_finite() || size > MAX_SIZE_BITS as f64 {
            return Err(FilterError::FilterTooLarge {
                // `as` saturates, which is all the message needs
                size: size as u64,
                max: MAX_SIZE_BITS as u64,
            });
        }

        Ok(Self {
            bits_per_element,
            expected_count,
            size_bits: (size as usize).max(1),
            hash_count,
        })
    }

    /// Sizing from a total bit budget, with the optimal k for the resulting ratio.
    pub fn from_bit_budget(bit_set_size: usize, expected_count: usize) -> Result<Self, FilterError> {
        if bit_set_size == 0 {
            return Err(FilterError::InvalidBitBudget { size: bit_set_size });
        }
        if expected_count == 0 {
            return Err(FilterError::InvalidExpectedCount {
                count: expected_count,
            });
        }

        let bits_per_element = bit_set_size as f64 / expected_count as f64;
        let hash_count = optimal_hash_count(bits_per_element);

        let mut params = Self::from_bits_per_element(bits_per_element, expected_count, hash_count)?;
        // ratio * n can land one ulp above the budget
        params.size_bits = bit_set_size;
        Ok(params)
    }

    /// Sizing that minimises m for a target false positive probability.
    pub fn from_false_positive_rate(
        false_positive_probability: f64,
        expected_count: usize,
    ) -> Result<Self, FilterError> {
        // also rejects NaN
        if !(false_positive_probability > 0.0 && false_positive_probability < 1.0) {
            return Err(FilterError::InvalidFalsePositiveRate {
                fpr: false_positive_probability,
            });
        }

        let neg_ln_p = -false_positive_probability.ln();
        let bits_per_element = neg_ln_p / (LN_2 * LN_2);
        let hash_count = (neg_ln_p / LN_2).ceil() as usize;

        Self::from_bits_per_element(bits_per_element, expected_count, hash_count)
    }

    /// Check params that were assembled by hand or deserialized
    pub fn validate(&self) -> Result<(), FilterError> {
        if !self.bits_per_element.is_finite() || self.bits_per_element <= 0.0 {
            return Err(FilterError::InvalidBitsPerElement {
                value: self.bits_per_element,
            });
        }
        if self.expected_count == 0 {
            return Err(FilterError::InvalidExpectedCount { count: 0 });
        }
        if self.hash_count == 0 {
            return Err(FilterError::InvalidHashCount { count: 0 });
        }
        if self.hash_count > MAX_HASH_COUNT {
            return Err(FilterError::HashCountTooLarge {
                requested: self.hash_count,
                max: MAX_HASH_COUNT,
            });
        }
        if self.size_bits == 0 {
            return Err(FilterError::InvalidBitBudget { size: 0 });
        }
        if self.size_bits > MAX_SIZE_BITS {
            return Err(FilterError::FilterTooLarge {
                size: self.size_bits as u64,
                max: MAX_SIZE_BITS as u64,
            });
        }
        Ok(())
    }

    /// Estimated false positive rate after `n` insertions
    pub fn false_positive_rate(&self, n: usize) -> f64 {
        calculate_fpr(self.size_bits, n, self.hash_count)
    }
}

/// Optimal number of hash functions for a bits-per-element ratio: `round(ratio * ln 2)`.
///
/// May return 0 for ratios below ~0.72; callers reject that.
pub fn optimal_hash_count(bits_per_element: f64) -> usize {
    (bits_per_element * LN_2).round() as usize
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
