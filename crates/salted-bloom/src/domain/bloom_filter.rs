//! Core Bloom Filter implementation
//!
//! INVARIANTS:
//! - No false negatives: once added, `contains` returns true
//! - `add` only ever sets bits; the bit array never changes length
//! - `actual_count` counts `add` calls, not distinct elements

use bitvec::prelude::*;
use serde::{de, Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use super::config::FilterConfig;
use super::encoding::ByteEncodable;
use super::hash_functions::compute_hash_positions;
use super::parameters::{calculate_fpr, FilterParams};
use crate::error::FilterError;

/// Bloom filter for probabilistic membership testing
///
/// A Bloom filter is a space-efficient probabilistic data structure that
/// can test whether an element is a member of a set. False positives are
/// possible, but false negatives are not.
///
/// Equality compares sizing and bits only; two filters with the same bits
/// but different insertion histories are equal.
#[derive(Clone, Debug, Serialize)]
pub struct BloomFilter {
    /// Sizing fixed at construction
    params: FilterParams,
    /// Bit array storing the filter state
    #[serde(with = "bitvec_serde")]
    bits: BitVec<u8, Lsb0>,
    /// Number of `add` calls (n)
    actual_count: usize,
}

/// Serialized shape of a filter, checked before it becomes a [`BloomFilter`]
#[derive(Deserialize)]
struct FilterState {
    params: FilterParams,
    #[serde(with = "bitvec_serde")]
    bits: BitVec<u8, Lsb0>,
    actual_count: usize,
}

/// Serde support for BitVec
mod bitvec_serde {
    use bitvec::prelude::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(bits: &BitVec<u8, Lsb0>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (bits.as_raw_slice(), bits.len()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BitVec<u8, Lsb0>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (bytes, len): (Vec<u8>, usize) = Deserialize::deserialize(deserializer)?;
        let mut bits = BitVec::<u8, Lsb0>::from_vec(bytes);
        if bits.len() < len {
            return Err(serde::de::Error::custom(format!(
                "bit array holds {} bits, expected {}",
                bits.len(),
                len
            )));
        }
        bits.truncate(len);
        Ok(bits)
    }
}

impl<'de> Deserialize<'de> for BloomFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let state = FilterState::deserialize(deserializer)?;
        state.params.validate().map_err(de::Error::custom)?;
        if state.bits.len() != state.params.size_bits {
            return Err(de::Error::custom(format!(
                "bit array length {} does not match filter size {}",
                state.bits.len(),
                state.params.size_bits
            )));
        }
        Ok(Self {
            params: state.params,
            bits: state.bits,
            actual_count: state.actual_count,
        })
    }
}

impl BloomFilter {
    /// Create a filter with `ceil(bits_per_element * expected_count)` bits and `k` hash functions
    ///
    /// # Arguments
    /// * `bits_per_element` - Bits reserved per expected element (> 0)
    /// * `expected_count` - Number of elements the filter is sized for (> 0)
    /// * `k` - Number of hash functions (>= 1)
    pub fn new(bits_per_element: f64, expected_count: usize, k: usize) -> Result<Self, FilterError> {
        let params = FilterParams::from_bits_per_element(bits_per_element, expected_count, k)?;
        Self::from_params(params)
    }

    /// Create a filter from a total bit budget, using the optimal `k` for it
    ///
    /// # Arguments
    /// * `bit_set_size` - Total number of bits (m)
    /// * `expected_count` - Number of elements the filter is sized for
    pub fn with_bit_budget(bit_set_size: usize, expected_count: usize) -> Result<Self, FilterError> {
        let params = FilterParams::from_bit_budget(bit_set_size, expected_count)?;
        Self::from_params(params)
    }

    /// Create a filter with the smallest size reaching a target false positive rate
    ///
    /// # Arguments
    /// * `false_positive_probability` - Target rate, strictly between 0 and 1
    /// * `expected_count` - Number of elements the filter is sized for
    pub fn with_false_positive_rate(
        false_positive_probability: f64,
        expected_count: usize,
    ) -> Result<Self, FilterError> {
        let params = FilterParams::from_false_positive_rate(false_positive_probability, expected_count)?;
        Self::from_params(params)
    }

    /// Create a filter from a configuration
    pub fn from_config(config: &FilterConfig) -> Result<Self, FilterError> {
        Self::from_params(config.params()?)
    }

    /// Create an empty filter from sizing parameters
    pub fn from_params(params: FilterParams) -> Result<Self, FilterError> {
        params.validate()?;
        debug!(
            size_bits = params.size_bits,
            hash_count = params.hash_count,
            expected_count = params.expected_count,
            "Created Bloom filter"
        );
        Ok(Self {
            bits: bitvec![u8, Lsb0; 0; params.size_bits],
            params,
            actual_count: 0,
        })
    }

    /// Insert an element into the filter
    ///
    /// After insertion, `contains(element)` is guaranteed to return true.
    pub fn add<T: ByteEncodable + ?Sized>(&mut self, element: &T) {
        self.add_bytes(&element.encode_bytes());
    }

    /// Insert raw bytes into the filter
    pub fn add_bytes(&mut self, bytes: &[u8]) {
        for pos in compute_hash_positions(bytes, self.params.hash_count, self.params.size_bits) {
            self.bits.set(pos, true);
        }
        self.actual_count = self.actual_count.wrapping_add(1);

        if self.actual_count == self.params.expected_count.wrapping_add(1) {
            warn!(
                expected_count = self.params.expected_count,
                "Bloom filter exceeded its expected element count; false positive rate will degrade"
            );
        }
    }

    /// Insert every element, in iteration order
    pub fn add_all<I>(&mut self, elements: I)
    where
        I: IntoIterator,
        I::Item: ByteEncodable,
    {
        for element in elements {
            self.add(&element);
        }
    }

    /// Test if an element might be in the filter
    ///
    /// Returns:
    /// - `true` if the element might be in the set (could be false positive)
    /// - `false` if the element is definitely NOT in the set (never false negative)
    pub fn contains<T: ByteEncodable + ?Sized>(&self, element: &T) -> bool {
        self.contains_bytes(&element.encode_bytes())
    }

    /// Test if raw bytes might be in the filter
    pub fn contains_bytes(&self, bytes: &[u8]) -> bool {
        compute_hash_positions(bytes, self.params.hash_count, self.params.size_bits)
            .into_iter()
            .all(|pos| self.bits[pos])
    }

    /// Test if every element might be in the filter, stopping at the first miss
    pub fn contains_all<I>(&self, elements: I) -> bool
    where
        I: IntoIterator,
        I::Item: ByteEncodable,
    {
        elements.into_iter().all(|element| self.contains(&element))
    }

    /// Read one bit directly, bypassing hashing
    ///
    /// Low-level escape hatch for inspection and for rebuilding a filter bit
    /// by bit. Not part of the add/contains protocol.
    pub fn get_bit(&self, index: usize) -> Result<bool, FilterError> {
        self.bits
            .get(index)
            .map(|bit| *bit)
            .ok_or(FilterError::BitIndexOutOfRange {
                index,
                size: self.params.size_bits,
            })
    }

    /// Overwrite one bit directly, bypassing hashing
    ///
    /// Clearing a bit set by `add` breaks the no-false-negative guarantee for
    /// every element that maps to it. `actual_count` is not touched.
    pub fn set_bit(&mut self, index: usize, value: bool) -> Result<(), FilterError> {
        if index >= self.params.size_bits {
            return Err(FilterError::BitIndexOutOfRange {
                index,
                size: self.params.size_bits,
            });
        }
        self.bits.set(index, value);
        Ok(())
    }

    /// Estimated false positive rate at the current insertion count
    ///
    /// Formula: FPR = (1 - e^(-kn/m))^k
    pub fn estimated_false_positive_probability(&self) -> f64 {
        self.estimated_false_positive_probability_for(self.actual_count)
    }

    /// Estimated false positive rate after `n` insertions
    pub fn estimated_false_positive_probability_for(&self, n: usize) -> f64 {
        calculate_fpr(self.params.size_bits, n, self.params.hash_count)
    }

    /// Bits per expected element actually allocated (`m / expected_count`)
    ///
    /// Can differ from the requested ratio, since `m` is rounded up to a whole
    /// bit and is never below 1.
    pub fn bits_per_element(&self) -> f64 {
        self.params.size_bits as f64 / self.params.expected_count as f64
    }

    /// Get the filter size in bits (m)
    pub fn bit_array_size(&self) -> usize {
        self.params.size_bits
    }

    /// Get the number of hash functions (k)
    pub fn hash_count(&self) -> usize {
        self.params.hash_count
    }

    /// Get the number of elements the filter was sized for
    pub fn expected_count(&self) -> usize {
        self.params.expected_count
    }

    /// Get the number of `add` calls so far
    pub fn actual_count(&self) -> usize {
        self.actual_count
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Sizing the filter was built with
    pub fn params(&self) -> &FilterParams {
        &self.params
    }
}

impl PartialEq for BloomFilter {
    fn eq(&self, other: &Self) -> bool {
        self.params.expected_count == other.params.expected_count
            && self.params.hash_count == other.params.hash_count
            && self.params.size_bits == other.params.size_bits
            && self.bits == other.bits
    }
}

impl Eq for BloomFilter {}
