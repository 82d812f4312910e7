//! # Salted Bloom
//!
//! A Bloom filter whose k hash functions are cut from salted SHA-256 digests.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure filter logic, no I/O
//!   - `BloomFilter`: Core probabilistic data structure
//!   - `FilterParams`: Sizing from bits per element, a bit budget or a target FPR
//!   - `hash_functions`: Salted digest hash derivation
//!   - `ByteEncodable`: How elements become bytes
//!   - `FilterConfig`: Configuration with validation
//!   - `FilterConfigBuilder`: Fluent builder for configuration
//!
//! - **Error Layer** (`error.rs`): `FilterError`
//!
//! ## Invariants
//!
//! - FPR estimate = (1 - e^(-kn/m))^k
//! - No false negatives - if added, contains() MUST return true
//! - Bits are only cleared through `set_bit`, never by `add`
//!
//! ## Usage Example
//!
//! ```
//! use salted_bloom::BloomFilter;
//!
//! // 10,000 elements at a 1% target false positive rate
//! let mut filter = BloomFilter::with_false_positive_rate(0.01, 10_000)?;
//! assert_eq!(filter.hash_count(), 7);
//! assert_eq!(filter.bit_array_size(), 95_851);
//!
//! filter.add(&10_000_i32);
//! filter.add("0xABCD");
//!
//! assert!(filter.contains(&10_000_i32));
//! assert!(filter.contains("0xABCD"));
//! # Ok::<(), salted_bloom::FilterError>(())
//! ```
//!
//! ## Hash Count Ceiling
//!
//! The salt is a single byte, so at most 256 digest rounds of 8 hashes each
//! are distinct. Filters reject `k` above [`MAX_HASH_COUNT`] (2048).

pub mod domain;
pub mod error;

// Re-exports for convenience
pub use domain::{
    BloomFilter, ByteEncodable, FilterConfig, FilterConfigBuilder, FilterParams, Sizing,
    MAX_HASH_COUNT, MAX_SIZE_BITS,
};
pub use error::FilterError;
