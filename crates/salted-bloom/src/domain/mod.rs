//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Core Bloom filter implementation
//! - Salted digest hash functions
//! - Parameter calculations
//! - Element encoding
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod bloom_filter;
pub mod config;
pub mod encoding;
pub mod hash_functions;
pub mod parameters;

pub use bloom_filter::BloomFilter;
pub use config::{FilterConfig, FilterConfigBuilder, Sizing};
pub use encoding::ByteEncodable;
pub use hash_functions::{
    bit_index, create_hash, create_hash_str, create_hashes, create_hashes_with, max_hash_count,
    FilterDigest, MAX_HASH_COUNT,
};
pub use parameters::{calculate_fpr, optimal_hash_count, FilterParams, MAX_SIZE_BITS};
