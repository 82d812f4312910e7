//! Hash functions for the Bloom filter
//!
//! k hash values are cut from salted digests: round `s` hashes the single
//! salt byte `s` followed by the data, and every 4-byte big-endian group of
//! the output is one hash. SHA-256 gives 8 hashes per round.
//!
//! Each round owns a fresh digest context, so derivation is a pure function
//! with no shared state to lock.

use sha2::digest::{typenum::Unsigned, OutputSizeUser};
use sha2::{Digest, Sha256};

use crate::error::FilterError;

/// Digest used by [`BloomFilter`](super::BloomFilter)
pub type FilterDigest = Sha256;

/// Distinct salt values before the one-byte salt wraps
pub const SALT_ROUNDS: usize = 256;

/// Width of one derived hash in bytes
pub const HASH_WIDTH: usize = 4;

/// Most hashes [`FilterDigest`] can derive before rounds repeat
pub const MAX_HASH_COUNT: usize =
    SALT_ROUNDS * (<<FilterDigest as OutputSizeUser>::OutputSize as Unsigned>::USIZE / HASH_WIDTH);

/// Number of hash values one digest round yields for `D`
pub fn hashes_per_round<D: Digest>() -> usize {
    <D as Digest>::output_size() / HASH_WIDTH
}

/// Most hash values `D` can derive before the salt wraps
pub fn max_hash_count<D: Digest>() -> usize {
    SALT_ROUNDS * hashes_per_round::<D>()
}

/// Derive `count` hash values from `data` using SHA-256
pub fn create_hashes(data: &[u8], count: usize) -> Result<Vec<i32>, FilterError> {
    create_hashes_with::<FilterDigest>(data, count)
}

/// Derive `count` hash values from `data` using digest `D`
///
/// Fails with [`FilterError::HashCountTooLarge`] when `count` exceeds
/// [`max_hash_count`], since later rounds would repeat earlier ones.
pub fn create_hashes_with<D: Digest>(data: &[u8], count: usize) -> Result<Vec<i32>, FilterError> {
    let max = max_hash_count::<D>();
    if count > max {
        return Err(FilterError::HashCountTooLarge {
            requested: count,
            max,
        });
    }
    Ok(salted_hashes::<D>(data, count))
}

/// Derive a single hash value from `data`
pub fn create_hash(data: &[u8]) -> i32 {
    salted_hashes::<FilterDigest>(data, 1)[0]
}

/// Derive a single hash value from a string's UTF-8 bytes
pub fn create_hash_str(value: &str) -> i32 {
    create_hash(value.as_bytes())
}

/// Callers must keep `count <= max_hash_count::<D>()`.
pub(crate) fn salted_hashes<D: Digest>(data: &[u8], count: usize) -> Vec<i32> {
    let mut hashes = Vec::with_capacity(count);
    let mut salt: u8 = 0;

    while hashes.len() < count {
        let mut digest = D::new_with_prefix([salt]);
        digest.update(data);
        let output = digest.finalize();

        let wanted = count - hashes.len();
        hashes.extend(
            output
                .chunks_exact(HASH_WIDTH)
                .take(wanted)
                .map(|group| i32::from_be_bytes([group[0], group[1], group[2], group[3]])),
        );
        salt = salt.wrapping_add(1);
    }

    hashes
}

/// Map a hash to a bit index in `0..m`
///
/// Computes `|hash| mod m` on the unsigned magnitude, so `i32::MIN` maps to
/// `2^31 mod m` instead of overflowing. Equal to `abs(hash % m)` for every hash.
pub fn bit_index(hash: i32, m: usize) -> usize {
    debug_assert!(m > 0, "bit array must not be empty");
    hash.unsigned_abs() as usize % m
}

/// Compute k bit positions for an element
pub(crate) fn compute_hash_positions(element: &[u8], k: usize, m: usize) -> Vec<usize> {
    salted_hashes::<FilterDigest>(element, k)
        .into_iter()
        .map(|hash| bit_index(hash, m))
        .collect()
}
