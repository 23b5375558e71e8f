//! Keyed index derivation for Bloom filters
//!
//! Every filter in this crate, static or dynamic, derives its bit positions
//! the same way: SHA-256 over the UTF-8 text `"<key>-<seed>"`, first four
//! digest bytes read as a big-endian `u32`, reduced modulo the filter size.
//! Seeds `0..hash_count` stand in for `hash_count` independent hash functions.
//!
//! The static cascade file is generated offline with this exact scheme, so
//! the concatenation format and byte order must never change.

use sha2::{Digest, Sha256};

/// Separator placed between key and seed before hashing.
pub const SEED_SEPARATOR: &[u8] = b"-";

/// 32-bit digest prefix of `"<key>-<seed>"`.
pub fn keyed_hash(key: &str, seed: u32) -> u32 {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.update(SEED_SEPARATOR);
    hasher.update(seed.to_string().as_bytes());
    let digest = hasher.finalize();

    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Bit index in `[0, size)` for `key` under `seed`.
///
/// `size` must be non-zero; filters reject a zero size at construction.
pub fn index(key: &str, seed: u32, size: usize) -> usize {
    debug_assert!(size > 0, "filter size must be positive");
    (u64::from(keyed_hash(key, seed)) % size as u64) as usize
}

/// Iterator over the `hash_count` bit indices of `key`.
pub fn hash_positions(key: &str, hash_count: usize, size: usize) -> impl Iterator<Item = usize> + '_ {
    (0..hash_count as u32).map(move |seed| index(key, seed, size))
}
