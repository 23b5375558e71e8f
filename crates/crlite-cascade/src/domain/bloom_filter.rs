//! Add-only Bloom filter over string keys
//!
//! INVARIANTS:
//! - No false negatives: once `add(key)` returns, `has(key)` is true forever.
//! - Bits are never cleared; there is no delete.
//!
//! The JSON form `{ "size", "hashCount", "bitArray" }` is shared with the
//! offline cascade generator. `bitArray` holds one entry per bit, written as
//! `0`/`1`; booleans are accepted on input.

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use super::hash_functions::hash_positions;
use crate::error::{ConstructionError, LoadError};

/// Bloom filter for probabilistic membership testing
///
/// False positives are possible, false negatives are not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BloomFilterData", into = "BloomFilterData")]
pub struct BloomFilter {
    /// Bit array storing the filter state
    bits: BitVec<u8, Lsb0>,
    /// Number of seeds per key (k)
    hash_count: usize,
}

/// Wire representation of a [`BloomFilter`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloomFilterData {
    pub size: usize,
    #[serde(rename = "hashCount")]
    pub hash_count: usize,
    #[serde(rename = "bitArray", alias = "bits")]
    pub bit_array: Vec<BitValue>,
}

/// A single serialized bit. Generators emit either integers or booleans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BitValue {
    Int(u64),
    Bool(bool),
}

impl BitValue {
    fn is_set(self) -> bool {
        match self {
            BitValue::Int(v) => v != 0,
            BitValue::Bool(b) => b,
        }
    }
}

impl BloomFilter {
    /// Create an empty filter of `size` bits using `hash_count` seeds.
    pub fn new(size: usize, hash_count: usize) -> Result<Self, ConstructionError> {
        validate_parameters(size, hash_count)?;
        Ok(Self {
            bits: bitvec![u8, Lsb0; 0; size],
            hash_count,
        })
    }

    /// Insert a key. Idempotent.
    pub fn add(&mut self, key: &str) {
        let size = self.size();
        for pos in hash_positions(key, self.hash_count, size) {
            self.bits.set(pos, true);
        }
    }

    /// Test whether `key` might be in the set.
    ///
    /// Stops at the first unset bit, so a definite miss costs fewer digests
    /// than a hit.
    pub fn has(&self, key: &str) -> bool {
        hash_positions(key, self.hash_count, self.size()).all(|pos| self.bits[pos])
    }

    /// Filter size in bits
    pub fn size(&self) -> usize {
        self.bits.len()
    }

    /// Number of seeds per key
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// Number of bits set
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Fraction of bits set, in `[0, 1]`.
    pub fn fill_ratio(&self) -> f64 {
        self.bits_set() as f64 / self.size() as f64
    }

    /// False positive probability implied by the current fill ratio.
    ///
    /// Formula: FPR ≈ (bits_set / m)^k
    pub fn estimated_false_positive_rate(&self) -> f64 {
        self.fill_ratio().powi(self.hash_count as i32)
    }

    /// Snapshot into the wire representation.
    pub fn to_data(&self) -> BloomFilterData {
        BloomFilterData {
            size: self.size(),
            hash_count: self.hash_count,
            bit_array: self
                .bits
                .iter()
                .map(|bit| BitValue::Int(u64::from(*bit)))
                .collect(),
        }
    }

    /// Restore from the wire representation.
    pub fn from_data(data: BloomFilterData) -> Result<Self, LoadError> {
        validate_parameters(data.size, data.hash_count)?;
        if data.bit_array.len() != data.size {
            return Err(LoadError::BitLengthMismatch {
                expected: data.size,
                actual: data.bit_array.len(),
            });
        }

        let bits: BitVec<u8, Lsb0> = data.bit_array.into_iter().map(BitValue::is_set).collect();
        Ok(Self {
            bits,
            hash_count: data.hash_count,
        })
    }

    /// Serialize to a JSON value
    pub fn to_json(&self) -> Result<serde_json::Value, LoadError> {
        Ok(serde_json::to_value(self.to_data())?)
    }

    /// Deserialize from a JSON value
    pub fn from_json(value: serde_json::Value) -> Result<Self, LoadError> {
        let data: BloomFilterData = serde_json::from_value(value)?;
        Self::from_data(data)
    }
}

fn validate_parameters(size: usize, hash_count: usize) -> Result<(), ConstructionError> {
    if size == 0 {
        return Err(ConstructionError::ZeroSize);
    }
    if hash_count == 0 {
        return Err(ConstructionError::ZeroHashCount);
    }
    Ok(())
}

impl TryFrom<BloomFilterData> for BloomFilter {
    type Error = LoadError;

    fn try_from(data: BloomFilterData) -> Result<Self, Self::Error> {
        Self::from_data(data)
    }
}

impl From<BloomFilter> for BloomFilterData {
    fn from(filter: BloomFilter) -> Self {
        filter.to_data()
    }
}
