//! Multi-level filter cascade
//!
//! Level 0 makes a coarse claim about the whole key space; every later level
//! exists only to correct the false positives of the level before it, with
//! polarity alternating between blacklist and whitelist.
//!
//! INVARIANTS:
//! - `levels` is never empty (rejected at construction).
//! - Levels are immutable after load.
//!
//! Query rule, walking levels in order:
//! - a miss at level `i` is exact (no false negatives), so it decides:
//!   blacklist miss ⇒ not revoked, whitelist miss ⇒ revoked;
//! - surviving every level leaves the last level's accusation standing:
//!   blacklist last ⇒ revoked, whitelist last ⇒ not revoked.

use serde::{Deserialize, Serialize};

use super::bloom_filter::BloomFilter;
use crate::error::{ConstructionError, LoadError};

/// Polarity of a cascade level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelType {
    /// Members are accused of being revoked
    Blacklist,
    /// Members are claimed to be valid
    Whitelist,
}

impl LevelType {
    /// Classification when a key is absent from a level of this type.
    fn revoked_when_absent(self) -> bool {
        matches!(self, LevelType::Whitelist)
    }

    /// Classification when a key survives a final level of this type.
    fn revoked_when_present(self) -> bool {
        matches!(self, LevelType::Blacklist)
    }
}

/// One level of the cascade: a filter plus its polarity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeLevel {
    #[serde(rename = "type")]
    pub level_type: LevelType,
    #[serde(flatten)]
    pub filter: BloomFilter,
}

impl CascadeLevel {
    pub fn new(level_type: LevelType, filter: BloomFilter) -> Self {
        Self { level_type, filter }
    }
}

/// Outcome of walking the cascade for one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CascadeMatch {
    /// Whether the key is classified as revoked
    pub revoked: bool,
    /// Index of the level that decided
    pub level: usize,
    /// True when the key was present at every level
    pub survived_all: bool,
}

/// Immutable, ordered sequence of cascade levels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilterCascade {
    levels: Vec<CascadeLevel>,
}

/// Document layout of a static cascade file.
#[derive(Deserialize)]
struct CascadeDocument {
    levels: Vec<CascadeLevel>,
}

impl FilterCascade {
    /// Build a cascade from its levels.
    pub fn new(levels: Vec<CascadeLevel>) -> Result<Self, ConstructionError> {
        if levels.is_empty() {
            return Err(ConstructionError::EmptyCascade);
        }
        Ok(Self { levels })
    }

    /// Parse a `{ "levels": [...] }` document.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        let document: CascadeDocument = serde_json::from_slice(bytes)?;
        Ok(Self::new(document.levels)?)
    }

    /// Serialize back to the document layout.
    pub fn to_json_vec(&self) -> Result<Vec<u8>, LoadError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Walk the cascade for `key`.
    pub fn classify(&self, key: &str) -> CascadeMatch {
        for (i, level) in self.levels.iter().enumerate() {
            if !level.filter.has(key) {
                return CascadeMatch {
                    revoked: level.level_type.revoked_when_absent(),
                    level: i,
                    survived_all: false,
                };
            }
        }

        let last = self.levels.len() - 1;
        CascadeMatch {
            revoked: self.levels[last].level_type.revoked_when_present(),
            level: last,
            survived_all: true,
        }
    }

    /// Shorthand for `classify(key).revoked`.
    pub fn is_revoked(&self, key: &str) -> bool {
        self.classify(key).revoked
    }

    /// Number of levels
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn levels(&self) -> &[CascadeLevel] {
        &self.levels
    }

    /// Total bits across all levels
    pub fn total_bits(&self) -> usize {
        self.levels.iter().map(|level| level.filter.size()).sum()
    }
}
