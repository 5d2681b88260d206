//! Type-safe wrappers for clause and literal positions.
//!
//! This module provides newtype wrappers that enforce compile-time distinction
//! between the position of a clause within a formula and the position of a
//! literal within a clause, preventing the usual off-by-one mix-ups between
//! the 1-based and 0-based conventions.
use std::fmt;

use serde::{Deserialize, Serialize};

/// A clause position within a formula (1-indexed).
///
/// Clause indices tag graph nodes with the clause their literal came from, so
/// the same literal text appearing in two clauses yields two distinct nodes.
///
/// # Invariants
///
/// - Clause indices must be >= 1 (0 is never a valid position)
/// - Serialized as a plain JSON number
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub struct ClauseIndex(u32);

impl ClauseIndex {
    /// Creates a new clause index.
    ///
    /// # Panics
    ///
    /// Panics if `index == 0`. Clauses are 1-indexed.
    pub fn new(index: u32) -> Self {
        assert_ne!(index, 0, "Clause indices must be >= 1");
        ClauseIndex(index)
    }

    /// Creates the clause index for the clause at 0-based `position` in a list.
    pub fn from_position(position: usize) -> Self {
        ClauseIndex::new(position as u32 + 1)
    }

    /// Returns the raw index as a `u32`.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns the 0-based position of this clause in a list.
    pub fn position(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u32> for ClauseIndex {
    type Error = String;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        if index == 0 {
            Err("Clause indices must be >= 1".to_string())
        } else {
            Ok(ClauseIndex(index))
        }
    }
}

impl fmt::Display for ClauseIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ClauseIndex> for u32 {
    fn from(index: ClauseIndex) -> Self {
        index.0
    }
}

/// A literal position inside a clause (0-indexed).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Slot(usize);

impl Slot {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for Slot {
    fn from(index: usize) -> Self {
        Slot(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_index_creation() {
        let c1 = ClauseIndex::new(1);
        let c2 = ClauseIndex::new(2);
        assert_eq!(c1.get(), 1);
        assert_eq!(c2.get(), 2);
        assert!(c1 < c2);
    }

    #[test]
    #[should_panic(expected = "Clause indices must be >= 1")]
    fn test_clause_index_zero_panics() {
        ClauseIndex::new(0);
    }

    #[test]
    fn test_clause_index_position() {
        let c = ClauseIndex::from_position(0);
        assert_eq!(c.get(), 1);
        assert_eq!(c.position(), 0);
        assert_eq!(ClauseIndex::from_position(4).get(), 5);
    }

    #[test]
    fn test_clause_index_serializes_as_number() {
        let json = serde_json::to_string(&ClauseIndex::new(3)).unwrap();
        assert_eq!(json, "3");
        let back: ClauseIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ClauseIndex::new(3));
        assert!(serde_json::from_str::<ClauseIndex>("0").is_err());
    }

    #[test]
    fn test_slot() {
        assert_eq!(Slot::from(0).index(), 0);
        assert_eq!(Slot::from(2).index(), 2);
        assert!(Slot::from(0) < Slot::from(2));
    }
}
