//! Reviewer model.
//!
//! A reviewer is the supply side of the matching: an opaque identity with
//! a review load that must stay within `[min_papers, max_papers]`.

use serde::{Deserialize, Serialize};

/// A reviewer that can be assigned to papers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    /// Unique reviewer identifier.
    pub id: String,
    /// Minimum number of papers this reviewer must receive.
    pub min_papers: usize,
    /// Maximum number of papers this reviewer may receive.
    pub max_papers: usize,
}

/// Per-reviewer override of the global maximum load.
///
/// When `max` is below the global minimum, the reviewer's minimum is
/// lowered to `max` as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLoad {
    /// Reviewer the override applies to.
    pub reviewer: String,
    /// Overridden maximum load.
    pub max: usize,
}

impl Reviewer {
    /// Creates a reviewer with the given load bounds.
    pub fn new(id: impl Into<String>, min_papers: usize, max_papers: usize) -> Self {
        Self {
            id: id.into(),
            min_papers,
            max_papers,
        }
    }

    /// Sets the minimum load.
    pub fn with_min(mut self, min_papers: usize) -> Self {
        self.min_papers = min_papers;
        self
    }

    /// Sets the maximum load.
    pub fn with_max(mut self, max_papers: usize) -> Self {
        self.max_papers = max_papers;
        self
    }

    /// Applies a custom load override.
    pub fn apply_custom_load(&mut self, max: usize) {
        self.max_papers = max;
        self.min_papers = self.min_papers.min(max);
    }

    /// Whether a load lies within this reviewer's bounds.
    #[inline]
    pub fn accepts_load(&self, load: usize) -> bool {
        load >= self.min_papers && load <= self.max_papers
    }
}

impl CustomLoad {
    /// Creates a custom load override.
    pub fn new(reviewer: impl Into<String>, max: usize) -> Self {
        Self {
            reviewer: reviewer.into(),
            max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reviewer_builder() {
        let r = Reviewer::new("~Ada_Lovelace1", 0, 3).with_min(1).with_max(4);
        assert_eq!(r.id, "~Ada_Lovelace1");
        assert_eq!(r.min_papers, 1);
        assert_eq!(r.max_papers, 4);
    }

    #[test]
    fn test_custom_load_lowers_minimum() {
        let mut r = Reviewer::new("R1", 2, 5);
        r.apply_custom_load(1);
        assert_eq!(r.max_papers, 1);
        assert_eq!(r.min_papers, 1);

        let mut r = Reviewer::new("R2", 1, 5);
        r.apply_custom_load(3);
        assert_eq!(r.max_papers, 3);
        assert_eq!(r.min_papers, 1);
    }

    #[test]
    fn test_accepts_load() {
        let r = Reviewer::new("R1", 1, 2);
        assert!(!r.accepts_load(0));
        assert!(r.accepts_load(1));
        assert!(r.accepts_load(2));
        assert!(!r.accepts_load(3));
    }
}
