//! Paper model.
//!
//! A paper is the demand side of the matching: it needs exactly `demand`
//! reviewers.

use serde::{Deserialize, Serialize};

/// A paper that needs reviewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    /// Unique paper (forum) identifier.
    pub id: String,
    /// Number of reviewers required.
    pub demand: usize,
}

/// Per-paper override of the global demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDemand {
    /// Paper the override applies to.
    pub paper: String,
    /// Overridden number of required reviewers.
    pub demand: usize,
}

impl Paper {
    /// Creates a paper with the given demand.
    pub fn new(id: impl Into<String>, demand: usize) -> Self {
        Self {
            id: id.into(),
            demand,
        }
    }
}

impl CustomDemand {
    /// Creates a custom demand override.
    pub fn new(paper: impl Into<String>, demand: usize) -> Self {
        Self {
            paper: paper.into(),
            demand,
        }
    }
}
