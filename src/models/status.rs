//! Terminal and transient states of a match run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status reported to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Created, not yet run.
    Initialized,
    /// Solve in progress.
    Running,
    /// Finished with a full assignment.
    Complete,
    /// Failed on bad input or a solver fault.
    Error,
    /// Inputs admit no feasible assignment. Recoverable by changing parameters.
    #[serde(rename = "No Solution")]
    NoSolution,
}

impl MatchStatus {
    /// Whether the run has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Error | Self::NoSolution)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Initialized => "Initialized",
            Self::Running => "Running",
            Self::Complete => "Complete",
            Self::Error => "Error",
            Self::NoSolution => "No Solution",
        };
        f.write_str(s)
    }
}
