//! Assignment domain models.
//!
//! Provides the core data types for describing a reviewer-paper matching
//! problem and its solution. The engine itself only sees opaque ids, load
//! bounds, demands, scores and pairwise constraints. It has no notion of
//! conferences, venues or submission content.
//!
//! # Domain Mappings
//!
//! | u-match | Peer review | Mentoring | Staffing |
//! |---------|-------------|-----------|----------|
//! | Reviewer | Reviewer / Area chair | Mentor | Employee |
//! | Paper | Submission | Mentee | Shift / Project |
//! | ScoreSpec | Affinity, bid | Interest match | Skill fit |
//! | ConstraintEdge | Conflict of interest | Prior relationship | Mandatory pairing |

mod assignment;
mod constraint;
mod input;
mod paper;
mod reviewer;
mod score;
mod status;

pub use assignment::{AlternateRecord, AssignmentRecord, PaperAlternates, PaperAssignments};
pub use constraint::{ConstraintEdge, ConstraintValue, ProbabilityLimit};
pub use input::MatchInput;
pub use paper::{CustomDemand, Paper};
pub use reviewer::{CustomLoad, Reviewer};
pub use score::{ScoreEdge, ScoreSpec, WeightSpec};
pub use status::MatchStatus;
