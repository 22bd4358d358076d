//! Reviewer–paper assignment engine for the U-Engine ecosystem.
//!
//! Turns weighted affinity scores, hard constraints and load bounds into a
//! reviewer assignment by network flow.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Reviewer`, `Paper`, `ScoreSpec`,
//!   `ConstraintEdge`, assignment records, `MatchStatus`
//! - **`validation`**: Input integrity checks (duplicate ids, non-finite weights)
//! - **`config`**: Run parameters (`MatchConfig`)
//! - **`error`**: Error taxonomy (`MatchError`, `EncoderError`)
//! - **`encoder`**: Score aggregation, cost/constraint matrices, decoding
//! - **`flow`**: Flow network, min-cost flow, max-flow, graph building, edge thinning
//! - **`solvers`**: `MinMaxSolver`, `FairFlowSolver`, KPIs
//! - **`matcher`**: End-to-end runs with status tracking
//!
//! # Architecture
//!
//! One run owns its matrices and networks; nothing is shared between runs,
//! so independent matches may run on separate threads. A solve is a
//! bounded synchronous call with no cancellation hook.
//!
//! # References
//!
//! - Ahuja, Magnanti & Orlin (1993), "Network Flows: Theory, Algorithms, and Applications"
//! - Kobren, Saha & McCallum (2019), "Paper Matching with Local Fairness Constraints"

pub mod config;
pub mod encoder;
pub mod error;
pub mod flow;
pub mod matcher;
pub mod models;
pub mod solvers;
pub mod validation;
