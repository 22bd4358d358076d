//! Network-flow layer.
//!
//! # Submodules
//! - [`network`]: arena-backed residual network
//! - [`mcf`]: successive-shortest-path minimum-cost flow
//! - [`maxflow`]: Edmonds-Karp maximum flow
//! - [`builder`]: reviewer/paper network construction and cost scaling
//! - [`thinning`]: shortest feasible prefix of ranked arcs
//!
//! # Reference
//! Ahuja, Magnanti & Orlin (1993), "Network Flows: Theory, Algorithms, and Applications"

pub mod builder;
pub mod maxflow;
pub mod mcf;
pub mod network;
pub mod thinning;

pub use builder::{
    restorable_lock, scale_costs, AllPairs, AssignmentNetwork, FlowGraphBuilder,
    GraphBuildStrategy, LoadBounds, PairArc, RankedPrefix,
};
pub use maxflow::EdmondsKarp;
pub use mcf::{FlowOutcome, MinCostFlow};
pub use network::{EdgeId, FlowNetwork, Node, NodeId, NodeRole};
pub use thinning::{EdgeThinningSearch, ThinningOutcome};
