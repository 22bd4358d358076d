//! Edge thinning.
//!
//! Ranks the allowed reviewer→paper pairs by descending score and finds the
//! shortest prefix of that ranking whose arcs alone still carry the full
//! demand. Adding arcs never lowers the max-flow, so the smallest such
//! prefix can be found by binary search.
//!
//! Each trial re-grows only the pair arcs on top of one base network; the
//! source, reviewer and sink arcs are built once.

use ndarray::Array2;

use super::builder::{FlowGraphBuilder, GraphBuildStrategy, RankedPrefix};
use super::maxflow::EdmondsKarp;
use crate::error::MatchError;

/// Result of a thinning search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThinningOutcome {
    /// Allowed pairs, best first.
    pub ranked: Vec<(usize, usize)>,
    /// Length of the shortest feasible prefix found.
    pub prefix_len: usize,
    /// Binary-search steps taken.
    pub iterations: usize,
}

impl ThinningOutcome {
    /// Strategy admitting the chosen prefix.
    pub fn strategy(&self) -> RankedPrefix<'_> {
        RankedPrefix {
            pairs: &self.ranked,
            len: self.prefix_len,
        }
    }
}

/// Binary search for the minimal feasible arc prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeThinningSearch {
    max_iterations: usize,
}

impl Default for EdgeThinningSearch {
    fn default() -> Self {
        Self { max_iterations: 64 }
    }
}

impl EdgeThinningSearch {
    /// Creates a search bounded by `max_iterations` steps.
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    /// Allowed pairs ordered locks first, then by descending score.
    ///
    /// Equal scores keep row-major order.
    pub fn rank_pairs(scores: &Array2<f64>, constraints: &Array2<i8>) -> Vec<(usize, usize)> {
        let mut pairs: Vec<(usize, usize)> = constraints
            .indexed_iter()
            .filter(|&(_, &c)| c != -1)
            .map(|(idx, _)| idx)
            .collect();
        pairs.sort_by(|&a, &b| {
            let locked = |idx: (usize, usize)| constraints[idx] == 1;
            locked(b)
                .cmp(&locked(a))
                .then_with(|| scores[b].total_cmp(&scores[a]))
        });
        pairs
    }

    /// Finds the shortest ranked prefix that still routes the full demand.
    ///
    /// # Errors
    /// `Infeasible` when even every allowed arc cannot cover the demand.
    pub fn search(
        &self,
        builder: &FlowGraphBuilder<'_>,
        scores: &Array2<f64>,
        constraints: &Array2<i8>,
    ) -> Result<ThinningOutcome, MatchError> {
        let ranked = Self::rank_pairs(scores, constraints);
        let required = builder.total_demand() as i64;
        let mut graph = builder.base_network();
        let mut solver = EdmondsKarp::new();

        let mut feasible = |len: usize| -> bool {
            graph.reset_to_base();
            RankedPrefix {
                pairs: &ranked,
                len,
            }
            .build(builder, &mut graph);
            let (s, t) = (graph.source, graph.sink);
            solver.solve(&mut graph.network, s, t, Some(required)) == required
        };

        if !feasible(ranked.len()) {
            return Err(MatchError::Infeasible(format!(
                "constraints leave less than the total demand of {required} coverable"
            )));
        }

        let mut lo = 0usize;
        let mut hi = ranked.len();
        let mut iterations = 0usize;
        while lo < hi && iterations < self.max_iterations {
            let mid = lo + (hi - lo) / 2;
            if feasible(mid) {
                hi = mid;
            } else {
                lo = mid + 1;
            }
            iterations += 1;
        }

        tracing::debug!(
            ranked = ranked.len(),
            prefix = hi,
            iterations,
            "edge thinning finished"
        );
        Ok(ThinningOutcome {
            ranked,
            prefix_len: hi,
            iterations,
        })
    }
}
