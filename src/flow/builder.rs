//! Assignment network construction.
//!
//! # Network
//!
//! ```text
//!            ┌─ Free(r) ─────┐
//! Source ────┤               ├── Reviewer(r) ── Paper(p) ── Sink
//!            └─ Overflow(r) ─┘
//! ```
//!
//! | Arc | Capacity | Cost |
//! |-----|----------|------|
//! | Source → Free(r) | min(r) | 0 |
//! | Source → Overflow(r) | max(r) − min(r) | overflow penalty |
//! | Free(r) → Reviewer(r) | min(r) | 0 |
//! | Overflow(r) → Reviewer(r) | max(r) − min(r) | 0 |
//! | Reviewer(r) → Paper(p) | 1 | scaled cost, lock cost, or omitted |
//! | Paper(p) → Sink | demand(p) | 0 |
//!
//! The overflow penalty exceeds the largest difference the pair arcs of two
//! flows can make, so a min-cost flow fills every reviewer's minimum before
//! using overflow capacity. Forbidden pairs get no arc at all.
//!
//! Locked pairs cost `min − 1 − Σdemand · (max − min)` over the free pair
//! costs. Dropping one lock can never be paid back by rearranging the
//! other arcs, so the flow keeps as many locks as the bounds allow.
//!
//! Which reviewer→paper arcs exist is decided by a [`GraphBuildStrategy`].
//!
//! # Cost scaling
//! Aggregate scores are real; the solver needs integers. A pair's cost is
//! `round(-score / precision)`, so higher scores are cheaper.

use ndarray::Array2;
use std::fmt::Debug;

use super::network::{EdgeId, FlowNetwork, NodeId, NodeRole};
use crate::encoder::SolutionMatrix;
use crate::error::MatchError;
use crate::models::Reviewer;

/// Converts aggregate scores into integer arc costs.
pub fn scale_costs(scores: &Array2<f64>, precision: f64) -> Array2<i64> {
    scores.mapv(|s| (-s / precision).round() as i64)
}

/// Largest arc cost a network of `nodes` nodes may carry.
///
/// Any path cost, potentials included, then stays below the shortest-path
/// distance ceiling of the min-cost flow solver.
fn cost_ceiling(nodes: usize) -> i64 {
    let nodes = i64::try_from(nodes.max(1)).unwrap_or(i64::MAX);
    (i64::MAX / 4) / nodes.saturating_mul(4)
}

fn out_of_range() -> MatchError {
    MatchError::InvalidConfig("scaled scores exceed the flow solver's cost range".into())
}

/// Per-reviewer load bounds, in row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadBounds {
    pub min: Vec<usize>,
    pub max: Vec<usize>,
}

impl LoadBounds {
    /// Collects the bounds of the given reviewers.
    pub fn from_reviewers(reviewers: &[Reviewer]) -> Self {
        Self {
            min: reviewers.iter().map(|r| r.min_papers).collect(),
            max: reviewers.iter().map(|r| r.max_papers).collect(),
        }
    }

    /// Bounds left over once `solution` is in place.
    pub fn residual(&self, solution: &SolutionMatrix) -> Self {
        let loads: Vec<usize> = solution.rows().into_iter().map(|r| r.sum() as usize).collect();
        Self {
            min: self
                .min
                .iter()
                .zip(&loads)
                .map(|(&m, &l)| m.saturating_sub(l))
                .collect(),
            max: self
                .max
                .iter()
                .zip(&loads)
                .map(|(&m, &l)| m.saturating_sub(l))
                .collect(),
        }
    }

    /// Capacity of reviewer `r` above its minimum.
    pub fn extra(&self, r: usize) -> usize {
        self.max[r].saturating_sub(self.min[r])
    }

    /// Number of reviewers.
    pub fn len(&self) -> usize {
        self.max.len()
    }

    /// Whether there are no reviewers.
    pub fn is_empty(&self) -> bool {
        self.max.is_empty()
    }

    /// Σ min(r).
    pub fn min_supply(&self) -> usize {
        self.min.iter().sum()
    }

    /// Σ max(r).
    pub fn max_supply(&self) -> usize {
        self.max.iter().sum()
    }
}

/// First dropped lock that a single swap would restore.
///
/// A lock `(r, p)` missing from `solution` is restorable when reviewer `r`
/// has room below its maximum and paper `p` holds an unlocked reviewer that
/// can give up the slot without falling below its minimum. A min-cost flow
/// over every pair never leaves such a lock behind.
pub fn restorable_lock(
    solution: &SolutionMatrix,
    constraints: &Array2<i8>,
    bounds: &LoadBounds,
) -> Option<(usize, usize)> {
    let loads: Vec<usize> = solution.rows().into_iter().map(|row| row.sum() as usize).collect();
    constraints
        .indexed_iter()
        .filter(|&(idx, &c)| c == 1 && solution[idx] == 0)
        .map(|(idx, _)| idx)
        .find(|&(r, p)| {
            loads[r] < bounds.max[r]
                && (0..solution.nrows()).any(|k| {
                    solution[(k, p)] > 0 && constraints[(k, p)] != 1 && loads[k] > bounds.min[k]
                })
        })
}

/// A reviewer→paper arc in a built network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairArc {
    pub reviewer: usize,
    pub paper: usize,
    pub edge: EdgeId,
}

/// A built assignment network plus the bookkeeping needed to decode it.
#[derive(Debug, Clone)]
pub struct AssignmentNetwork {
    pub network: FlowNetwork,
    pub source: NodeId,
    pub sink: NodeId,
    reviewers: usize,
    papers: usize,
    pair_arcs: Vec<PairArc>,
    base_len: usize,
}

impl AssignmentNetwork {
    /// Node of reviewer `r`.
    pub fn reviewer_node(&self, r: usize) -> NodeId {
        1 + 2 * self.reviewers + r
    }

    /// Node of paper `p`.
    pub fn paper_node(&self, p: usize) -> NodeId {
        1 + 3 * self.reviewers + p
    }

    /// Reviewer→paper arcs added so far.
    pub fn pair_arcs(&self) -> &[PairArc] {
        &self.pair_arcs
    }

    /// Drops every reviewer→paper arc and clears all flow.
    pub fn reset_to_base(&mut self) {
        self.network.truncate_edges(self.base_len);
        self.network.reset_flows();
        self.pair_arcs.clear();
    }

    /// Reads the reviewer×paper flow off the pair arcs.
    pub fn solution(&self) -> SolutionMatrix {
        let mut solution = SolutionMatrix::zeros((self.reviewers, self.papers));
        for arc in &self.pair_arcs {
            let flow = self.network.flow(arc.edge);
            if flow > 0 {
                solution[(arc.reviewer, arc.paper)] += flow as u32;
            }
        }
        solution
    }
}

/// Decides which reviewer→paper arcs enter a network.
pub trait GraphBuildStrategy: Debug {
    /// Strategy name for logs.
    fn name(&self) -> &'static str;

    /// Adds reviewer→paper arcs to `graph`.
    fn build(&self, builder: &FlowGraphBuilder<'_>, graph: &mut AssignmentNetwork);
}

/// Every allowed pair, in row-major order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllPairs;

impl GraphBuildStrategy for AllPairs {
    fn name(&self) -> &'static str {
        "AllPairs"
    }

    fn build(&self, builder: &FlowGraphBuilder<'_>, graph: &mut AssignmentNetwork) {
        let (rows, cols) = builder.shape();
        for r in 0..rows {
            for p in 0..cols {
                builder.add_pair_arc(graph, r, p);
            }
        }
    }
}

/// The first `len` pairs of a ranked list.
#[derive(Debug, Clone, Copy)]
pub struct RankedPrefix<'r> {
    pub pairs: &'r [(usize, usize)],
    pub len: usize,
}

impl GraphBuildStrategy for RankedPrefix<'_> {
    fn name(&self) -> &'static str {
        "RankedPrefix"
    }

    fn build(&self, builder: &FlowGraphBuilder<'_>, graph: &mut AssignmentNetwork) {
        for &(r, p) in self.pairs.iter().take(self.len) {
            builder.add_pair_arc(graph, r, p);
        }
    }
}

/// Builds assignment networks over one cost/constraint problem.
#[derive(Debug, Clone)]
pub struct FlowGraphBuilder<'a> {
    bounds: LoadBounds,
    demands: Vec<usize>,
    costs: &'a Array2<i64>,
    constraints: &'a Array2<i8>,
    exclude: Option<&'a SolutionMatrix>,
    lock_cost: i64,
    overflow_penalty: i64,
}

impl<'a> FlowGraphBuilder<'a> {
    /// Creates a builder.
    ///
    /// `costs` and `constraints` are reviewer×paper; `bounds` has one entry
    /// per row and `demands` one per column.
    ///
    /// # Errors
    /// `InvalidConfig` when an allowed pair cost, the lock cost or the
    /// overflow penalty does not fit the solver's cost range.
    pub fn new(
        bounds: LoadBounds,
        demands: Vec<usize>,
        costs: &'a Array2<i64>,
        constraints: &'a Array2<i8>,
    ) -> Result<Self, MatchError> {
        let mut free_range = None::<(i64, i64)>;
        for (idx, &c) in costs.indexed_iter() {
            if constraints[idx] == 0 {
                free_range = Some(free_range.map_or((c, c), |(lo, hi)| (lo.min(c), hi.max(c))));
            }
        }
        let (min_free, max_free) = free_range.unwrap_or((0, 0));
        let demand = i64::try_from(demands.iter().sum::<usize>()).map_err(|_| out_of_range())?;

        let lock_cost = max_free
            .checked_sub(min_free)
            .and_then(|spread| spread.checked_mul(demand))
            .and_then(|slack| min_free.checked_sub(1)?.checked_sub(slack))
            .ok_or_else(out_of_range)?;
        let allowed = costs
            .iter()
            .zip(constraints.iter())
            .filter(|&(_, &k)| k != -1)
            .map(|(&c, _)| c);
        let max_abs = allowed
            .chain(std::iter::once(lock_cost))
            .map(i64::checked_abs)
            .try_fold(0i64, |acc, c| c.map(|c| acc.max(c)))
            .ok_or_else(out_of_range)?;
        let overflow_penalty = demand
            .max(1)
            .checked_mul(2)
            .and_then(|d| d.checked_mul(max_abs))
            .and_then(|p| p.checked_add(1))
            .ok_or_else(out_of_range)?;

        let (rows, cols) = costs.dim();
        if overflow_penalty > cost_ceiling(3 * rows + cols + 2) {
            return Err(out_of_range());
        }

        Ok(Self {
            bounds,
            demands,
            costs,
            constraints,
            exclude: None,
            lock_cost,
            overflow_penalty,
        })
    }

    /// Omits every pair already set in `solution`.
    pub fn excluding(mut self, solution: &'a SolutionMatrix) -> Self {
        self.exclude = Some(solution);
        self
    }

    /// Reviewers × papers.
    pub fn shape(&self) -> (usize, usize) {
        self.costs.dim()
    }

    /// Load bounds in use.
    pub fn bounds(&self) -> &LoadBounds {
        &self.bounds
    }

    /// Demand per paper.
    pub fn demands(&self) -> &[usize] {
        &self.demands
    }

    /// Σ demand(p).
    pub fn total_demand(&self) -> usize {
        self.demands.iter().sum()
    }

    /// Cost given to locked pairs.
    pub fn lock_cost(&self) -> i64 {
        self.lock_cost
    }

    /// Cost of one unit routed through an overflow node.
    pub fn overflow_penalty(&self) -> i64 {
        self.overflow_penalty
    }

    /// Requires `Σmin ≤ Σdemand ≤ Σmax`.
    pub fn check_supply(&self) -> Result<(), MatchError> {
        let demand = self.total_demand();
        let min_supply = self.bounds.min_supply();
        let max_supply = self.bounds.max_supply();
        if demand < min_supply || demand > max_supply {
            return Err(MatchError::SupplyDemandMismatch {
                demand,
                min_supply,
                max_supply,
            });
        }
        Ok(())
    }

    /// Requires `Σdemand ≤ Σmax` only.
    pub fn check_capacity(&self) -> Result<(), MatchError> {
        let demand = self.total_demand();
        let max_supply = self.bounds.max_supply();
        if demand > max_supply {
            return Err(MatchError::SupplyDemandMismatch {
                demand,
                min_supply: self.bounds.min_supply(),
                max_supply,
            });
        }
        Ok(())
    }

    /// Arc cost of a pair, or `None` when the pair gets no arc.
    pub fn pair_cost(&self, r: usize, p: usize) -> Option<i64> {
        if self.exclude.is_some_and(|s| s[(r, p)] > 0) {
            return None;
        }
        match self.constraints[(r, p)] {
            -1 => None,
            1 => Some(self.lock_cost),
            _ => Some(self.costs[(r, p)]),
        }
    }

    /// Everything but the reviewer→paper arcs.
    pub fn base_network(&self) -> AssignmentNetwork {
        let (rows, cols) = self.shape();
        let mut network = FlowNetwork::with_capacity(3 * rows + cols + 2, 4 * rows + cols + rows * cols);
        let demand = self.total_demand() as i64;

        let source = network.add_node(NodeRole::Source, demand);
        for r in 0..rows {
            network.add_node(NodeRole::Free(r), 0);
        }
        for r in 0..rows {
            network.add_node(NodeRole::Overflow(r), 0);
        }
        for r in 0..rows {
            network.add_node(NodeRole::Reviewer(r), 0);
        }
        for p in 0..cols {
            network.add_node(NodeRole::Paper(p), 0);
        }
        let sink = network.add_node(NodeRole::Sink, -demand);

        for r in 0..rows {
            let min = self.bounds.min[r] as i64;
            let extra = self.bounds.extra(r) as i64;
            let free = 1 + r;
            let overflow = 1 + rows + r;
            let reviewer = 1 + 2 * rows + r;
            network.add_edge(source, free, min, 0);
            network.add_edge(source, overflow, extra, self.overflow_penalty);
            network.add_edge(free, reviewer, min, 0);
            network.add_edge(overflow, reviewer, extra, 0);
        }
        for (p, &d) in self.demands.iter().enumerate() {
            network.add_edge(1 + 3 * rows + p, sink, d as i64, 0);
        }

        let base_len = network.edge_len();
        AssignmentNetwork {
            network,
            source,
            sink,
            reviewers: rows,
            papers: cols,
            pair_arcs: Vec::new(),
            base_len,
        }
    }

    /// Adds the arc of one pair if the pair is allowed. Returns whether an
    /// arc was added.
    pub fn add_pair_arc(&self, graph: &mut AssignmentNetwork, r: usize, p: usize) -> bool {
        let Some(cost) = self.pair_cost(r, p) else {
            return false;
        };
        let from = graph.reviewer_node(r);
        let to = graph.paper_node(p);
        let edge = graph.network.add_edge(from, to, 1, cost);
        graph.pair_arcs.push(PairArc {
            reviewer: r,
            paper: p,
            edge,
        });
        true
    }

    /// Base network plus the arcs chosen by `strategy`.
    pub fn build(&self, strategy: &dyn GraphBuildStrategy) -> AssignmentNetwork {
        let mut graph = self.base_network();
        strategy.build(self, &mut graph);
        tracing::debug!(
            strategy = strategy.name(),
            nodes = graph.network.node_count(),
            pair_arcs = graph.pair_arcs.len(),
            "assignment network built"
        );
        graph
    }
}
