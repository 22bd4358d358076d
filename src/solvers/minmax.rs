//! Min/max-load assignment by a single min-cost flow.
//!
//! # Algorithm
//! 1. Check `Σmin ≤ Σdemand ≤ Σmax`.
//! 2. Build the assignment network over every allowed pair.
//! 3. Route exactly `Σdemand` units at minimum cost.
//! 4. Reject flows leaving a reviewer under its minimum.
//!
//! The result maximizes the total aggregate score among all assignments
//! respecting the load bounds, up to integer cost scaling.

use super::Solver;
use crate::config::MatchConfig;
use crate::encoder::{Encoder, SolutionMatrix};
use crate::error::MatchError;
use crate::flow::{scale_costs, AllPairs, FlowGraphBuilder, LoadBounds, MinCostFlow};

/// Total-score maximizing solver.
#[derive(Debug, Clone)]
pub struct MinMaxSolver {
    precision: f64,
}

impl MinMaxSolver {
    /// Creates a solver with the given cost scaling precision.
    pub fn new(precision: f64) -> Self {
        Self { precision }
    }

    /// Creates a solver from run configuration.
    pub fn from_config(config: &MatchConfig) -> Self {
        Self::new(config.precision)
    }
}

impl Default for MinMaxSolver {
    fn default() -> Self {
        Self::new(0.01)
    }
}

impl Solver for MinMaxSolver {
    fn name(&self) -> &'static str {
        "MinMax"
    }

    fn solve(&self, encoder: &Encoder) -> Result<SolutionMatrix, MatchError> {
        let costs = scale_costs(encoder.cost_matrix(), self.precision);
        let bounds = LoadBounds::from_reviewers(encoder.reviewers());
        let builder = FlowGraphBuilder::new(
            bounds.clone(),
            encoder.demands(),
            &costs,
            encoder.constraint_matrix(),
        )?;
        builder.check_supply()?;

        let demand = builder.total_demand() as i64;
        let mut graph = builder.build(&AllPairs);
        let (source, sink) = (graph.source, graph.sink);
        let outcome = MinCostFlow::new().solve(&mut graph.network, source, sink, demand)?;
        if !outcome.solved {
            return Err(MatchError::Infeasible(format!(
                "constraints allow only {} of {} required reviews",
                outcome.flow, demand
            )));
        }

        let solution = graph.solution();
        check_minimums(&solution, &bounds, encoder)?;
        tracing::debug!(cost = outcome.cost, flow = outcome.flow, "min-cost flow solved");
        Ok(solution)
    }
}

/// Index of the first reviewer whose load is below its minimum.
pub(crate) fn below_minimum(solution: &SolutionMatrix, bounds: &LoadBounds) -> Option<usize> {
    solution
        .rows()
        .into_iter()
        .zip(&bounds.min)
        .position(|(row, &min)| (row.sum() as usize) < min)
}

fn check_minimums(
    solution: &SolutionMatrix,
    bounds: &LoadBounds,
    encoder: &Encoder,
) -> Result<(), MatchError> {
    match below_minimum(solution, bounds) {
        Some(r) => Err(MatchError::Infeasible(format!(
            "reviewer '{}' cannot reach its minimum of {} papers",
            encoder.reviewers()[r].id,
            bounds.min[r]
        ))),
        None => Ok(()),
    }
}
