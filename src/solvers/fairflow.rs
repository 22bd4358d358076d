//! FairFlow: makespan refinement for per-paper fairness.
//!
//! Raises the score of the weakest paper instead of the total score.
//!
//! # Algorithm
//! 1. **Initial solution**: min-cost flow on a thinned arc set (falls back
//!    to every allowed pair when the thinned flow misses a load bound or
//!    drops a locked pair).
//! 2. For a makespan target `M`, partition papers by score `s`:
//!    - G1: `s ≥ M`
//!    - G2: `M − A ≤ s < M` (`A` = largest pair score)
//!    - G3: `s < M − A`
//! 3. While G1 and G3 are both non-empty: drop the weakest unlocked reviewer
//!    of each G3 paper, then move at most one reviewer out of each G1 paper
//!    into a G3 paper, directly or relayed through G2 papers, maximizing the
//!    number of moves. A G1 paper only gives up a reviewer it can spare
//!    while staying at `M`; a G2 paper only trades its weakest reviewer for
//!    one at least as strong. A validifier flow then refills unmet demand.
//!    A round is kept only if the result is feasible and the minimum paper
//!    score did not drop.
//! 4. Binary search over `M ∈ [0, A · max demand]`. `M` is reached when G3
//!    ends empty; the largest reached `M` wins.
//!
//! This is a heuristic. It gives no optimality certificate and usually
//! costs several flows where the min/max solver needs one.
//!
//! # Reference
//! Kobren, Saha & McCallum (2019), "Paper Matching with Local Fairness
//! Constraints", KDD

use ndarray::Array2;

use super::kpi::paper_scores;
use super::minmax::below_minimum;
use super::Solver;
use crate::config::MatchConfig;
use crate::encoder::{Encoder, SolutionMatrix};
use crate::error::{ErrorKind, MatchError};
use crate::flow::{
    restorable_lock, scale_costs, AllPairs, EdgeId, EdgeThinningSearch, FlowGraphBuilder,
    FlowNetwork, LoadBounds, MinCostFlow, NodeId, NodeRole,
};

const EPS: f64 = 1e-9;

/// Fairness-oriented solver.
#[derive(Debug, Clone)]
pub struct FairFlowSolver {
    precision: f64,
    outer_iterations: usize,
    max_refinements: usize,
    thinning: bool,
    thinning_max_iterations: usize,
}

impl FairFlowSolver {
    /// Creates a solver from run configuration.
    pub fn from_config(config: &MatchConfig) -> Self {
        Self {
            precision: config.precision,
            outer_iterations: config.fairflow.outer_iterations,
            max_refinements: config.fairflow.max_refinements,
            thinning: config.fairflow.thinning,
            thinning_max_iterations: config.thinning_max_iterations,
        }
    }

    /// Sets the number of makespan search steps.
    pub fn with_outer_iterations(mut self, n: usize) -> Self {
        self.outer_iterations = n;
        self
    }

    /// Enables or disables edge thinning for the initial solution.
    pub fn with_thinning(mut self, thinning: bool) -> Self {
        self.thinning = thinning;
        self
    }

    fn initial_solution(&self, problem: &Problem<'_>) -> Result<SolutionMatrix, MatchError> {
        let builder = problem.builder()?;
        let demand = builder.total_demand() as i64;

        if self.thinning {
            let outcome = EdgeThinningSearch::new(self.thinning_max_iterations).search(
                &builder,
                problem.scores,
                problem.constraints,
            )?;
            let mut graph = builder.build(&outcome.strategy());
            let (s, t) = (graph.source, graph.sink);
            let flow = MinCostFlow::new().solve(&mut graph.network, s, t, demand)?;
            if flow.solved {
                let solution = graph.solution();
                if below_minimum(&solution, &problem.bounds).is_none()
                    && problem.keeps_locks(&solution)
                {
                    return Ok(solution);
                }
            }
            tracing::debug!("thinned network misses a bound or lock, using every pair");
        }

        let mut graph = builder.build(&AllPairs);
        let (s, t) = (graph.source, graph.sink);
        let flow = MinCostFlow::new().solve(&mut graph.network, s, t, demand)?;
        if !flow.solved {
            return Err(MatchError::Infeasible(format!(
                "constraints allow only {} of {} required reviews",
                flow.flow, demand
            )));
        }
        let solution = graph.solution();
        if let Some(r) = below_minimum(&solution, &problem.bounds) {
            return Err(MatchError::Infeasible(format!(
                "reviewer at row {r} cannot reach its minimum of {} papers",
                problem.bounds.min[r]
            )));
        }
        Ok(solution)
    }

    /// Refines `solution` toward makespan `target` until it stalls.
    fn refine(
        &self,
        problem: &Problem<'_>,
        mut solution: SolutionMatrix,
        target: f64,
    ) -> Result<SolutionMatrix, MatchError> {
        for _ in 0..self.max_refinements {
            let groups = problem.partition(&solution, target);
            if groups.g1.is_empty() || groups.g3.is_empty() {
                break;
            }
            let before = min_score(&paper_scores(&solution, problem.scores));

            let Some(trial) = self.refine_step(problem, &solution, &groups, target)? else {
                break;
            };
            if !problem.is_feasible(&trial)
                || min_score(&paper_scores(&trial, problem.scores)) + EPS < before
            {
                break;
            }

            let remaining = problem.partition(&trial, target).g3.len();
            solution = trial;
            if remaining == groups.g3.len() {
                break;
            }
        }
        Ok(solution)
    }

    /// One reassignment round. `None` when nothing could move.
    fn refine_step(
        &self,
        problem: &Problem<'_>,
        solution: &SolutionMatrix,
        groups: &Groups,
        target: f64,
    ) -> Result<Option<SolutionMatrix>, MatchError> {
        let (rows, cols) = solution.dim();
        let scores = paper_scores(solution, problem.scores);
        let mut working = solution.clone();

        let mut removed = vec![None; cols];
        for &q in &groups.g3 {
            if let Some(w) = problem.weakest(&working, q) {
                working[(w, q)] = 0;
                removed[q] = Some(w);
            }
        }

        let mut net = FlowNetwork::new();
        let source = net.add_node(NodeRole::Source, 0);
        let sink = net.add_node(NodeRole::Sink, 0);
        let reviewer: Vec<NodeId> = (0..rows)
            .map(|r| net.add_node(NodeRole::Reviewer(r), 0))
            .collect();
        let paper: Vec<NodeId> = (0..cols)
            .map(|p| net.add_node(NodeRole::Paper(p), 0))
            .collect();
        let mut moves: Vec<(EdgeId, Move)> = Vec::new();

        for &p in &groups.g1 {
            net.add_edge(source, paper[p], 1, 0);
            for r in 0..rows {
                if working[(r, p)] > 0
                    && problem.constraints[(r, p)] != 1
                    && scores[p] - problem.scores[(r, p)] >= target - EPS
                {
                    let e = net.add_edge(paper[p], reviewer[r], 1, 0);
                    moves.push((e, Move::Leave { reviewer: r, paper: p }));
                }
            }
        }

        for &q in &groups.g2 {
            let Some(w) = problem.weakest(&working, q) else {
                continue;
            };
            let floor = problem.scores[(w, q)];
            for r in 0..rows {
                if working[(r, q)] == 0
                    && problem.constraints[(r, q)] != -1
                    && problem.scores[(r, q)] >= floor - EPS
                {
                    let e = net.add_edge(reviewer[r], paper[q], 1, 0);
                    moves.push((e, Move::Join { reviewer: r, paper: q }));
                }
            }
            let e = net.add_edge(paper[q], reviewer[w], 1, 0);
            moves.push((e, Move::Leave { reviewer: w, paper: q }));
        }

        for &q in &groups.g3 {
            for r in 0..rows {
                if working[(r, q)] == 0
                    && problem.constraints[(r, q)] != -1
                    && removed[q] != Some(r)
                {
                    let e = net.add_edge(reviewer[r], paper[q], 1, problem.costs[(r, q)]);
                    moves.push((e, Move::Join { reviewer: r, paper: q }));
                }
            }
            net.add_edge(paper[q], sink, 1, 0);
        }

        let outcome = MinCostFlow::new().solve_max(&mut net, source, sink)?;
        if outcome.flow == 0 {
            return Ok(None);
        }

        let (leaves, joins): (Vec<_>, Vec<_>) = moves
            .iter()
            .filter(|(e, _)| net.flow(*e) > 0)
            .map(|&(_, m)| m)
            .partition(|m| matches!(m, Move::Leave { .. }));
        for m in leaves.into_iter().chain(joins) {
            match m {
                Move::Leave { reviewer, paper } if working[(reviewer, paper)] > 0 => {
                    working[(reviewer, paper)] = 0;
                }
                Move::Join { reviewer, paper } if working[(reviewer, paper)] == 0 => {
                    working[(reviewer, paper)] = 1;
                }
                _ => return Ok(None),
            }
        }

        match problem.validify(working) {
            Ok(refilled) => Ok(Some(refilled)),
            Err(e) if e.kind() == ErrorKind::Infeasibility => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl Default for FairFlowSolver {
    fn default() -> Self {
        Self::from_config(&MatchConfig::default())
    }
}

impl Solver for FairFlowSolver {
    fn name(&self) -> &'static str {
        "FairFlow"
    }

    fn solve(&self, encoder: &Encoder) -> Result<SolutionMatrix, MatchError> {
        let problem = Problem::new(encoder, self.precision);
        problem.builder()?.check_supply()?;

        let mut best = self.initial_solution(&problem)?;
        let mut best_min = min_score(&paper_scores(&best, problem.scores));
        let max_demand = problem.demands.iter().copied().max().unwrap_or(0);
        let (mut lo, mut hi) = (0.0, problem.max_affinity * max_demand as f64);
        let mut reached = None;

        for step in 0..self.outer_iterations {
            let target = (lo + hi) / 2.0;
            let candidate = self.refine(&problem, best.clone(), target)?;
            let g3 = problem.partition(&candidate, target).g3.len();
            tracing::debug!(step, target, g3, "makespan candidate");

            if g3 == 0 {
                lo = target;
                reached = Some(target);
                let candidate_min = min_score(&paper_scores(&candidate, problem.scores));
                if candidate_min + EPS >= best_min {
                    best = candidate;
                    best_min = candidate_min;
                }
            } else {
                hi = target;
            }
        }

        tracing::debug!(makespan = ?reached, min_paper_score = best_min, "fairflow finished");
        Ok(best)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Leave { reviewer: usize, paper: usize },
    Join { reviewer: usize, paper: usize },
}

#[derive(Debug, Default)]
struct Groups {
    g1: Vec<usize>,
    g2: Vec<usize>,
    g3: Vec<usize>,
}

/// Numeric view of an encoded problem shared by every refinement round.
struct Problem<'e> {
    scores: &'e Array2<f64>,
    costs: Array2<i64>,
    constraints: &'e Array2<i8>,
    bounds: LoadBounds,
    demands: Vec<usize>,
    max_affinity: f64,
}

impl<'e> Problem<'e> {
    fn new(encoder: &'e Encoder, precision: f64) -> Self {
        let scores = encoder.cost_matrix();
        let constraints = encoder.constraint_matrix();
        let max_affinity = scores
            .iter()
            .zip(constraints.iter())
            .filter(|&(_, &c)| c != -1)
            .map(|(&s, _)| s)
            .fold(0.0, f64::max);
        Self {
            scores,
            costs: scale_costs(scores, precision),
            constraints,
            bounds: LoadBounds::from_reviewers(encoder.reviewers()),
            demands: encoder.demands(),
            max_affinity,
        }
    }

    fn builder(&self) -> Result<FlowGraphBuilder<'_>, MatchError> {
        FlowGraphBuilder::new(
            self.bounds.clone(),
            self.demands.clone(),
            &self.costs,
            self.constraints,
        )
    }

    fn partition(&self, solution: &SolutionMatrix, target: f64) -> Groups {
        let mut groups = Groups::default();
        for (p, s) in paper_scores(solution, self.scores).into_iter().enumerate() {
            if s >= target - EPS {
                groups.g1.push(p);
            } else if s >= target - self.max_affinity - EPS {
                groups.g2.push(p);
            } else {
                groups.g3.push(p);
            }
        }
        groups
    }

    /// Lowest-scoring unlocked reviewer of paper `p`. Ties pick the first row.
    fn weakest(&self, solution: &SolutionMatrix, p: usize) -> Option<usize> {
        (0..solution.nrows())
            .filter(|&r| solution[(r, p)] > 0 && self.constraints[(r, p)] != 1)
            .min_by(|&a, &b| self.scores[(a, p)].total_cmp(&self.scores[(b, p)]))
    }

    /// Fills unmet demand with a flow over the remaining capacity.
    fn validify(&self, solution: SolutionMatrix) -> Result<SolutionMatrix, MatchError> {
        let demands: Vec<usize> = self
            .demands
            .iter()
            .enumerate()
            .map(|(p, &d)| d.saturating_sub(solution.column(p).sum() as usize))
            .collect();
        if demands.iter().all(|&d| d == 0) {
            return Ok(solution);
        }

        let extra = {
            let builder = FlowGraphBuilder::new(
                self.bounds.residual(&solution),
                demands,
                &self.costs,
                self.constraints,
            )?
            .excluding(&solution);
            builder.check_capacity()?;

            let required = builder.total_demand() as i64;
            let mut graph = builder.build(&AllPairs);
            let (s, t) = (graph.source, graph.sink);
            let outcome = MinCostFlow::new().solve(&mut graph.network, s, t, required)?;
            if !outcome.solved {
                return Err(MatchError::Infeasible(format!(
                    "validifier placed {} of {} missing reviews",
                    outcome.flow, required
                )));
            }
            graph.solution()
        };
        Ok(solution + extra)
    }

    fn keeps_locks(&self, solution: &SolutionMatrix) -> bool {
        self.constraints
            .indexed_iter()
            .all(|(idx, &c)| c != 1 || solution[idx] > 0)
    }

    fn is_feasible(&self, solution: &SolutionMatrix) -> bool {
        let pairs_ok = solution
            .indexed_iter()
            .all(|(idx, &f)| f <= 1 && (f == 0 || self.constraints[idx] != -1));
        let papers_ok = self
            .demands
            .iter()
            .enumerate()
            .all(|(p, &d)| solution.column(p).sum() as usize == d);
        let reviewers_ok = solution.rows().into_iter().enumerate().all(|(r, row)| {
            let load = row.sum() as usize;
            self.bounds.min[r] <= load && load <= self.bounds.max[r]
        });
        pairs_ok
            && papers_ok
            && reviewers_ok
            && restorable_lock(solution, self.constraints, &self.bounds).is_none()
    }
}

fn min_score(scores: &[f64]) -> f64 {
    scores.iter().copied().fold(f64::INFINITY, f64::min)
}
