use proptest::prelude::*;
use u_match::config::{FairFlowConfig, MatchConfig};
use u_match::matcher::{MatchResult, Matcher};
use u_match::models::{
    ConstraintEdge, CustomDemand, CustomLoad, MatchInput, MatchStatus, ScoreSpec,
};
use u_match::solvers::SolverKind;

#[derive(Debug, Clone)]
struct Instance {
    reviewers: usize,
    papers: usize,
    scores: Vec<u8>,
    vetoes: Vec<bool>,
    locks: Vec<bool>,
    min_papers: usize,
    max_papers: usize,
    demand: usize,
}

impl Instance {
    fn input(&self) -> MatchInput {
        let reviewers: Vec<String> = (0..self.reviewers).map(|i| format!("R{i}")).collect();
        let papers: Vec<String> = (0..self.papers).map(|j| format!("P{j}")).collect();
        let mut spec = ScoreSpec::new("affinity", 1.0);
        let mut input = MatchInput::new(reviewers, papers);
        for i in 0..self.reviewers {
            for j in 0..self.papers {
                let k = i * self.papers + j;
                spec = spec.with_edge(format!("P{j}"), format!("R{i}"), f64::from(self.scores[k]) / 100.0);
                if self.locks[k] {
                    input = input.with_constraint(ConstraintEdge::lock(format!("P{j}"), format!("R{i}")));
                }
                if self.vetoes[k] {
                    input = input.with_constraint(ConstraintEdge::veto(format!("P{j}"), format!("R{i}")));
                }
            }
        }
        input.with_score(spec)
    }

    fn config(&self, solver: SolverKind) -> MatchConfig {
        MatchConfig::new()
            .with_loads(self.min_papers, self.max_papers)
            .with_user_demand(self.demand)
            .with_solver(solver)
    }

    fn without_locks(&self) -> Self {
        Self {
            locks: vec![false; self.locks.len()],
            ..self.clone()
        }
    }

    /// Locked pairs that no veto overrides.
    fn effective_locks(&self) -> Vec<(usize, usize)> {
        (0..self.reviewers)
            .flat_map(|i| (0..self.papers).map(move |j| (i, j)))
            .filter(|&(i, j)| {
                let k = i * self.papers + j;
                self.locks[k] && !self.vetoes[k]
            })
            .collect()
    }

    /// The lock-free instance with every effective lock already placed:
    /// locked pairs are vetoed and their slots taken off the bounds. A
    /// solution of it plus the locks solves the original instance.
    fn with_locks_placed(&self) -> Option<MatchInput> {
        let locks = self.effective_locks();
        let mut input = self.without_locks().input();
        for i in 0..self.reviewers {
            let taken = locks.iter().filter(|&&(r, _)| r == i).count();
            if taken > self.max_papers {
                return None;
            }
            if taken > 0 {
                let max = self.max_papers - taken;
                input = input.with_custom_load(CustomLoad::new(format!("R{i}"), max));
            }
        }
        for j in 0..self.papers {
            let taken = locks.iter().filter(|&&(_, p)| p == j).count();
            if taken > self.demand {
                return None;
            }
            if taken > 0 {
                let demand = self.demand - taken;
                input = input.with_custom_demand(CustomDemand::new(format!("P{j}"), demand));
            }
        }
        for &(i, j) in &locks {
            input = input.with_constraint(ConstraintEdge::veto(format!("P{j}"), format!("R{i}")));
        }
        Some(input)
    }

    fn check(&self, result: &MatchResult) -> Result<(), TestCaseError> {
        for (j, paper) in result.assignments.iter().enumerate() {
            prop_assert_eq!(paper.reviewers.len(), self.demand);
            for record in &paper.reviewers {
                let i: usize = record.reviewer[1..].parse().unwrap_or(usize::MAX);
                prop_assert!(!self.vetoes[i * self.papers + j], "vetoed pair assigned");
            }
        }
        for row in result.solution.rows() {
            let load = row.sum() as usize;
            prop_assert!(self.min_papers <= load && load <= self.max_papers);
        }
        Ok(())
    }
}

fn instance() -> impl Strategy<Value = Instance> {
    (2usize..=6, 1usize..=4, 0usize..=1, 1usize..=3, 1usize..=2)
        .prop_flat_map(|(reviewers, papers, min_papers, extra, demand)| {
            let pairs = reviewers * papers;
            (
                prop::collection::vec(0u8..=100, pairs),
                prop::collection::vec(prop::bool::weighted(0.15), pairs),
                prop::collection::vec(prop::bool::weighted(0.2), pairs),
            )
                .prop_map(move |(scores, vetoes, locks)| Instance {
                    reviewers,
                    papers,
                    scores,
                    vetoes,
                    locks,
                    min_papers,
                    max_papers: min_papers + extra,
                    demand,
                })
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn solutions_respect_bounds_and_vetoes(instance in instance()) {
        for solver in SolverKind::ALL {
            let mut matcher = Matcher::new(instance.config(solver));
            let outcome = matcher.run(&instance.input()).map(|r| instance.check(r));
            match outcome {
                Ok(checked) => checked?,
                Err(_) => {
                    prop_assert_eq!(matcher.status(), MatchStatus::NoSolution);
                }
            }
        }
    }

    #[test]
    fn solvers_agree_on_feasibility(instance in instance()) {
        let input = instance.input();
        let min_max = Matcher::new(instance.config(SolverKind::MinMax)).run(&input).is_ok();
        let fair_flow = Matcher::new(instance.config(SolverKind::FairFlow)).run(&input).is_ok();
        prop_assert_eq!(min_max, fair_flow);
    }

    #[test]
    fn min_max_total_is_not_beaten(instance in instance()) {
        // Locks are priced above score, so totals only compare lock-free.
        let instance = instance.without_locks();
        let input = instance.input();
        let mut min_max = Matcher::new(instance.config(SolverKind::MinMax));
        let mut fair_flow = Matcher::new(instance.config(SolverKind::FairFlow));
        if let (Ok(a), Ok(b)) = (min_max.run(&input), fair_flow.run(&input)) {
            prop_assert!(a.kpi.total_score + 1e-6 >= b.kpi.total_score);
        }
    }

    #[test]
    fn fair_flow_never_lowers_initial_minimum(instance in instance()) {
        let input = instance.input();
        let initial_only = instance.config(SolverKind::FairFlow).with_fairflow(FairFlowConfig {
            max_refinements: 0,
            ..FairFlowConfig::default()
        });
        let mut initial = Matcher::new(initial_only);
        let mut refined = Matcher::new(instance.config(SolverKind::FairFlow));
        if let (Ok(a), Ok(b)) = (initial.run(&input), refined.run(&input)) {
            prop_assert!(b.kpi.min_paper_score + 1e-6 >= a.kpi.min_paper_score);
        }
    }

    #[test]
    fn feasible_locks_are_kept(instance in instance()) {
        let locks = instance.effective_locks();
        let Some(placed) = instance.with_locks_placed() else {
            return Ok(());
        };
        let mut reduced = Matcher::new(instance.config(SolverKind::MinMax));
        if locks.is_empty() || reduced.run(&placed).is_err() {
            return Ok(());
        }

        let input = instance.input();
        for solver in SolverKind::ALL {
            let mut matcher = Matcher::new(instance.config(solver));
            let solved = matcher.run(&input).is_ok();
            prop_assert!(solved, "{} failed: {:?}", solver, matcher.error_message());
            let solution = &matcher.result()?.solution;
            for &(i, j) in &locks {
                prop_assert_eq!(solution[(i, j)], 1, "{} dropped lock (R{}, P{})", solver, i, j);
            }
        }
    }
}
