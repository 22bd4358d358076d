//! Minimum-cost flow by successive shortest paths.
//!
//! # Algorithm
//! 1. Bellman-Ford from the source sets initial node potentials, so
//!    negative arc costs are allowed (no negative cycles).
//! 2. Repeatedly run Dijkstra on reduced costs
//!    `c'(u, v) = c(u, v) + π(u) − π(v) ≥ 0`, augment along the shortest
//!    source→sink path, and fold the distances into the potentials.
//!
//! Every augmentation is a shortest path in the residual graph, so the flow
//! after `k` units is a min-cost flow of value `k`.
//!
//! # Ties
//! Among equal-cost paths the one found first wins, which depends on edge
//! insertion order. Callers must not rely on which of several optimal
//! assignments comes back.
//!
//! # Reference
//! Ahuja, Magnanti & Orlin (1993), "Network Flows", Ch. 9.7

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::network::{EdgeId, FlowNetwork, NodeId};
use crate::error::MatchError;

const INF: i64 = i64::MAX / 4;

/// Result of a min-cost flow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowOutcome {
    /// Whether the requested amount was routed. When false the edge flows
    /// describe a partial solution and must not be decoded.
    pub solved: bool,
    /// Units routed.
    pub flow: i64,
    /// Total cost of the routed flow.
    pub cost: i64,
}

#[derive(Copy, Clone, Eq, PartialEq)]
struct State {
    dist: i64,
    v: NodeId,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist.cmp(&other.dist).then_with(|| self.v.cmp(&other.v))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Successive-shortest-path solver. Scratch buffers are reused across runs.
#[derive(Debug, Clone, Default)]
pub struct MinCostFlow {
    potential: Vec<i64>,
    dist: Vec<i64>,
    prev_edge: Vec<EdgeId>,
}

impl MinCostFlow {
    /// Creates a solver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes exactly `required` units from `source` to `sink` at minimum cost.
    ///
    /// `solved` is false when the network cannot carry `required` units.
    pub fn solve(
        &mut self,
        network: &mut FlowNetwork,
        source: NodeId,
        sink: NodeId,
        required: i64,
    ) -> Result<FlowOutcome, MatchError> {
        let (flow, cost) = self.run(network, source, sink, required)?;
        Ok(FlowOutcome {
            solved: flow == required,
            flow,
            cost,
        })
    }

    /// Routes as many units as possible, at minimum cost among maximum flows.
    pub fn solve_max(
        &mut self,
        network: &mut FlowNetwork,
        source: NodeId,
        sink: NodeId,
    ) -> Result<FlowOutcome, MatchError> {
        let (flow, cost) = self.run(network, source, sink, INF)?;
        Ok(FlowOutcome {
            solved: true,
            flow,
            cost,
        })
    }

    fn run(
        &mut self,
        network: &mut FlowNetwork,
        s: NodeId,
        t: NodeId,
        limit: i64,
    ) -> Result<(i64, i64), MatchError> {
        let n = network.node_count();
        self.potential.clear();
        self.potential.resize(n, 0);
        self.dist.resize(n, INF);
        self.prev_edge.resize(n, 0);

        self.init_potentials(network, s)?;

        let mut flow = 0i64;
        let mut cost = 0i64;
        while flow < limit {
            if !self.dijkstra(network, s, t) {
                break;
            }
            for v in 0..n {
                if self.dist[v] < INF {
                    self.potential[v] += self.dist[v];
                }
            }

            let mut delta = limit - flow;
            let mut v = t;
            while v != s {
                let e = self.prev_edge[v];
                delta = delta.min(network.residual(e));
                v = network.origin(e);
            }

            let mut v = t;
            while v != s {
                let e = self.prev_edge[v];
                network.push(e, delta);
                cost += delta * network.cost(e);
                v = network.origin(e);
            }
            flow += delta;
        }
        Ok((flow, cost))
    }

    /// Bellman-Ford over edges with residual capacity.
    fn init_potentials(&mut self, network: &FlowNetwork, s: NodeId) -> Result<(), MatchError> {
        let n = network.node_count();
        self.dist.fill(INF);
        self.dist[s] = 0;

        let mut rounds = 0;
        loop {
            let mut changed = false;
            for e in 0..network.edge_len() {
                if network.residual(e) <= 0 {
                    continue;
                }
                let u = network.origin(e);
                if self.dist[u] == INF {
                    continue;
                }
                let v = network.target(e);
                let candidate = self.dist[u] + network.cost(e);
                if candidate < self.dist[v] {
                    self.dist[v] = candidate;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
            rounds += 1;
            if rounds > n {
                return Err(MatchError::Solver(
                    "negative-cost cycle in flow network".into(),
                ));
            }
        }

        for v in 0..n {
            self.potential[v] = if self.dist[v] < INF { self.dist[v] } else { 0 };
        }
        Ok(())
    }

    /// Shortest path on reduced costs. Returns whether `t` is reachable.
    fn dijkstra(&mut self, network: &FlowNetwork, s: NodeId, t: NodeId) -> bool {
        self.dist.fill(INF);
        self.dist[s] = 0;
        let mut heap = BinaryHeap::new();
        heap.push(Reverse(State { dist: 0, v: s }));

        while let Some(Reverse(State { dist, v })) = heap.pop() {
            if self.dist[v] < dist {
                continue;
            }
            for e in network.out_edges(v) {
                if network.residual(e) <= 0 {
                    continue;
                }
                let to = network.target(e);
                let reduced = network.cost(e) + self.potential[v] - self.potential[to];
                let next = dist + reduced;
                if next < self.dist[to] {
                    self.dist[to] = next;
                    self.prev_edge[to] = e;
                    heap.push(Reverse(State { dist: next, v: to }));
                }
            }
        }
        self.dist[t] < INF
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::network::NodeRole;

    /// Bipartite assignment: workers × jobs, unit capacities.
    fn assignment(costs: &[[i64; 3]]) -> (FlowNetwork, NodeId, NodeId, Vec<EdgeId>) {
        let rows = costs.len();
        let mut net = FlowNetwork::new();
        let s = net.add_node(NodeRole::Source, 3);
        let left: Vec<NodeId> = (0..rows).map(|i| net.add_node(NodeRole::Reviewer(i), 0)).collect();
        let right: Vec<NodeId> = (0..3).map(|j| net.add_node(NodeRole::Paper(j), 0)).collect();
        let t = net.add_node(NodeRole::Sink, -3);
        for &l in &left {
            net.add_edge(s, l, 1, 0);
        }
        let mut pairs = Vec::new();
        for (i, row) in costs.iter().enumerate() {
            for (j, &c) in row.iter().enumerate() {
                pairs.push(net.add_edge(left[i], right[j], 1, c));
            }
        }
        for &r in &right {
            net.add_edge(r, t, 1, 0);
        }
        (net, s, t, pairs)
    }

    #[test]
    fn test_assignment_optimum() {
        let (mut net, s, t, pairs) = assignment(&[[4, 1, 3], [2, 0, 5], [3, 2, 2]]);
        let out = MinCostFlow::new().solve(&mut net, s, t, 3).unwrap();
        assert!(out.solved);
        assert_eq!(out.flow, 3);
        // 1 + 2 + 2
        assert_eq!(out.cost, 5);
        let used: i64 = pairs.iter().map(|&e| net.flow(e)).sum();
        assert_eq!(used, 3);
    }

    #[test]
    fn test_negative_costs() {
        let (mut net, s, t, _) = assignment(&[[-4, -1, -3], [-2, 0, -5], [-3, -2, -2]]);
        let out = MinCostFlow::new().solve(&mut net, s, t, 3).unwrap();
        assert!(out.solved);
        // -4 - 5 - 2
        assert_eq!(out.cost, -11);
    }

    #[test]
    fn test_insufficient_capacity() {
        let (mut net, s, t, _) = assignment(&[[1, 1, 1], [1, 1, 1], [1, 1, 1]]);
        let out = MinCostFlow::new().solve(&mut net, s, t, 4).unwrap();
        assert!(!out.solved);
        assert_eq!(out.flow, 3);
    }

    #[test]
    fn test_solve_max() {
        let mut net = FlowNetwork::new();
        let s = net.add_node(NodeRole::Source, 0);
        let a = net.add_node(NodeRole::Reviewer(0), 0);
        let t = net.add_node(NodeRole::Sink, 0);
        net.add_edge(s, a, 5, 0);
        net.add_edge(a, t, 2, -3);
        net.add_edge(a, t, 2, -1);
        let out = MinCostFlow::new().solve_max(&mut net, s, t).unwrap();
        assert_eq!(out.flow, 4);
        assert_eq!(out.cost, -8);
    }

    #[test]
    fn test_negative_cycle_reported() {
        let mut net = FlowNetwork::new();
        let s = net.add_node(NodeRole::Source, 0);
        let a = net.add_node(NodeRole::Reviewer(0), 0);
        let b = net.add_node(NodeRole::Paper(0), 0);
        let t = net.add_node(NodeRole::Sink, 0);
        net.add_edge(s, a, 1, 0);
        net.add_edge(a, b, 1, -2);
        net.add_edge(b, a, 1, -2);
        net.add_edge(b, t, 1, 0);
        let err = MinCostFlow::new().solve(&mut net, s, t, 1).unwrap_err();
        assert!(matches!(err, MatchError::Solver(_)));
    }
}
