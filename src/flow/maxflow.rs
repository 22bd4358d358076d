//! Edmonds-Karp maximum flow.
//!
//! Used where only the flow value matters, e.g. to test whether a thinned
//! arc set can still cover every paper. Costs are ignored.
//!
//! # Complexity
//! O(V·E²) in general; with unit-capacity reviewer→paper arcs the number
//! of augmentations is bounded by the total demand.

use std::collections::VecDeque;

use super::network::{EdgeId, FlowNetwork, NodeId};

/// Breadth-first augmenting-path max-flow solver.
#[derive(Debug, Clone, Default)]
pub struct EdmondsKarp {
    prev: Vec<EdgeId>,
    visited: Vec<bool>,
}

impl EdmondsKarp {
    /// Creates a solver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes flow from `source` to `sink` until no augmenting path remains
    /// or `limit` units are routed. Returns the amount routed in this call.
    pub fn solve(
        &mut self,
        network: &mut FlowNetwork,
        source: NodeId,
        sink: NodeId,
        limit: Option<i64>,
    ) -> i64 {
        let n = network.node_count();
        self.prev.clear();
        self.prev.resize(n, usize::MAX);
        self.visited.clear();
        self.visited.resize(n, false);

        let limit = limit.unwrap_or(i64::MAX);
        let mut total = 0i64;
        while total < limit {
            self.prev.fill(usize::MAX);
            self.visited.fill(false);

            let mut queue = VecDeque::from([source]);
            self.visited[source] = true;
            while let Some(u) = queue.pop_front() {
                if u == sink {
                    break;
                }
                for e in network.out_edges(u) {
                    let to = network.target(e);
                    if self.visited[to] || network.residual(e) <= 0 {
                        continue;
                    }
                    self.visited[to] = true;
                    self.prev[to] = e;
                    queue.push_back(to);
                }
            }

            if !self.visited[sink] {
                break;
            }

            let mut delta = limit - total;
            let mut v = sink;
            while v != source {
                let e = self.prev[v];
                delta = delta.min(network.residual(e));
                v = network.origin(e);
            }

            let mut v = sink;
            while v != source {
                let e = self.prev[v];
                network.push(e, delta);
                v = network.origin(e);
            }
            total += delta;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::network::NodeRole;

    #[test]
    fn test_classic_max_flow() {
        // CLRS 26.1
        let mut net = FlowNetwork::new();
        let v: Vec<NodeId> = (0..6).map(|i| net.add_node(NodeRole::Reviewer(i), 0)).collect();
        for &(a, b, c) in &[
            (0, 1, 16),
            (0, 2, 13),
            (1, 3, 12),
            (2, 1, 4),
            (2, 4, 14),
            (3, 2, 9),
            (3, 5, 20),
            (4, 3, 7),
            (4, 5, 4),
        ] {
            net.add_edge(v[a], v[b], c, 0);
        }
        assert_eq!(EdmondsKarp::new().solve(&mut net, v[0], v[5], None), 23);
    }

    #[test]
    fn test_limit_stops_early() {
        let mut net = FlowNetwork::new();
        let s = net.add_node(NodeRole::Source, 0);
        let t = net.add_node(NodeRole::Sink, 0);
        let e = net.add_edge(s, t, 10, 0);
        assert_eq!(EdmondsKarp::new().solve(&mut net, s, t, Some(4)), 4);
        assert_eq!(net.flow(e), 4);
    }

    #[test]
    fn test_disconnected() {
        let mut net = FlowNetwork::new();
        let s = net.add_node(NodeRole::Source, 0);
        let t = net.add_node(NodeRole::Sink, 0);
        assert_eq!(EdmondsKarp::new().solve(&mut net, s, t, None), 0);
    }
}
