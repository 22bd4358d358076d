//! Arena-backed flow network.
//!
//! Edges live in one contiguous `Vec` in forward-star layout: every forward
//! edge at an even index is followed by its residual twin, and `head[v]`
//! points at the most recently added edge leaving `v`. Removing edges from
//! the tail restores the previous adjacency exactly, which lets a caller
//! keep an immutable base network and re-grow only the tail per trial.

/// Node index.
pub type NodeId = usize;
/// Edge index. Forward edges are even, their residual twins odd.
pub type EdgeId = usize;

const NIL: EdgeId = usize::MAX;

/// Role of a node in the assignment network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Source,
    /// Receives a reviewer's guaranteed-minimum load.
    Free(usize),
    /// Receives a reviewer's load above the minimum.
    Overflow(usize),
    Reviewer(usize),
    Paper(usize),
    Sink,
}

/// A network node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    /// Positive at the source, negative at the sink, zero elsewhere.
    pub supply: i64,
    pub role: NodeRole,
}

#[derive(Debug, Clone)]
struct Edge {
    from: NodeId,
    to: NodeId,
    /// Residual capacity.
    capacity: i64,
    cost: i64,
    /// Next edge leaving `from`.
    next: EdgeId,
}

/// Directed network with integral capacities and costs.
#[derive(Debug, Clone, Default)]
pub struct FlowNetwork {
    nodes: Vec<Node>,
    head: Vec<EdgeId>,
    edges: Vec<Edge>,
}

impl FlowNetwork {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty network with room for the given sizes.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            head: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges * 2),
        }
    }

    /// Adds a node and returns its id.
    pub fn add_node(&mut self, role: NodeRole, supply: i64) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node { id, supply, role });
        self.head.push(NIL);
        id
    }

    /// Adds an edge and its residual twin. Returns the forward edge id.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, capacity: i64, cost: i64) -> EdgeId {
        let forward = self.edges.len();
        self.edges.push(Edge {
            from,
            to,
            capacity,
            cost,
            next: self.head[from],
        });
        self.head[from] = forward;

        self.edges.push(Edge {
            from: to,
            to: from,
            capacity: 0,
            cost: -cost,
            next: self.head[to],
        });
        self.head[to] = forward + 1;
        forward
    }

    /// Drops every edge added after the first `len` entries.
    ///
    /// `len` must be a value previously returned by [`edge_len`](Self::edge_len).
    pub fn truncate_edges(&mut self, len: usize) {
        debug_assert!(len % 2 == 0);
        while self.edges.len() > len {
            if let Some(edge) = self.edges.pop() {
                self.head[edge.from] = edge.next;
            }
        }
    }

    /// Returns every unit of flow to its forward edge.
    pub fn reset_flows(&mut self) {
        for pair in self.edges.chunks_exact_mut(2) {
            let (forward, residual) = pair.split_at_mut(1);
            forward[0].capacity += residual[0].capacity;
            residual[0].capacity = 0;
        }
    }

    /// Number of edge slots (forward and residual).
    pub fn edge_len(&self) -> usize {
        self.edges.len()
    }

    /// Number of forward edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Flow carried by a forward edge.
    #[inline]
    pub fn flow(&self, edge: EdgeId) -> i64 {
        self.edges[edge ^ 1].capacity
    }

    /// Remaining capacity of an edge slot.
    #[inline]
    pub fn residual(&self, edge: EdgeId) -> i64 {
        self.edges[edge].capacity
    }

    /// Cost of an edge slot.
    #[inline]
    pub fn cost(&self, edge: EdgeId) -> i64 {
        self.edges[edge].cost
    }

    /// Head node of an edge slot.
    #[inline]
    pub fn target(&self, edge: EdgeId) -> NodeId {
        self.edges[edge].to
    }

    /// Tail node of an edge slot.
    #[inline]
    pub fn origin(&self, edge: EdgeId) -> NodeId {
        self.edges[edge].from
    }

    /// Moves `amount` units along an edge slot.
    #[inline]
    pub fn push(&mut self, edge: EdgeId, amount: i64) {
        self.edges[edge].capacity -= amount;
        self.edges[edge ^ 1].capacity += amount;
    }

    /// Edge slots leaving `v`, newest first.
    pub fn out_edges(&self, v: NodeId) -> OutEdges<'_> {
        OutEdges {
            network: self,
            current: self.head[v],
        }
    }
}

/// Iterator over the edge slots leaving a node.
pub struct OutEdges<'a> {
    network: &'a FlowNetwork,
    current: EdgeId,
}

impl Iterator for OutEdges<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        if self.current == NIL {
            return None;
        }
        let id = self.current;
        self.current = self.network.edges[id].next;
        Some(id)
    }
}
