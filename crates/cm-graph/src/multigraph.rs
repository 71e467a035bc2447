use std::collections::BTreeMap;

use cm_core::errors::CmError;
use cm_core::paths::unknown_vertex;
use cm_core::{Graph, VertexId};

/// Undirected edge stored with its endpoints in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    low: VertexId,
    high: VertexId,
}

impl Edge {
    /// Creates an edge between `u` and `v`, ordering the endpoints.
    pub fn new(u: VertexId, v: VertexId) -> Self {
        if u <= v {
            Self { low: u, high: v }
        } else {
            Self { low: v, high: u }
        }
    }

    /// Returns the endpoints with the smaller identifier first.
    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.low, self.high)
    }

    /// Returns whether both endpoints are the same vertex.
    pub fn is_self_loop(&self) -> bool {
        self.low == self.high
    }
}

/// Adjacency-list multigraph realizing a configuration-model draw.
///
/// Parallel edges and self-loops are stored as they are inserted. A self-loop
/// on `v` lists `v` twice in the neighbour multiset of `v`.
#[derive(Debug, Clone, Default)]
pub struct MultiGraph {
    adjacency: Vec<Vec<VertexId>>,
    edges: Vec<Edge>,
}

impl MultiGraph {
    /// Creates an empty multigraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a multigraph with `count` isolated vertices `0..count`.
    pub fn with_vertices(count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); count],
            edges: Vec::new(),
        }
    }

    /// Returns the edge list in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns every distinct edge with its multiplicity.
    pub fn edge_multiset(&self) -> BTreeMap<Edge, usize> {
        let mut multiset = BTreeMap::new();
        for edge in &self.edges {
            *multiset.entry(*edge).or_insert(0) += 1;
        }
        multiset
    }

    /// Returns the number of self-loops.
    pub fn self_loop_count(&self) -> usize {
        self.edges.iter().filter(|edge| edge.is_self_loop()).count()
    }

    /// Returns the number of edges that duplicate an earlier edge between the same pair.
    pub fn parallel_edge_count(&self) -> usize {
        self.edge_multiset()
            .values()
            .map(|multiplicity| multiplicity - 1)
            .sum()
    }

    /// Returns the degree of every vertex, indexed by vertex position.
    pub fn degrees(&self) -> Vec<usize> {
        self.adjacency.iter().map(Vec::len).collect()
    }

    fn slot_mut(&mut self, vertex: VertexId) -> Result<&mut Vec<VertexId>, CmError> {
        self.adjacency
            .get_mut(vertex.index())
            .ok_or_else(|| unknown_vertex(vertex))
    }
}

impl Graph for MultiGraph {
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn vertices(&self) -> Box<dyn ExactSizeIterator<Item = VertexId> + '_> {
        Box::new((0..self.adjacency.len()).map(VertexId::from_index))
    }

    fn neighbors(&self, vertex: VertexId) -> Result<&[VertexId], CmError> {
        self.adjacency
            .get(vertex.index())
            .map(Vec::as_slice)
            .ok_or_else(|| unknown_vertex(vertex))
    }

    fn add_vertex(&mut self) -> Result<VertexId, CmError> {
        let id = VertexId::from_index(self.adjacency.len());
        self.adjacency.push(Vec::new());
        Ok(id)
    }

    fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), CmError> {
        // Check both endpoints before touching either list.
        self.neighbors(u)?;
        self.neighbors(v)?;
        self.slot_mut(u)?.push(v);
        self.slot_mut(v)?.push(u);
        self.edges.push(Edge::new(u, v));
        Ok(())
    }
}
