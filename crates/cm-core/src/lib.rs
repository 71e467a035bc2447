#![deny(missing_docs)]
#![doc = "Core contracts and data types for the configuration-model engine."]

use std::collections::BTreeMap;
use std::iter::ExactSizeIterator;

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod paths;
pub mod provenance;
pub mod rng;

pub use errors::{codes, CmError, ErrorInfo};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RandomSource, RngHandle};

/// Identifier for a vertex within a [`Graph`].
///
/// Vertices of a graph with `n` vertices are numbered `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(u64);

impl VertexId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }

    /// Creates an identifier from a position in adjacency arrays.
    pub fn from_index(index: usize) -> Self {
        Self(index as u64)
    }

    /// Returns the position of the vertex within adjacency arrays.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// One shortest path per connected ordered pair, keyed by source then target.
pub type ShortestPaths = BTreeMap<VertexId, BTreeMap<VertexId, Vec<VertexId>>>;

/// Structural contract for the undirected multigraphs produced by the builder.
///
/// Implementations must keep parallel edges and self-loops. A self-loop on
/// `v` lists `v` twice in [`Graph::neighbors`], so `degree(v)` always equals
/// the length of the neighbour multiset.
pub trait Graph: Send + Sync {
    /// Returns the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Returns the number of edges, counting parallel edges and self-loops individually.
    fn edge_count(&self) -> usize;

    /// Returns an iterator over all vertex identifiers in ascending order.
    fn vertices(&self) -> Box<dyn ExactSizeIterator<Item = VertexId> + '_>;

    /// Returns the neighbour multiset of `vertex`.
    fn neighbors(&self, vertex: VertexId) -> Result<&[VertexId], CmError>;

    /// Adds a new isolated vertex.
    fn add_vertex(&mut self) -> Result<VertexId, CmError>;

    /// Adds an undirected edge between `u` and `v`, keeping multiplicity.
    fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), CmError>;

    /// Returns the number of edge endpoints at `vertex`.
    fn degree(&self, vertex: VertexId) -> Result<usize, CmError> {
        Ok(self.neighbors(vertex)?.len())
    }

    /// Returns the hop count from `source` to every vertex reachable from it.
    fn distances_from(&self, source: VertexId) -> Result<BTreeMap<VertexId, usize>, CmError> {
        paths::bfs_distances(self, source)
    }

    /// Returns one shortest path from `source` to `target`, or a `no-path` graph error.
    fn shortest_path(&self, source: VertexId, target: VertexId) -> Result<Vec<VertexId>, CmError> {
        paths::bfs_path(self, source, target)
    }

    /// Returns one shortest path for every connected ordered pair.
    fn all_shortest_paths(&self) -> Result<ShortestPaths, CmError> {
        paths::bfs_all_paths(self)
    }
}
