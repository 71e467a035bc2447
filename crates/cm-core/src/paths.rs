//! Breadth-first shortest-path search over [`Graph::neighbors`](crate::Graph::neighbors).

use std::collections::{BTreeMap, VecDeque};

use crate::errors::{codes, CmError, ErrorInfo};
use crate::{Graph, VertexId};

/// Hop counts from `source` to every vertex reachable from it, `source` included.
pub fn bfs_distances<G: Graph + ?Sized>(
    graph: &G,
    source: VertexId,
) -> Result<BTreeMap<VertexId, usize>, CmError> {
    Ok(bfs_parents(graph, source)?.depth)
}

/// Returns one shortest path from `source` to `target`, both endpoints included.
pub fn bfs_path<G: Graph + ?Sized>(
    graph: &G,
    source: VertexId,
    target: VertexId,
) -> Result<Vec<VertexId>, CmError> {
    ensure_vertex(graph, target)?;
    let tree = bfs_parents(graph, source)?;
    tree.path_to(target).ok_or_else(|| no_path(source, target))
}

/// Returns one shortest path between every connected ordered pair.
pub fn bfs_all_paths<G: Graph + ?Sized>(
    graph: &G,
) -> Result<BTreeMap<VertexId, BTreeMap<VertexId, Vec<VertexId>>>, CmError> {
    let mut paths = BTreeMap::new();
    for source in graph.vertices() {
        let tree = bfs_parents(graph, source)?;
        let mut row = BTreeMap::new();
        for target in tree.order.iter().copied() {
            if let Some(path) = tree.path_to(target) {
                row.insert(target, path);
            }
        }
        paths.insert(source, row);
    }
    Ok(paths)
}

/// Builds the error returned when `target` cannot be reached from `source`.
pub fn no_path(source: VertexId, target: VertexId) -> CmError {
    CmError::Graph(
        ErrorInfo::new(codes::NO_PATH, "no path connects the vertices")
            .with_context("source", source.as_raw())
            .with_context("target", target.as_raw()),
    )
}

/// Builds the error returned for a vertex id outside the graph.
pub fn unknown_vertex(vertex: VertexId) -> CmError {
    CmError::Graph(
        ErrorInfo::new(codes::UNKNOWN_VERTEX, "vertex does not exist")
            .with_context("vertex", vertex.as_raw()),
    )
}

struct BfsTree {
    order: Vec<VertexId>,
    parent: BTreeMap<VertexId, VertexId>,
    depth: BTreeMap<VertexId, usize>,
}

impl BfsTree {
    fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        let root = *self.order.first()?;
        let mut path = vec![target];
        let mut current = target;
        while current != root {
            current = *self.parent.get(&current)?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

fn bfs_parents<G: Graph + ?Sized>(graph: &G, source: VertexId) -> Result<BfsTree, CmError> {
    ensure_vertex(graph, source)?;
    let mut order = vec![source];
    let mut parent = BTreeMap::new();
    let mut depth = BTreeMap::from([(source, 0usize)]);
    let mut queue = VecDeque::from([(source, 0usize)]);
    while let Some((current, hops)) = queue.pop_front() {
        for &next in graph.neighbors(current)? {
            if depth.contains_key(&next) {
                continue;
            }
            depth.insert(next, hops + 1);
            parent.insert(next, current);
            order.push(next);
            queue.push_back((next, hops + 1));
        }
    }
    Ok(BfsTree {
        order,
        parent,
        depth,
    })
}

fn ensure_vertex<G: Graph + ?Sized>(graph: &G, vertex: VertexId) -> Result<(), CmError> {
    if vertex.index() < graph.vertex_count() {
        Ok(())
    } else {
        Err(unknown_vertex(vertex))
    }
}
