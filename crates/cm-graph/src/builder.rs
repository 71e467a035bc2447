use std::collections::BTreeMap;

use cm_core::errors::{codes, CmError, ErrorInfo};
use cm_core::{Graph, RandomSource, VertexId};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, trace};

use crate::multigraph::MultiGraph;
use crate::sequence::DegreeSequence;

/// Structural counts describing a realized configuration-model draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSummary {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of edges; always half the stub count.
    pub edges: usize,
    /// Number of half-edges paired during the build.
    pub stubs: usize,
    /// Number of self-loops.
    pub self_loops: usize,
    /// Number of edges duplicating an earlier edge between the same pair.
    pub parallel_edges: usize,
}

impl BuildSummary {
    /// Summarizes an already built graph.
    pub fn of(graph: &MultiGraph) -> Self {
        Self {
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            stubs: graph.degrees().iter().sum(),
            self_loops: graph.self_loop_count(),
            parallel_edges: graph.parallel_edge_count(),
        }
    }
}

/// Result of a configuration-model build.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// The realized multigraph.
    pub graph: MultiGraph,
    /// The permuted degree sequence; vertex `i` was assigned `assigned[i]` stubs.
    pub assigned: Vec<usize>,
    /// Structural counts of `graph`.
    pub summary: BuildSummary,
}

/// Realizes `sequence` as a multigraph by random stub matching.
///
/// The sequence is permuted uniformly before vertex `i` is given degree
/// `assigned[i]`. Vertices are then closed in ascending id order, each
/// pairing its remaining stubs with partners drawn uniformly from the other
/// vertices that still have stubs. When no other vertex remains, the stubs
/// left on the current vertex are closed with self-loops.
pub fn build<R: RandomSource + ?Sized>(
    sequence: DegreeSequence,
    rng: &mut R,
) -> Result<BuildOutcome, CmError> {
    let mut assigned = sequence.into_inner();
    rng.shuffle(&mut assigned);
    let graph = match_stubs(&assigned, rng)?;
    let summary = BuildSummary::of(&graph);
    debug!(
        vertices = summary.vertices,
        edges = summary.edges,
        self_loops = summary.self_loops,
        parallel_edges = summary.parallel_edges,
        "configuration model built"
    );
    Ok(BuildOutcome {
        graph,
        assigned,
        summary,
    })
}

/// Runs the matching loop over raw per-vertex stub counts.
///
/// Callers outside this module go through [`build`], which only accepts
/// validated sequences; raw counts with an odd sum end in `parity-skew`.
pub(crate) fn match_stubs<R: RandomSource + ?Sized>(
    counts: &[usize],
    rng: &mut R,
) -> Result<MultiGraph, CmError> {
    let stubs = counts
        .iter()
        .fold(0usize, |total, &count| total.saturating_add(count));
    let span = debug_span!("match_stubs", vertices = counts.len(), stubs);
    let _guard = span.enter();

    let mut graph = MultiGraph::with_vertices(counts.len());
    let mut ledger = StubLedger::new(counts);
    while let Some(vertex) = ledger.first_active() {
        while ledger.is_active(vertex) {
            match ledger.random_partner(rng) {
                None => {
                    trace!(
                        vertex = vertex.as_raw(),
                        remaining = ledger.remaining(vertex),
                        "no partner left, closing with a self-loop"
                    );
                    ledger.take(vertex, 2)?;
                    graph.add_edge(vertex, vertex)?;
                }
                Some(partner) => {
                    ledger.take(vertex, 1)?;
                    ledger.take(partner, 1)?;
                    graph.add_edge(vertex, partner)?;
                }
            }
        }
    }
    Ok(graph)
}

/// Unmatched half-edge counts for the vertices that still have stubs.
struct StubLedger {
    remaining: BTreeMap<VertexId, usize>,
    active: Vec<VertexId>,
}

impl StubLedger {
    fn new(counts: &[usize]) -> Self {
        let remaining: BTreeMap<VertexId, usize> = counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(index, &count)| (VertexId::from_index(index), count))
            .collect();
        let active = remaining.keys().copied().collect();
        Self { remaining, active }
    }

    fn first_active(&self) -> Option<VertexId> {
        self.active.first().copied()
    }

    fn is_active(&self, vertex: VertexId) -> bool {
        self.remaining.contains_key(&vertex)
    }

    fn remaining(&self, vertex: VertexId) -> usize {
        self.remaining.get(&vertex).copied().unwrap_or(0)
    }

    /// Draws a partner for the vertex being closed, uniformly among the other
    /// active vertices.
    ///
    /// `active` stays sorted, so the vertex being closed is always the first
    /// entry until it retires.
    fn random_partner<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<VertexId> {
        let others = self.active.get(1..)?;
        rng.choose_uniform(others).copied()
    }

    /// Removes `amount` stubs from `vertex`, retiring it once none remain.
    fn take(&mut self, vertex: VertexId, amount: usize) -> Result<(), CmError> {
        let current = self.remaining(vertex);
        let Some(left) = current.checked_sub(amount) else {
            return Err(CmError::Build(
                ErrorInfo::new(codes::PARITY_SKEW, "half-edge count would drop below zero")
                    .with_context("vertex", vertex.as_raw())
                    .with_context("remaining", current)
                    .with_context("requested", amount)
                    .with_hint("validate the degree sequence before building"),
            ));
        };
        if left == 0 {
            self.remaining.remove(&vertex);
            if let Ok(position) = self.active.binary_search(&vertex) {
                self.active.remove(position);
            }
        } else {
            self.remaining.insert(vertex, left);
        }
        Ok(())
    }
}
