use std::collections::BTreeMap;

use cm_core::errors::CmError;
use cm_core::{RngHandle, RunProvenance, SchemaVersion};
use cm_graph::{
    build, canonical_hash, degree_distribution, friend_degree_distribution,
    size_biased_degree_distribution, typical_distance_report, BuildSummary, DistanceReport,
    ShapedDistribution,
};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use crate::config::RunConfig;

/// Substream driving the stub shuffle and partner draws.
pub const BUILD_SUBSTREAM: u64 = 0;
/// Substream driving sampled typical-distance pairs.
pub const DISTANCE_SUBSTREAM: u64 = 1;

/// Everything a single run measures about its realized multigraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Seed, canonical graph hash and tool versions.
    pub provenance: RunProvenance,
    /// Vertex, edge, self-loop and parallel-edge counts of the realized graph.
    pub summary: BuildSummary,
    /// Degree of a uniformly chosen vertex.
    pub degree: ShapedDistribution,
    /// Degree of the vertex owning a uniformly chosen half-edge.
    pub size_biased: ShapedDistribution,
    /// Degree of a uniformly chosen neighbour of a uniformly chosen vertex.
    pub friend: ShapedDistribution,
    /// Hop counts between connected pairs, with draw bookkeeping.
    pub typical_distance: DistanceReport,
}

/// Builds the multigraph described by `config` and measures it.
pub fn execute(config: &RunConfig) -> Result<RunReport, CmError> {
    let seed = config.seed_policy.master_seed;
    let span = info_span!("run", seed);
    let _guard = span.enter();

    let sequence = config.sequence.resolve()?;
    info!(
        vertices = sequence.len(),
        stubs = sequence.stub_count(),
        "degree sequence ready"
    );

    let mut build_rng = RngHandle::for_substream(seed, BUILD_SUBSTREAM);
    let outcome = build(sequence, &mut build_rng)?;
    let graph = &outcome.graph;
    let graph_hash = canonical_hash(graph)?;
    info!(
        edges = outcome.summary.edges,
        self_loops = outcome.summary.self_loops,
        parallel_edges = outcome.summary.parallel_edges,
        %graph_hash,
        "multigraph realized"
    );

    let shape = config.distributions.shape;
    let degree = shape.apply(degree_distribution(graph)?);
    let size_biased = shape.apply(size_biased_degree_distribution(graph)?);
    let friend = shape.apply(friend_degree_distribution(graph)?);

    let mut distance_rng = RngHandle::for_substream(seed, DISTANCE_SUBSTREAM);
    let typical_distance = typical_distance_report(graph, config.distance, &mut distance_rng)?;
    info!(
        lengths = typical_distance.lengths,
        disconnected = typical_distance.disconnected,
        "typical distance measured"
    );

    let mut tool_versions = BTreeMap::new();
    tool_versions.insert("cm-sim".to_string(), env!("CARGO_PKG_VERSION").to_string());

    Ok(RunReport {
        provenance: RunProvenance {
            schema_version: SchemaVersion::default(),
            seed,
            graph_hash,
            tool_versions,
        },
        summary: outcome.summary,
        degree,
        size_biased,
        friend,
        typical_distance,
    })
}
