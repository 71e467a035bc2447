use std::collections::BTreeMap;

use cm_core::errors::{codes, CmError, ErrorInfo};
use cm_core::{Graph, RandomSource, VertexId};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

use crate::distribution::Pmf;

/// Rejected draws after which a sampled run logs that the graph looks fragmented.
const REDRAW_WARNING: u64 = 10_000;

/// How vertex pairs are chosen for the typical-distance distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum DistanceSampling {
    /// Every connected ordered pair, including each vertex with itself.
    #[default]
    Exhaustive,
    /// Uniformly drawn ordered pairs until `pairs` connected ones are found.
    Sampled {
        /// Number of path lengths to accumulate.
        pairs: usize,
        /// Maximum number of draws; `None` keeps drawing until `pairs` is reached.
        #[serde(default)]
        max_draws: Option<usize>,
    },
}

/// Typical-distance distribution together with its sampling bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceReport {
    /// Distribution of hop counts.
    pub pmf: Pmf,
    /// Number of path lengths the distribution was built from.
    pub lengths: u64,
    /// Number of ordered pairs examined.
    pub draws: u64,
    /// Number of examined pairs that had no connecting path.
    pub disconnected: u64,
}

/// Distribution of shortest-path hop counts between connected vertex pairs.
pub fn typical_distance_distribution<G, R>(
    graph: &G,
    sampling: DistanceSampling,
    rng: &mut R,
) -> Result<Pmf, CmError>
where
    G: Graph + ?Sized,
    R: RandomSource + ?Sized,
{
    Ok(typical_distance_report(graph, sampling, rng)?.pmf)
}

/// Like [`typical_distance_distribution`], keeping the draw counters.
pub fn typical_distance_report<G, R>(
    graph: &G,
    sampling: DistanceSampling,
    rng: &mut R,
) -> Result<DistanceReport, CmError>
where
    G: Graph + ?Sized,
    R: RandomSource + ?Sized,
{
    if graph.vertex_count() == 0 {
        return Err(CmError::Graph(ErrorInfo::new(
            codes::EMPTY_GRAPH,
            "typical distance needs at least one vertex",
        )));
    }
    let span = debug_span!("typical_distance", vertices = graph.vertex_count(), ?sampling);
    let _guard = span.enter();

    let tally = match sampling {
        DistanceSampling::Exhaustive => exhaustive_lengths(graph)?,
        DistanceSampling::Sampled { pairs, max_draws } => {
            sampled_lengths(graph, pairs, max_draws, rng)?
        }
    };
    debug!(
        lengths = tally.lengths,
        draws = tally.draws,
        disconnected = tally.disconnected,
        "typical distance tallied"
    );
    Ok(DistanceReport {
        pmf: Pmf::from_counts(&tally.counts)?,
        lengths: tally.lengths,
        draws: tally.draws,
        disconnected: tally.disconnected,
    })
}

#[derive(Default)]
struct Tally {
    counts: BTreeMap<usize, u64>,
    lengths: u64,
    draws: u64,
    disconnected: u64,
}

impl Tally {
    fn record(&mut self, hops: usize) {
        *self.counts.entry(hops).or_insert(0) += 1;
        self.lengths += 1;
    }
}

fn exhaustive_lengths<G: Graph + ?Sized>(graph: &G) -> Result<Tally, CmError> {
    let n = graph.vertex_count() as u64;
    let mut tally = Tally::default();
    for source in graph.vertices() {
        let reached = graph.distances_from(source)?;
        for hops in reached.values() {
            tally.record(*hops);
        }
        tally.draws += n;
        tally.disconnected += n - reached.len() as u64;
    }
    Ok(tally)
}

fn sampled_lengths<G, R>(
    graph: &G,
    pairs: usize,
    max_draws: Option<usize>,
    rng: &mut R,
) -> Result<Tally, CmError>
where
    G: Graph + ?Sized,
    R: RandomSource + ?Sized,
{
    if pairs == 0 {
        return Err(CmError::Distance(ErrorInfo::new(
            codes::INVALID_SAMPLE_SIZE,
            "sampled typical distance needs at least one pair",
        )));
    }
    let n = graph.vertex_count();
    let mut tally = Tally::default();
    while tally.lengths < pairs as u64 {
        if let Some(cap) = max_draws {
            if tally.draws >= cap as u64 {
                return Err(CmError::Distance(
                    ErrorInfo::new(
                        codes::SAMPLING_EXHAUSTED,
                        "draw budget spent before enough connected pairs were found",
                    )
                    .with_context("max_draws", cap)
                    .with_context("found", tally.lengths)
                    .with_context("pairs", pairs)
                    .with_hint("raise max_draws or use the exhaustive mode"),
                ));
            }
        }
        let (source, target) = draw_pair(n, rng)?;
        tally.draws += 1;
        match graph.shortest_path(source, target) {
            Ok(path) => tally.record(path.len() - 1),
            Err(err) if err.code() == codes::NO_PATH => {
                tally.disconnected += 1;
                if tally.disconnected == REDRAW_WARNING {
                    warn!(
                        disconnected = tally.disconnected,
                        found = tally.lengths,
                        pairs,
                        "most drawn pairs are disconnected; sampling may not finish"
                    );
                }
            }
            Err(err) => return Err(err),
        }
    }
    Ok(tally)
}

fn draw_pair<R: RandomSource + ?Sized>(
    n: usize,
    rng: &mut R,
) -> Result<(VertexId, VertexId), CmError> {
    let empty = || {
        CmError::Graph(ErrorInfo::new(
            codes::EMPTY_GRAPH,
            "cannot draw a vertex from an empty graph",
        ))
    };
    let source = rng.uniform_index(n).ok_or_else(empty)?;
    let target = rng.uniform_index(n).ok_or_else(empty)?;
    Ok((VertexId::from_index(source), VertexId::from_index(target)))
}
