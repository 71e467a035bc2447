#![deny(missing_docs)]

//! Configuration-model multigraphs: degree sequence validation, random stub
//! matching and the degree and distance statistics of the realized graph.

mod builder;
mod distance;
mod distribution;
mod hash;
mod multigraph;
mod power_law;
mod sequence;

pub use builder::{build, BuildOutcome, BuildSummary};
pub use distance::{
    typical_distance_distribution, typical_distance_report, DistanceReport, DistanceSampling,
};
pub use distribution::{
    degree_distribution, degree_distribution_tail, friend_degree_distribution,
    friend_degree_distribution_tail, size_biased_degree_distribution,
    size_biased_degree_distribution_tail, Pmf, Shape, ShapedDistribution, TailDistribution,
    NORMALIZATION_TOLERANCE,
};
pub use hash::canonical_hash;
pub use multigraph::{Edge, MultiGraph};
pub use power_law::power_law_sequence;
pub use sequence::{validate, DegreeSequence};
