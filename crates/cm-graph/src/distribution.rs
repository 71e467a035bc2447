use std::collections::BTreeMap;

use cm_core::errors::{codes, CmError, ErrorInfo};
use cm_core::Graph;
use serde::{Deserialize, Serialize};

/// Allowed deviation of a probability mass function's total from one.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-3;

/// Probability mass function over non-negative integer outcomes.
///
/// Every constructor checks that the masses are finite, non-negative and sum
/// to one within [`NORMALIZATION_TOLERANCE`]. Deserialization goes through
/// [`Pmf::from_masses`] as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<usize, f64>", into = "BTreeMap<usize, f64>")]
pub struct Pmf {
    masses: BTreeMap<usize, f64>,
}

impl Pmf {
    /// Builds the empirical distribution of the recorded outcome counts.
    pub fn from_counts(counts: &BTreeMap<usize, u64>) -> Result<Self, CmError> {
        let weights = counts
            .iter()
            .map(|(&outcome, &count)| (outcome, count as f64))
            .collect();
        Self::from_weights(weights)
    }

    /// Normalizes non-negative weights into a distribution.
    pub fn from_weights(weights: BTreeMap<usize, f64>) -> Result<Self, CmError> {
        let total: f64 = weights.values().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(normalization_error("weights have no positive finite total", total));
        }
        let masses = weights
            .into_iter()
            .map(|(outcome, weight)| (outcome, weight / total))
            .collect();
        Self::from_masses(masses)
    }

    /// Wraps masses that are already normalized.
    pub fn from_masses(masses: BTreeMap<usize, f64>) -> Result<Self, CmError> {
        if let Some((&outcome, &mass)) = masses
            .iter()
            .find(|(_, mass)| !mass.is_finite() || **mass < 0.0)
        {
            return Err(normalization_error("mass must be finite and non-negative", mass)
                .with_context("outcome", outcome));
        }
        let total: f64 = masses.values().sum();
        if (total - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(normalization_error("masses do not sum to one", total));
        }
        Ok(Self { masses })
    }

    /// Returns `P(X = outcome)`.
    pub fn probability(&self, outcome: usize) -> f64 {
        self.masses.get(&outcome).copied().unwrap_or(0.0)
    }

    /// Returns the outcomes with recorded mass, ascending.
    pub fn support(&self) -> impl Iterator<Item = usize> + '_ {
        self.masses.keys().copied()
    }

    /// Returns the underlying outcome to mass map.
    pub fn masses(&self) -> &BTreeMap<usize, f64> {
        &self.masses
    }

    /// Returns the sum of all masses.
    pub fn total_mass(&self) -> f64 {
        self.masses.values().sum()
    }

    /// Returns the expected outcome.
    pub fn mean(&self) -> f64 {
        self.masses
            .iter()
            .map(|(&outcome, &mass)| outcome as f64 * mass)
            .sum()
    }

    /// Returns the survival form `P(X >= k)` for every `k` in the support.
    pub fn tail(&self) -> TailDistribution {
        let mut survival = BTreeMap::new();
        let mut upper = 0.0;
        for (&outcome, &mass) in self.masses.iter().rev() {
            upper += mass;
            survival.insert(outcome, upper.min(1.0));
        }
        TailDistribution { survival }
    }
}

impl TryFrom<BTreeMap<usize, f64>> for Pmf {
    type Error = CmError;

    fn try_from(masses: BTreeMap<usize, f64>) -> Result<Self, Self::Error> {
        Self::from_masses(masses)
    }
}

impl From<Pmf> for BTreeMap<usize, f64> {
    fn from(pmf: Pmf) -> Self {
        pmf.masses
    }
}

/// Survival function `k -> P(X >= k)` derived from a [`Pmf`].
///
/// Deserialized values must lie in `[0, 1]`, never increase with `k` and
/// start within [`NORMALIZATION_TOLERANCE`] of one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<usize, f64>", into = "BTreeMap<usize, f64>")]
pub struct TailDistribution {
    survival: BTreeMap<usize, f64>,
}

impl TryFrom<BTreeMap<usize, f64>> for TailDistribution {
    type Error = CmError;

    fn try_from(survival: BTreeMap<usize, f64>) -> Result<Self, Self::Error> {
        let mut previous = 1.0;
        for (&outcome, &value) in &survival {
            if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return Err(normalization_error("survival value must lie in [0, 1]", value)
                    .with_context("outcome", outcome));
            }
            if value > previous {
                return Err(normalization_error("survival values must not increase", value)
                    .with_context("outcome", outcome));
            }
            previous = value;
        }
        let head = survival.values().next().copied().unwrap_or(0.0);
        if (head - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(normalization_error("survival must start at one", head));
        }
        Ok(Self { survival })
    }
}

impl From<TailDistribution> for BTreeMap<usize, f64> {
    fn from(tail: TailDistribution) -> Self {
        tail.survival
    }
}

impl TailDistribution {
    /// Returns `P(X >= outcome)` for an outcome in the support, `None` otherwise.
    pub fn at(&self, outcome: usize) -> Option<f64> {
        self.survival.get(&outcome).copied()
    }

    /// Returns the outcome to survival probability map.
    pub fn values(&self) -> &BTreeMap<usize, f64> {
        &self.survival
    }
}

/// Which form of a distribution a caller wants reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    /// `P(X = k)`.
    #[default]
    PointMass,
    /// `P(X >= k)`.
    Tail,
}

/// A distribution in the form selected by a [`Shape`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "values", rename_all = "kebab-case")]
pub enum ShapedDistribution {
    /// Point masses.
    PointMass(Pmf),
    /// Survival probabilities.
    Tail(TailDistribution),
}

impl Shape {
    /// Presents `pmf` in this shape.
    pub fn apply(self, pmf: Pmf) -> ShapedDistribution {
        match self {
            Shape::PointMass => ShapedDistribution::PointMass(pmf),
            Shape::Tail => ShapedDistribution::Tail(pmf.tail()),
        }
    }
}

/// Distribution of `degree(v)` for a uniformly chosen vertex `v`.
pub fn degree_distribution<G: Graph + ?Sized>(graph: &G) -> Result<Pmf, CmError> {
    let mut counts: BTreeMap<usize, u64> = BTreeMap::new();
    for degree in degrees(graph)? {
        *counts.entry(degree).or_insert(0) += 1;
    }
    Pmf::from_counts(&counts)
}

/// Degree distribution seen from a uniformly chosen half-edge.
///
/// `P(k) = k * P(degree = k) / E[degree]`.
pub fn size_biased_degree_distribution<G: Graph + ?Sized>(graph: &G) -> Result<Pmf, CmError> {
    let plain = degree_distribution(graph)?;
    let mean = plain.mean();
    let weights = plain
        .masses()
        .iter()
        .map(|(&degree, &mass)| (degree, degree as f64 * mass / mean))
        .collect();
    Pmf::from_weights(weights)
}

/// Degree of a uniformly chosen neighbour of a uniformly chosen vertex.
///
/// Computed exactly over the realized graph: each vertex carries weight
/// `1/n`, split evenly over the slots of its neighbour multiset. Vertices
/// without neighbours are skipped.
pub fn friend_degree_distribution<G: Graph + ?Sized>(graph: &G) -> Result<Pmf, CmError> {
    let degrees = degrees(graph)?;
    let mut weights: BTreeMap<usize, f64> = BTreeMap::new();
    for vertex in graph.vertices() {
        let neighbours = graph.neighbors(vertex)?;
        if neighbours.is_empty() {
            continue;
        }
        let share = 1.0 / neighbours.len() as f64;
        for neighbour in neighbours {
            *weights.entry(degrees[neighbour.index()]).or_insert(0.0) += share;
        }
    }
    Pmf::from_weights(weights)
}

/// [`degree_distribution`] in survival form.
pub fn degree_distribution_tail<G: Graph + ?Sized>(
    graph: &G,
) -> Result<TailDistribution, CmError> {
    Ok(degree_distribution(graph)?.tail())
}

/// [`size_biased_degree_distribution`] in survival form.
pub fn size_biased_degree_distribution_tail<G: Graph + ?Sized>(
    graph: &G,
) -> Result<TailDistribution, CmError> {
    Ok(size_biased_degree_distribution(graph)?.tail())
}

/// [`friend_degree_distribution`] in survival form.
pub fn friend_degree_distribution_tail<G: Graph + ?Sized>(
    graph: &G,
) -> Result<TailDistribution, CmError> {
    Ok(friend_degree_distribution(graph)?.tail())
}

fn degrees<G: Graph + ?Sized>(graph: &G) -> Result<Vec<usize>, CmError> {
    if graph.vertex_count() == 0 {
        return Err(CmError::Graph(ErrorInfo::new(
            codes::EMPTY_GRAPH,
            "degree statistics need at least one vertex",
        )));
    }
    graph.vertices().map(|vertex| graph.degree(vertex)).collect()
}

fn normalization_error(message: &str, total: f64) -> CmError {
    CmError::Distribution(ErrorInfo::new(codes::NORMALIZATION, message).with_context("total", total))
}
