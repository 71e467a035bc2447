use std::fs;
use std::path::Path;

use cm_core::errors::{codes, CmError, ErrorInfo};
use cm_graph::{power_law_sequence, DegreeSequence, DistanceSampling, Shape};
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters governing a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RunConfig {
    /// Where the degree sequence comes from.
    #[serde(default)]
    pub sequence: SequenceSource,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Presentation of the degree distributions.
    #[serde(default)]
    pub distributions: DistributionConfig,
    /// Pair selection for the typical-distance distribution.
    #[serde(default)]
    pub distance: DistanceSampling,
}

impl RunConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(raw: &str) -> Result<Self, CmError> {
        serde_yaml::from_str(raw).map_err(|err| {
            CmError::Config(ErrorInfo::new(codes::PARSE_CONFIG, err.to_string()))
        })
    }
}

/// Loads a [`RunConfig`] from a YAML file.
pub fn load_config(path: &Path) -> Result<RunConfig, CmError> {
    let raw = fs::read_to_string(path).map_err(|err| {
        CmError::Config(
            ErrorInfo::new(codes::READ_CONFIG, err.to_string())
                .with_context("path", path.display()),
        )
    })?;
    RunConfig::from_yaml_str(&raw).map_err(|err| err.with_context("path", path.display()))
}

/// Source of the degree sequence fed to the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SequenceSource {
    /// Degrees listed verbatim; vertex `i` is assigned `degrees[i]` before shuffling.
    Explicit {
        /// Degree of every vertex.
        degrees: Vec<i64>,
    },
    /// Deterministic power-law sequence.
    PowerLaw {
        /// Number of vertices.
        vertices: usize,
        /// Power-law exponent; must exceed one.
        #[serde(default = "default_tau")]
        tau: f64,
    },
}

fn default_tau() -> f64 {
    3.5
}

fn default_vertices() -> usize {
    1001
}

impl Default for SequenceSource {
    fn default() -> Self {
        SequenceSource::PowerLaw {
            vertices: default_vertices(),
            tau: default_tau(),
        }
    }
}

impl SequenceSource {
    /// Produces the validated degree sequence.
    pub fn resolve(&self) -> Result<DegreeSequence, CmError> {
        match self {
            SequenceSource::Explicit { degrees } => DegreeSequence::from_signed(degrees),
            SequenceSource::PowerLaw { vertices, tau } => power_law_sequence(*vertices, *tau),
        }
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
        }
    }
}

/// Presentation settings for degree distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DistributionConfig {
    /// Point masses or survival probabilities.
    #[serde(default)]
    pub shape: Shape,
}
