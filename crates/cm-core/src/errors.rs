//! Structured error types shared across CM crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable machine readable codes carried by [`ErrorInfo::code`].
pub mod codes {
    /// A degree sequence element is not positive.
    pub const INVALID_DEGREE: &str = "invalid-degree";
    /// The degree sequence sums to an odd number.
    pub const ODD_SUM: &str = "odd-sum";
    /// The degree sequence has no elements.
    pub const EMPTY_SEQUENCE: &str = "empty-sequence";
    /// The total stub count does not fit in a machine word.
    pub const STUB_OVERFLOW: &str = "stub-overflow";
    /// A half-edge count would drop below zero during stub matching.
    pub const PARITY_SKEW: &str = "parity-skew";
    /// No path connects the requested vertices.
    pub const NO_PATH: &str = "no-path";
    /// The referenced vertex is not part of the graph.
    pub const UNKNOWN_VERTEX: &str = "unknown-vertex";
    /// The graph has no vertices to operate on.
    pub const EMPTY_GRAPH: &str = "empty-graph";
    /// A probability mass function does not sum to one.
    pub const NORMALIZATION: &str = "normalization";
    /// A sampled run requested zero pairs.
    pub const INVALID_SAMPLE_SIZE: &str = "invalid-sample-size";
    /// A capped sampled run used its whole draw budget.
    pub const SAMPLING_EXHAUSTED: &str = "sampling-exhausted";
    /// A configuration file could not be read.
    pub const READ_CONFIG: &str = "read-config";
    /// A configuration file could not be parsed.
    pub const PARSE_CONFIG: &str = "parse-config";
    /// A configuration value is out of range.
    pub const INVALID_CONFIG: &str = "invalid-config";
}

/// Structured payload attached to every [`CmError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (vertex ids, sums, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the configuration-model engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum CmError {
    /// Degree sequence validation errors.
    #[error("sequence error: {0}")]
    Sequence(ErrorInfo),
    /// Invariant violations raised while matching stubs.
    #[error("build error: {0}")]
    Build(ErrorInfo),
    /// Graph structure and path query errors.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Probability mass function consistency errors.
    #[error("distribution error: {0}")]
    Distribution(ErrorInfo),
    /// Typical distance sampling errors.
    #[error("distance error: {0}")]
    Distance(ErrorInfo),
    /// Configuration loading and validation errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl CmError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            CmError::Sequence(info)
            | CmError::Build(info)
            | CmError::Graph(info)
            | CmError::Distribution(info)
            | CmError::Distance(info)
            | CmError::Config(info) => info,
        }
    }

    /// Returns the stable code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Adds a context entry to the payload, keeping the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            CmError::Sequence(info) => CmError::Sequence(info.with_context(key, value)),
            CmError::Build(info) => CmError::Build(info.with_context(key, value)),
            CmError::Graph(info) => CmError::Graph(info.with_context(key, value)),
            CmError::Distribution(info) => CmError::Distribution(info.with_context(key, value)),
            CmError::Distance(info) => CmError::Distance(info.with_context(key, value)),
            CmError::Config(info) => CmError::Config(info.with_context(key, value)),
        }
    }
}
