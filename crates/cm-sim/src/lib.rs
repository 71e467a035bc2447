//! Driver for configuration-model experiments.
//!
//! Reads a YAML [`config::RunConfig`], realizes the multigraph and reports
//! its degree and distance distributions together with run provenance.

pub mod commands;
pub mod config;
pub mod logging;
pub mod report;

pub use config::{load_config, RunConfig};
pub use report::{execute, RunReport};
