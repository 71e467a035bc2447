//! Structured logging for the cm-sim binary.
//!
//! Library crates only emit `tracing` events; this module installs the one
//! subscriber that renders them. Output always goes to stderr because the
//! commands print their JSON on stdout.

use std::env;
use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Selects `human` or `json` rendering.
pub const FORMAT_VAR: &str = "CM_LOG_FORMAT";
/// Level used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "info";

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Failure to set up logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `CM_LOG_FORMAT` held bytes that are not UTF-8.
    #[error("{var} is not valid UTF-8")]
    NotUnicode {
        /// Offending variable.
        var: &'static str,
    },
    /// `CM_LOG_FORMAT` named a format other than `human` or `json`.
    #[error("{var}={value} is not a log format (use human or json)")]
    UnknownFormat {
        /// Offending variable.
        var: &'static str,
        /// Value as given, trimmed and lowercased.
        value: String,
    },
    /// Another global subscriber won the race.
    #[error("tracing subscriber already installed: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Rendering of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact text.
    #[default]
    Human,
    /// One JSON object per event, with the current span attached.
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Result<Self, LoggingError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(LogFormat::Human),
            "json" => Ok(LogFormat::Json),
            other => Err(LoggingError::UnknownFormat {
                var: FORMAT_VAR,
                value: other.to_owned(),
            }),
        }
    }
}

/// Logging settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Line rendering.
    pub format: LogFormat,
    /// `EnvFilter` directive, e.g. `info` or `cm_graph=debug`.
    pub directive: String,
}

impl LogSettings {
    /// Reads `CM_LOG_FORMAT` and `RUST_LOG`.
    pub fn from_env() -> Result<Self, LoggingError> {
        let format = match env::var(FORMAT_VAR) {
            Ok(raw) => Some(raw),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(LoggingError::NotUnicode { var: FORMAT_VAR })
            }
        };
        let directive = env::var(EnvFilter::DEFAULT_ENV).ok();
        Self::resolve(format.as_deref(), directive.as_deref())
    }

    /// Builds settings from raw variable values; `None` means unset.
    pub fn resolve(format: Option<&str>, directive: Option<&str>) -> Result<Self, LoggingError> {
        let format = format.map(LogFormat::parse).transpose()?.unwrap_or_default();
        let directive = directive
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .unwrap_or(DEFAULT_DIRECTIVE)
            .to_owned();
        Ok(Self { format, directive })
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
    }
}

/// Installs the global subscriber; later calls are no-ops.
///
/// A subscriber installed by someone else is reported on stderr and kept.
pub fn init_logging() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }
    let settings = LogSettings::from_env()?;
    if let Err(err) = install(&settings) {
        eprintln!("cm-sim: {err}");
    }
    let _ = INSTALLED.set(());
    Ok(())
}

fn install(settings: &LogSettings) -> Result<(), LoggingError> {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE);
    let layer = match settings.format {
        LogFormat::Human => layer.boxed(),
        LogFormat::Json => layer.json().with_current_span(true).boxed(),
    };
    tracing_subscriber::registry()
        .with(settings.filter())
        .with(layer)
        .try_init()?;
    Ok(())
}
