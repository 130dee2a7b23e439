//! # Structured Logging
//!
//! Sets up the `tracing` subscriber for the host binary. Two concerns share
//! the pipeline: ordinary diagnostics, and the contract's `EVENT_JSON:`
//! records on the `lumen_token::events` target. Keeping both on stderr (in
//! pretty mode) or as JSON lines (in production mode) lets an indexer tail
//! one stream and filter by target.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output for local runs.
    Pretty,
    /// JSON lines for log aggregation.
    Json,
}

impl LogFormat {
    /// Parses a format string: "json" or "pretty", case-insensitive.
    /// Anything unrecognized falls back to `Pretty`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Initializes the global subscriber. Call once, early in `main()`.
///
/// `RUST_LOG` overrides `default_level` when set; the default keeps the
/// contract's event target at info so event lines always come through:
///
/// ```text
/// RUST_LOG=lumen_node=debug,lumen_token=debug
/// ```
pub fn init(default_level: &str, format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}
