//! Structured logging foundation for dta-core.
//!
//! Provides dual-mode logging:
//! - Human-readable console output for interactive use
//! - Machine-parseable JSONL for agent workflows
//!
//! # Usage
//!
//! ```ignore
//! use dta_core::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_env(None, None);
//! init_logging(&config);
//! ```
//!
//! # Design Notes
//!
//! - stdout is reserved for command payloads (JSON/MD output)
//! - stderr receives all log output (human or JSONL)
//! - Events use the stable targets in [`event_names`]

pub mod config;
pub mod events;

pub use config::{LogConfig, LogFormat, LogLevel};
pub use events::event_names;

use std::io::IsTerminal;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Build the level filter for a config.
///
/// Raw `RUST_LOG` directives are used only when [`LogConfig`] kept them;
/// otherwise the resolved level applies to every target. The process
/// environment is never consulted here.
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    match &config.directives {
        Some(directives) => EnvFilter::builder()
            .with_default_directive(LevelFilter::from(config.level).into())
            .parse_lossy(directives),
        None => EnvFilter::new(config.level.to_string()),
    }
}

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs. A second call
/// is a no-op (the global subscriber is already set).
pub fn init_logging(config: &LogConfig) {
    let filter = build_filter(config);

    let result = match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_span_list(false)
                .with_target(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .try_init()
        }
    };

    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
}

/// Generate a unique run ID for this invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    // Shorten to first 12 hex chars for readability
    format!("run-{}", &uuid[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_shape() {
        let id = generate_run_id();
        assert!(id.starts_with("run-"));
        assert_eq!(id.len(), 16);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(generate_run_id(), generate_run_id());
    }

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn cli_level_beats_rust_log_in_filter() {
        let config = LogConfig::from_lookup(lookup(&[("RUST_LOG", "error")]), Some(LogLevel::Trace), None);
        assert_eq!(build_filter(&config).max_level_hint(), Some(LevelFilter::TRACE));

        let quiet = LogConfig::from_lookup(lookup(&[("RUST_LOG", "trace")]), Some(LogLevel::Error), None);
        assert_eq!(build_filter(&quiet).max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn dta_log_beats_rust_log_in_filter() {
        let config = LogConfig::from_lookup(
            lookup(&[("DTA_LOG", "debug"), ("RUST_LOG", "error")]),
            None,
            None,
        );
        assert_eq!(build_filter(&config).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn rust_log_directives_apply_when_alone() {
        let config = LogConfig::from_lookup(lookup(&[("RUST_LOG", "evaluate=trace")]), None, None);
        assert_eq!(build_filter(&config).max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn default_filter_is_warn() {
        let config = LogConfig::from_lookup(lookup(&[]), None, None);
        assert_eq!(build_filter(&config).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn init_twice_does_not_panic() {
        let config = LogConfig::default().with_level(LogLevel::Off);
        init_logging(&config);
        init_logging(&config);
    }
}
