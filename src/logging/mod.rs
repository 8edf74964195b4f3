// Logging setup - tracing subscriber for the CLI
//
// Human-readable logs go to stderr so stdout carries only rendered output.
// File logging optionally adds rolling JSON files next to it.
//
// Precedence: RUST_LOG env var > config `logging.level` > "warn"

use crate::config::{LogRotation, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Turn a config level into a filter directive
///
/// A bare level ("debug") applies to this crate only; anything containing
/// `=` or `,` is already a directive and is used as-is.
pub fn filter_directive(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("agentdoc={level}")
    }
}

/// Install the global subscriber
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
pub fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.level)));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match file_writer(config) {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Rolling non-blocking file writer, when enabled and the directory is usable
fn file_writer(
    config: &LoggingConfig,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !config.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&config.file_dir) {
        // Subscriber isn't installed yet, so this has to go straight to stderr
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            config.file_dir, e
        );
        return None;
    }

    let appender = match config.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&config.file_dir, &config.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&config.file_dir, &config.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&config.file_dir, &config.file_prefix)
        }
    };

    Some(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_is_scoped_to_crate() {
        assert_eq!(filter_directive("debug"), "agentdoc=debug");
        assert_eq!(filter_directive(" warn "), "agentdoc=warn");
    }

    #[test]
    fn test_directives_pass_through() {
        assert_eq!(filter_directive("agentdoc=trace"), "agentdoc=trace");
        assert_eq!(filter_directive("info,regex=warn"), "info,regex=warn");
    }

    #[test]
    fn test_directive_is_a_valid_filter() {
        assert!(EnvFilter::try_new(filter_directive("info")).is_ok());
    }

    #[test]
    fn test_file_writer_disabled_by_default() {
        assert!(file_writer(&LoggingConfig::default()).is_none());
    }
}
