//! Shared components for CLI commands
//!
//! Common types and utilities used across the command implementations.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::Result;
use crate::app::services::emitter::EmitStats;

/// Conversion statistics for reporting across commands
#[derive(Debug, Clone, Default)]
pub struct ConvertStats {
    /// Number of records emitted
    pub records_emitted: usize,
    /// Number of fields emitted
    pub fields_emitted: usize,
    /// Number of records flagged as truncated
    pub records_truncated: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
}

impl ConvertStats {
    /// Build command-level stats from emitter stats and the elapsed time
    pub fn from_emit(emit: EmitStats, processing_time: std::time::Duration) -> Self {
        Self {
            records_emitted: emit.records_emitted,
            fields_emitted: emit.fields_emitted,
            records_truncated: emit.records_truncated,
            processing_time,
        }
    }
}

/// Set up structured logging for a command at the given level
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("flatfile_processor={}", log_level)));

    // try_init: a second invocation in-process keeps the first subscriber
    if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .ok();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Create a spinner for long-running stream parsing
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_stats_default() {
        let stats = ConvertStats::default();
        assert_eq!(stats.records_emitted, 0);
        assert_eq!(stats.fields_emitted, 0);
        assert_eq!(stats.records_truncated, 0);
    }

    #[test]
    fn test_convert_stats_from_emit() {
        let emit = EmitStats {
            records_emitted: 5,
            fields_emitted: 15,
            records_truncated: 1,
        };
        let stats = ConvertStats::from_emit(emit, std::time::Duration::from_millis(250));
        assert_eq!(stats.records_emitted, 5);
        assert_eq!(stats.fields_emitted, 15);
        assert_eq!(stats.records_truncated, 1);
    }
}
