//! Logging setup and structured records for guideline resolution.
//!
//! Records go to stderr through `tracing`, so the resolved document printed on
//! stdout stays clean.

use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::{Result, ResplotError};

/// Install the global subscriber.
///
/// `RUST_LOG` takes priority over `log_level` when it is set and valid.
pub fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| ResplotError::Config {
            message: format!("Invalid log level '{}': {}", log_level, e),
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ResplotError::Config {
            message: format!("Failed to install log subscriber: {}", e),
        })
}

/// Record that `operation` started on the document read from `source`
pub fn log_operation_start(operation: &str, source: &str) {
    debug!(operation = operation, source = source, "Starting operation");
}

/// Record how `operation` ended, with its duration
pub fn log_operation_end<T>(operation: &str, start_time: Instant, outcome: &Result<T>) {
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    match outcome {
        Ok(_) => debug!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed"
        ),
        Err(e) => warn!(
            operation = operation,
            duration_ms = duration_ms,
            error = %e,
            "Operation failed"
        ),
    }
}

/// Log summary information about a resolved guideline document
pub fn log_guideline_stats(source: &str, top_level_keys: &[&str], style_functions: usize) {
    info!(
        source = source,
        keys = %top_level_keys.join(", "),
        style_functions = style_functions,
        "Guidelines resolved"
    );
}

/// Log an error with the step it interrupted
pub fn log_error(error: &ResplotError, context: &str) {
    error!(error = %error, context = context, "Error occurred");
}
