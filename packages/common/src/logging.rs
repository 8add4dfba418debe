//! Structured logging infrastructure
//!
//! Provides env_logger-based logging with helpers for the record shapes the
//! digest adapter emits: library call failures, cleanup warnings,
//! registration outcomes and digest buffer dumps.

use log::{debug, error, info, log_enabled, warn, Level};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Bytes rendered per line by [`hex_dump`].
const DUMP_LINE_LEN: usize = 16;

/// Logging entry points used across the workspace
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable digest dumps and registration details
    /// - `RUST_LOG=trace` - Also trace every adapter entry and exit
    /// - `RUST_LOG=hashbridge_digest=warn` - Only failures and cleanup warnings
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            // A host may already have installed its own logger.
            let installed = env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .try_init()
                .is_ok();

            if installed {
                info!("Structured logging initialized");
            }
        });
    }

    /// Initialize logging for test environments
    ///
    /// Use this in test modules to avoid initialization conflicts
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a hashing-library call that returned a nonzero status
    pub fn log_library_failure(call: &str, status: i32) {
        error!("Library call failed: {call} (status: {status})");
    }

    /// Log a resource-release failure that is not escalated to the caller
    pub fn log_cleanup_warning(component: &str, call: &str, status: i32) {
        warn!("Component cleanup failed: {component} ({call} status: {status})");
    }

    /// Log the outcome of registering one digest method
    pub fn log_registration(name: &str, nid: i32, success: bool) {
        if success {
            info!("Digest method registered: {name} (nid: {nid})");
        } else {
            warn!("Digest method unavailable: {name} (nid: {nid})");
        }
    }

    /// Log a labelled byte buffer as a hex dump at debug level
    pub fn log_buffer(label: &str, bytes: &[u8]) {
        if log_enabled!(Level::Debug) {
            debug!("{label} ({} bytes)\n{}", bytes.len(), hex_dump(bytes));
        }
    }
}

/// Render bytes as lowercase hex, sixteen bytes per line with a space between bytes
#[must_use]
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .chunks(DUMP_LINE_LEN)
        .map(|line| {
            line.iter()
                .map(|b| hex::encode([*b]))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_dump_wraps_lines() {
        let bytes: Vec<u8> = (0u8..20).collect();
        let dump = hex_dump(&bytes);
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f"
        );
        assert_eq!(lines[1], "10 11 12 13");
    }

    #[test]
    fn test_hex_dump_empty() {
        assert_eq!(hex_dump(&[]), "");
    }

    #[test]
    fn test_logging_operations() {
        LoggingTransformer::init_test();

        // These should not panic and should produce log output
        LoggingTransformer::log_library_failure("hash_update", -173);
        LoggingTransformer::log_cleanup_warning("digest", "hash_free", -173);
        LoggingTransformer::log_registration("SHA256", 672, true);
        LoggingTransformer::log_buffer("Message Digest", &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_init_is_repeatable() {
        LoggingTransformer::init();
        LoggingTransformer::init();
    }
}
