//! Common test utilities and helpers.
//!
//! This module provides shared functionality for all tests, including:
//! - Text file fixtures written into temporary directories
//! - Custom assertions on run results and rendered documents
//! - Log capture for tests that want to see warnings

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_log() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
