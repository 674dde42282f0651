//! # Quantum-Chain Test Suite
//!
//! Cross-chain flows for the IBC blog module.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Two chains joined by a relayer
//!     ├── relayer.rs    # TestChain, Relayer
//!     └── flows.rs      # End-to-end packet lifecycles
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p qc-tests
//!
//! # With module logs
//! RUST_LOG=qc_18_ibc_blog=debug cargo test -p qc-tests -- --nocapture
//! ```

#![allow(dead_code)]


use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Install a test-writer subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Safe to call from every test.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_test_writer()
            .try_init();
    });
}
