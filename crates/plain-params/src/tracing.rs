//! # Logging Setup
//!
//! The library itself only emits `tracing` events:
//!
//! - `debug` when a schema is built, when validation fails, when an unknown
//!   input key aborts construction, and when input for a derived field is ignored
//! - `trace` when an instance is bound and when a duplicate rule is dropped
//!
//! Binaries install a subscriber once with [`setup_tracing`]; verbosity comes
//! from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=plain_params=debug cargo run -p params-sample
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Panics if a global subscriber is already set.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();
}
