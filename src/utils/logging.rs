//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::Env;

/// Setup logging, `info` unless RUST_LOG says otherwise
pub fn setup_logging() {
    // a second init (tests, embedding hosts) is not an error for us
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info")).try_init();
}
