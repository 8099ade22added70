//! Error handling
//!
//! Defines the error type shared by every storage operation and the
//! helpers the binary uses to report it.

pub mod handlers;
pub mod types;

pub use types::*;
