//! Device storage
//!
//! A uniform set of storage operations (well-known folders, listing,
//! creation, deletion, copy and streams) over per-platform folder layouts.

pub mod config;
pub mod error;
pub mod permission;
pub mod platform;
pub mod service;
pub mod storage;
pub mod utils;

pub use config::StorageConfig;
pub use error::StorageError;
pub use platform::WellKnownFolder;
pub use service::{DeviceStorage, StorageOptions};
