//! Storage permission
//!
//! The gate every storage operation passes through before touching the
//! filesystem, and the providers that answer it.

mod gate;
mod providers;

pub use gate::{PermissionGate, PermissionProvider, StorageAccess};
pub use providers::{PromptPermission, StaticPermission, provider_for};
