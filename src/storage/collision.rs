//! Name collision policy
//!
//! Decides what happens when a create or copy target already exists.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use std::path::PathBuf;
use uuid::Uuid;

/// Behaviour when creating an entry whose name is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreationCollisionOption {
    /// Create under `<token><name>` without looking at the original name
    GenerateUniqueName,
    /// Delete the existing entry, then create
    ReplaceExisting,
    /// Fail with `AlreadyExists`
    #[default]
    FailIfExists,
    /// Return the existing entry untouched
    OpenIfExists,
}

/// Behaviour when a copy destination name is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameCollisionOption {
    GenerateUniqueName,
    ReplaceExisting,
    #[default]
    FailIfExists,
}

impl From<NameCollisionOption> for CreationCollisionOption {
    fn from(option: NameCollisionOption) -> Self {
        match option {
            NameCollisionOption::GenerateUniqueName => CreationCollisionOption::GenerateUniqueName,
            NameCollisionOption::ReplaceExisting => CreationCollisionOption::ReplaceExisting,
            NameCollisionOption::FailIfExists => CreationCollisionOption::FailIfExists,
        }
    }
}

/// What the caller must do at the target path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollisionAction {
    /// Create at this path
    Create(PathBuf),
    /// Remove what is at this path, then create there
    Replace(PathBuf),
    /// Hand back the entry already at this path
    Open(PathBuf),
    /// Refuse, the path is taken
    Fail(PathBuf),
}

/// Resolve the target for `name` under `parent` given whether it exists.
///
/// `GenerateUniqueName` never consults `exists`: a generated name is not
/// re-checked for collisions.
pub fn resolve(
    parent: &std::path::Path,
    name: &str,
    option: CreationCollisionOption,
    exists: bool,
) -> CollisionAction {
    let target = parent.join(name);
    match option {
        CreationCollisionOption::GenerateUniqueName => {
            CollisionAction::Create(parent.join(unique_name(name)))
        }
        _ if !exists => CollisionAction::Create(target),
        CreationCollisionOption::ReplaceExisting => CollisionAction::Replace(target),
        CreationCollisionOption::OpenIfExists => CollisionAction::Open(target),
        CreationCollisionOption::FailIfExists => CollisionAction::Fail(target),
    }
}

/// `name` prefixed with a fresh unique token
pub fn unique_name(name: &str) -> String {
    format!("{}{}", unique_token(), name)
}

/// 22 characters of URL-safe base64 over a random UUID
pub fn unique_token() -> String {
    URL_SAFE_NO_PAD.encode(Uuid::new_v4().as_bytes())
}
