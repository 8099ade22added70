//! Name validation
//!
//! Entry names are single path segments. Anything that could escape the
//! parent folder is rejected before the filesystem is touched.

use crate::error::StorageError;

/// Validate a file or folder name supplied by a caller
pub fn validate_name(name: &str) -> Result<&str, StorageError> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
    {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(name)
}
