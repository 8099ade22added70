//! Storage entries
//!
//! `Folder` and `StorageFile` are snapshots taken when they were produced.
//! They hold no open handle and are re-validated by every operation.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{MissingKind, StorageError};

/// A directory that existed when the snapshot was taken
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Folder {
    full_path: PathBuf,
    name: String,
}

impl Folder {
    /// Build a folder snapshot without touching the filesystem.
    ///
    /// The display name is the last path segment, or the whole path for a
    /// filesystem root.
    pub(crate) fn new(full_path: PathBuf) -> Self {
        let name = last_segment(&full_path);
        Self { full_path, name }
    }

    /// Build a folder snapshot with a name that differs from its last segment
    pub(crate) fn with_name(full_path: PathBuf, name: impl Into<String>) -> Self {
        Self {
            full_path,
            name: name.into(),
        }
    }

    /// Snapshot the directory at `path`, which must currently exist
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let full_path = absolute(path.as_ref())?;
        let metadata = tokio::fs::metadata(&full_path)
            .await
            .map_err(|e| StorageError::from_io(e, &full_path, MissingKind::Directory))?;

        if !metadata.is_dir() {
            return Err(StorageError::DirectoryNotFound(full_path));
        }
        Ok(Self::new(full_path))
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of a direct child called `name`
    pub(crate) fn child(&self, name: &str) -> PathBuf {
        self.full_path.join(name)
    }
}

/// Attributes read from the filesystem when a file snapshot is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileAttributes {
    pub read_only: bool,
    pub hidden: bool,
    pub len: u64,
}

/// A file as it was when the snapshot was taken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageFile {
    full_path: PathBuf,
    name: String,
    display_name: String,
    display_type: String,
    date_created: SystemTime,
    attributes: FileAttributes,
}

impl StorageFile {
    /// Snapshot the file at `path`, reading its timestamps and attributes.
    ///
    /// Extension parsing uses the last dot: `a.tar.gz` is `a.tar` + `gz`,
    /// and a name without a dot (or with only a leading one) has an empty
    /// display type.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let full_path = absolute(path.as_ref())?;
        let metadata = tokio::fs::metadata(&full_path)
            .await
            .map_err(|e| StorageError::from_io(e, &full_path, MissingKind::File))?;

        if !metadata.is_file() {
            return Err(StorageError::NotFound(full_path));
        }

        let name = last_segment(&full_path);
        let (display_name, display_type) = split_file_name(&name);

        // not every filesystem records a birth time
        let date_created = metadata
            .created()
            .or_else(|_| metadata.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let attributes = FileAttributes {
            read_only: metadata.permissions().readonly(),
            hidden: name.starts_with('.'),
            len: metadata.len(),
        };

        Ok(Self {
            full_path,
            display_name: display_name.to_string(),
            display_type: display_type.to_string(),
            name,
            date_created,
            attributes,
        })
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// File name including the extension
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name without the extension
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Extension without the dot, empty when there is none
    pub fn display_type(&self) -> &str {
        &self.display_type
    }

    pub fn date_created(&self) -> SystemTime {
        self.date_created
    }

    pub fn attributes(&self) -> FileAttributes {
        self.attributes
    }
}

/// Split a file name on its last dot into display name and type
pub fn split_file_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(0) | None => (name, ""),
        Some(idx) => (&name[..idx], &name[idx + 1..]),
    }
}

fn last_segment(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn absolute(path: &Path) -> Result<PathBuf, StorageError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::path::absolute(path)?)
    }
}
