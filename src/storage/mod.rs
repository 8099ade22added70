//! File system storage
//!
//! Entries, the collision policy and the folder/file operations that run
//! against the real filesystem.

pub mod collision;
pub mod entry;
pub mod file_ops;
pub mod filesystem;
pub mod folder_ops;
pub mod validation;

pub use collision::{CreationCollisionOption, NameCollisionOption, unique_token};
pub use entry::{FileAttributes, Folder, StorageFile, split_file_name};
pub use file_ops::FileAccessMode;
pub use folder_ops::DeleteMode;
