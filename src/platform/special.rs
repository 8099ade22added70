//! OS special-folder lookup
//!
//! The vocabulary a host OS uses for its own directories, and the default
//! lookup that derives them from the home directory and configuration.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::StorageConfig;

/// Directory kinds an OS can be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialDirectory {
    Home,
    Documents,
    Downloads,
    Music,
    Pictures,
    Videos,
    CameraRoll,
    ExternalStorage,
    RemovableStorage,
    SystemRoot,
}

impl SpecialDirectory {
    pub const ALL: [SpecialDirectory; 10] = [
        SpecialDirectory::Home,
        SpecialDirectory::Documents,
        SpecialDirectory::Downloads,
        SpecialDirectory::Music,
        SpecialDirectory::Pictures,
        SpecialDirectory::Videos,
        SpecialDirectory::CameraRoll,
        SpecialDirectory::ExternalStorage,
        SpecialDirectory::RemovableStorage,
        SpecialDirectory::SystemRoot,
    ];

    /// Configuration key naming this directory
    pub fn key(self) -> &'static str {
        match self {
            SpecialDirectory::Home => "home",
            SpecialDirectory::Documents => "documents",
            SpecialDirectory::Downloads => "downloads",
            SpecialDirectory::Music => "music",
            SpecialDirectory::Pictures => "pictures",
            SpecialDirectory::Videos => "videos",
            SpecialDirectory::CameraRoll => "camera_roll",
            SpecialDirectory::ExternalStorage => "external_storage",
            SpecialDirectory::RemovableStorage => "removable_storage",
            SpecialDirectory::SystemRoot => "system_root",
        }
    }
}

impl fmt::Display for SpecialDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SpecialDirectory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SpecialDirectory::ALL
            .into_iter()
            .find(|dir| dir.key() == wanted)
            .ok_or_else(|| format!("unknown special directory: {s}"))
    }
}

/// Answers "where is this directory" for the host OS
pub trait SpecialFolders: Send + Sync {
    fn lookup(&self, dir: SpecialDirectory) -> Option<PathBuf>;
}

const EXTERNAL_STORAGE: &str = "/storage/emulated/0";
const REMOVABLE_STORAGE: &str = "/sdcard";
const SYSTEM_ROOT: &str = "/system";

/// Lookup driven by a home directory and explicit overrides
#[derive(Debug, Clone, Default)]
pub struct ConfiguredFolders {
    home: Option<PathBuf>,
    overrides: HashMap<SpecialDirectory, PathBuf>,
}

impl ConfiguredFolders {
    pub fn new(home: Option<PathBuf>) -> Self {
        Self {
            home,
            overrides: HashMap::new(),
        }
    }

    /// Home from configuration, falling back to the environment
    pub fn from_config(config: &StorageConfig) -> Self {
        let mut folders = Self::new(config.home_path().or_else(home_from_env));

        let roots = [
            (SpecialDirectory::ExternalStorage, &config.storage_root),
            (SpecialDirectory::RemovableStorage, &config.removable_root),
            (SpecialDirectory::SystemRoot, &config.system_root),
        ];
        for (dir, root) in roots {
            if let Some(root) = root {
                folders = folders.with_override(dir, PathBuf::from(root));
            }
        }

        for (dir, path) in config.folder_overrides() {
            folders = folders.with_override(dir, path);
        }
        folders
    }

    pub fn with_override(mut self, dir: SpecialDirectory, path: PathBuf) -> Self {
        self.overrides.insert(dir, path);
        self
    }
}

impl SpecialFolders for ConfiguredFolders {
    fn lookup(&self, dir: SpecialDirectory) -> Option<PathBuf> {
        if let Some(path) = self.overrides.get(&dir) {
            return Some(path.clone());
        }

        match dir {
            SpecialDirectory::ExternalStorage => return Some(PathBuf::from(EXTERNAL_STORAGE)),
            SpecialDirectory::RemovableStorage => return Some(PathBuf::from(REMOVABLE_STORAGE)),
            SpecialDirectory::SystemRoot => return Some(PathBuf::from(SYSTEM_ROOT)),
            _ => {}
        }

        let home = self.home.as_ref()?;
        let path = match dir {
            SpecialDirectory::Home => home.clone(),
            SpecialDirectory::Documents => home.join("Documents"),
            SpecialDirectory::Downloads => home.join("Downloads"),
            SpecialDirectory::Music => home.join("Music"),
            SpecialDirectory::Pictures => home.join("Pictures"),
            SpecialDirectory::Videos => home.join("Videos"),
            SpecialDirectory::CameraRoll => home.join("Pictures").join("Camera Roll"),
            SpecialDirectory::ExternalStorage
            | SpecialDirectory::RemovableStorage
            | SpecialDirectory::SystemRoot => return None,
        };
        Some(path)
    }
}

fn home_from_env() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .into_iter()
        .filter_map(std::env::var_os)
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
}
