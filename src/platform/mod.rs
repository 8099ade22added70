//! Platform backends
//!
//! Maps well-known folders onto the directory layout of each supported
//! host. The backend is chosen at runtime from configuration.

mod android;
mod apple;
mod desktop;
mod special;

use async_trait::async_trait;
use log::debug;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::{PlatformKind, StorageConfig};
use crate::error::StorageError;
use crate::storage::Folder;

pub use android::AndroidResolver;
pub use apple::AppleResolver;
pub use desktop::DesktopResolver;
pub use special::{ConfiguredFolders, SpecialDirectory, SpecialFolders};

/// Symbolic folder categories every platform understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownFolder {
    Downloads,
    Music,
    Pictures,
    Documents,
    Movies,
    CameraRoll,
    Home,
    SDCard,
    Root,
}

impl WellKnownFolder {
    pub const ALL: [WellKnownFolder; 9] = [
        WellKnownFolder::Downloads,
        WellKnownFolder::Music,
        WellKnownFolder::Pictures,
        WellKnownFolder::Documents,
        WellKnownFolder::Movies,
        WellKnownFolder::CameraRoll,
        WellKnownFolder::Home,
        WellKnownFolder::SDCard,
        WellKnownFolder::Root,
    ];
}

impl fmt::Display for WellKnownFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WellKnownFolder::Downloads => "downloads",
            WellKnownFolder::Music => "music",
            WellKnownFolder::Pictures => "pictures",
            WellKnownFolder::Documents => "documents",
            WellKnownFolder::Movies => "movies",
            WellKnownFolder::CameraRoll => "camera-roll",
            WellKnownFolder::Home => "home",
            WellKnownFolder::SDCard => "sdcard",
            WellKnownFolder::Root => "root",
        };
        f.write_str(name)
    }
}

impl FromStr for WellKnownFolder {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "downloads" | "download" => Ok(WellKnownFolder::Downloads),
            "music" => Ok(WellKnownFolder::Music),
            "pictures" => Ok(WellKnownFolder::Pictures),
            "documents" => Ok(WellKnownFolder::Documents),
            "movies" | "movie" => Ok(WellKnownFolder::Movies),
            "cameraroll" => Ok(WellKnownFolder::CameraRoll),
            "home" => Ok(WellKnownFolder::Home),
            "sdcard" => Ok(WellKnownFolder::SDCard),
            "root" => Ok(WellKnownFolder::Root),
            _ => Err(StorageError::Unsupported(format!("well-known folder {s:?}"))),
        }
    }
}

/// Resolves well-known folders for one platform
#[async_trait]
pub trait PathResolver: Send + Sync {
    fn platform(&self) -> PlatformKind;

    /// `Ok(None)` when the platform has no such folder; an error when it
    /// should have one but the directory is not on disk.
    async fn resolve(&self, kind: WellKnownFolder) -> Result<Option<Folder>, StorageError>;
}

/// Select the resolver for the configured platform
pub fn backend_for(config: &StorageConfig) -> Arc<dyn PathResolver> {
    let folders: Arc<dyn SpecialFolders> = Arc::new(ConfiguredFolders::from_config(config));
    match config.platform {
        PlatformKind::Desktop => Arc::new(DesktopResolver::new(folders)),
        PlatformKind::Android => Arc::new(AndroidResolver::new(folders)),
        PlatformKind::Apple => Arc::new(AppleResolver::new(folders)),
    }
}

/// Snapshot `path` as a folder, optionally under a display name of our own
async fn existing_folder(
    path: Option<PathBuf>,
    display_name: Option<&str>,
) -> Result<Option<Folder>, StorageError> {
    let Some(path) = path else {
        return Ok(None);
    };

    let folder = Folder::from_path(&path).await?;
    debug!("Resolved {}", folder.full_path().display());
    Ok(Some(match display_name {
        Some(name) => Folder::with_name(folder.full_path().to_path_buf(), name),
        None => folder,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_folder_names_loosely() {
        assert_eq!(
            "Camera-Roll".parse::<WellKnownFolder>().unwrap(),
            WellKnownFolder::CameraRoll
        );
        assert_eq!(
            "movie".parse::<WellKnownFolder>().unwrap(),
            WellKnownFolder::Movies
        );
        assert_eq!(
            "SD_Card".parse::<WellKnownFolder>().unwrap(),
            WellKnownFolder::SDCard
        );
        assert!(matches!(
            "attic".parse::<WellKnownFolder>(),
            Err(StorageError::Unsupported(_))
        ));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for kind in WellKnownFolder::ALL {
            assert_eq!(kind.to_string().parse::<WellKnownFolder>().unwrap(), kind);
        }
    }

    #[test]
    fn backend_follows_configured_platform() {
        for (text, platform) in [
            (r#"platform = "desktop""#, PlatformKind::Desktop),
            (r#"platform = "android""#, PlatformKind::Android),
            (r#"platform = "apple""#, PlatformKind::Apple),
        ] {
            let config = StorageConfig::from_toml_str(text).unwrap();
            assert_eq!(backend_for(&config).platform(), platform);
        }
    }
}
