//! Device storage - Entry Point
//!
//! Resolves a well-known folder and prints its files or subfolders.
//!
//! Usage: device-storage [KIND] [files|folders]

use log::info;
use std::process::ExitCode;

use device_storage::error::handlers::{error_to_exit_code, handle_error};
use device_storage::utils::logging::setup_logging;
use device_storage::{DeviceStorage, StorageConfig, StorageError, WellKnownFolder};

enum Listing {
    Files,
    Folders,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    match run(std::env::args().skip(1).collect()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            handle_error(&e);
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}

async fn run(args: Vec<String>) -> Result<(), StorageError> {
    let kind: WellKnownFolder = args.first().map(String::as_str).unwrap_or("pictures").parse()?;
    let listing = match args.get(1).map(String::as_str) {
        None | Some("files") => Listing::Files,
        Some("folders") => Listing::Folders,
        Some(other) => return Err(StorageError::Unsupported(format!("listing {other:?}"))),
    };

    let config = StorageConfig::load()?;
    let storage = DeviceStorage::from_config(&config);
    info!("Using {:?} folder layout", storage.platform());

    let Some(folder) = storage.folder(kind).await? else {
        return Err(StorageError::Unsupported(format!(
            "{kind} on {:?}",
            storage.platform()
        )));
    };
    println!("{} ({})", folder.name(), folder.full_path().display());

    match listing {
        Listing::Files => {
            for file in storage.list_files(&folder).await? {
                println!(
                    "  {}\t{}\t{} bytes",
                    file.name(),
                    file.display_type(),
                    file.attributes().len
                );
            }
        }
        Listing::Folders => {
            for child in storage.list_folders(&folder).await? {
                println!("  {}/", child.name());
            }
        }
    }

    Ok(())
}
