mod common;

use std::collections::HashSet;

use common::{Fixture, write};
use device_storage::storage::{CreationCollisionOption, DeleteMode, FileAccessMode};
use device_storage::{StorageError, StorageOptions, WellKnownFolder};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[tokio::test]
async fn created_file_round_trips_through_lookup() {
    let fx = Fixture::new();
    let storage = fx.granted();
    let docs = storage.documents().await.unwrap().unwrap();

    storage
        .create_file(&docs, "a.txt", CreationCollisionOption::FailIfExists)
        .await
        .unwrap();
    let file = storage.get_file(&docs, "a.txt").await.unwrap();

    assert_eq!(file.name(), "a.txt");
    assert_eq!(file.display_name(), "a");
    assert_eq!(file.display_type(), "txt");
    assert_eq!(file.full_path(), fx.path("Documents/a.txt"));
    assert!(file.full_path().is_absolute());
}

#[tokio::test]
async fn multi_dot_names_split_on_last_dot() {
    let fx = Fixture::new();
    let storage = fx.granted();
    let docs = fx.folder("Documents").await;

    let archive = storage
        .create_file_default(&docs, "backup.tar.gz")
        .await
        .unwrap();
    assert_eq!(archive.display_name(), "backup.tar");
    assert_eq!(archive.display_type(), "gz");

    let plain = storage.create_file_default(&docs, "LICENSE").await.unwrap();
    assert_eq!(plain.display_name(), "LICENSE");
    assert_eq!(plain.display_type(), "");
}

#[tokio::test]
async fn listing_returns_exactly_the_files() {
    let fx = Fixture::new();
    let storage = fx.granted();
    let a = fx.folder("A").await;
    write(&fx.path("A/x.txt"), b"x");
    write(&fx.path("A/y.txt"), b"y");
    fx.folder("A/nested").await;

    let names: HashSet<String> = storage
        .list_files(&a)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.name().to_string())
        .collect();
    assert_eq!(names, HashSet::from(["x.txt".to_string(), "y.txt".to_string()]));

    let folders = storage.list_folders(&a).await.unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].name(), "nested");
}

#[tokio::test]
async fn deleting_a_deleted_folder_is_directory_not_found() {
    let fx = Fixture::new();
    let storage = fx.granted();
    let docs = fx.folder("Documents").await;
    let tmp = storage.create_folder_default(&docs, "tmp").await.unwrap();

    storage.delete_folder(&tmp).await.unwrap();
    assert!(!fx.path("Documents/tmp").exists());
    assert!(matches!(
        storage.delete_folder(&tmp).await,
        Err(StorageError::DirectoryNotFound(_))
    ));
}

#[tokio::test]
async fn recursive_delete_is_a_deployment_choice() {
    let fx = Fixture::new();
    let docs = fx.folder("Documents").await;
    let granted = Arc::new(device_storage::permission::StaticPermission::granted());

    let strict = fx.storage(granted.clone());
    let full = strict.create_folder_default(&docs, "full").await.unwrap();
    write(&fx.path("Documents/full/item"), b"1");
    assert!(matches!(
        strict.delete_folder(&full).await,
        Err(StorageError::DeleteFailed(_))
    ));

    let recursive = fx.storage_with(
        granted,
        StorageOptions {
            delete_mode: DeleteMode::Recursive,
        },
    );
    recursive.delete_folder(&full).await.unwrap();
    assert!(!fx.path("Documents/full").exists());
}

#[tokio::test]
async fn operations_on_a_vanished_parent_fail() {
    let fx = Fixture::new();
    let storage = fx.granted();
    let gone = fx.folder("Gone").await;
    std::fs::remove_dir(fx.path("Gone")).unwrap();

    assert!(matches!(
        storage.list_files(&gone).await,
        Err(StorageError::DirectoryNotFound(_))
    ));
    assert!(matches!(
        storage.create_file_default(&gone, "a.txt").await,
        Err(StorageError::DirectoryNotFound(_))
    ));
    assert!(matches!(
        storage.create_folder_default(&gone, "sub").await,
        Err(StorageError::DirectoryNotFound(_))
    ));
    assert!(matches!(
        storage.get_file(&gone, "a.txt").await,
        Err(StorageError::DirectoryNotFound(_))
    ));
}

#[tokio::test]
async fn streams_read_back_what_was_written() {
    let fx = Fixture::new();
    let storage = fx.granted();
    let docs = fx.folder("Documents").await;
    let file = storage.create_file_default(&docs, "notes.md").await.unwrap();

    let mut writer = storage.open(&file, FileAccessMode::Write).await.unwrap();
    writer.write_all(b"# notes\n").await.unwrap();
    writer.flush().await.unwrap();
    drop(writer);

    let mut reader = storage.open(&file, FileAccessMode::Read).await.unwrap();
    let mut text = String::new();
    reader.read_to_string(&mut text).await.unwrap();
    assert_eq!(text, "# notes\n");

    storage.delete_file(&file).await.unwrap();
    assert!(matches!(
        storage.open(&file, FileAccessMode::Read).await,
        Err(StorageError::NotFound(_))
    ));
}

#[tokio::test]
async fn well_known_folders_resolve_or_report_unsupported() {
    let fx = Fixture::new();
    let storage = fx.granted();

    for kind in WellKnownFolder::ALL {
        let resolved = storage.folder(kind).await;
        match kind {
            WellKnownFolder::SDCard => assert!(resolved.unwrap().is_none()),
            // the fixture home has no camera roll
            WellKnownFolder::CameraRoll => assert!(matches!(
                resolved,
                Err(StorageError::DirectoryNotFound(_))
            )),
            _ => assert!(resolved.unwrap().is_some(), "{kind} should resolve"),
        }
    }
}
