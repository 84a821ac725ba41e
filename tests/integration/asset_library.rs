//! Asset library persistence and listing

use campaign_forge::error::StorageError;
use campaign_forge::library::{list_assets_in, AssetLibrary, PersistOutcome};
use std::fs::File;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

use crate::integration::test_utils::StubImages;

fn open_library(temp: &TempDir) -> AssetLibrary {
    AssetLibrary::open(temp.path().join("asset_library"), 1024).unwrap()
}

#[tokio::test]
async fn test_payload_at_threshold_is_discarded() {
    let temp = TempDir::new().unwrap();
    let library = open_library(&temp);

    let outcome = library
        .try_persist(&StubImages::sized(1024), "http://img/a", "Lumina_Neon Future")
        .await
        .unwrap();

    assert_eq!(outcome, PersistOutcome::Discarded { bytes: 1024 });
    assert!(library.list_assets().unwrap().is_empty());
}

#[tokio::test]
async fn test_payload_above_threshold_is_saved() {
    let temp = TempDir::new().unwrap();
    let library = open_library(&temp);

    let outcome = library
        .try_persist(&StubImages::sized(1025), "http://img/a", "Lumina_Neon Future")
        .await
        .unwrap();

    let expected = temp.path().join("asset_library").join("Lumina_NeonFuture.jpg");
    assert_eq!(outcome, PersistOutcome::Saved(expected.clone()));
    assert_eq!(std::fs::metadata(&expected).unwrap().len(), 1025);
}

#[tokio::test]
async fn test_same_hint_overwrites() {
    let temp = TempDir::new().unwrap();
    let library = open_library(&temp);

    library
        .persist(&StubImages::sized(2000), "http://img/a", "Lumina_Pure Zen")
        .await;
    library
        .persist(&StubImages::sized(3000), "http://img/b", "Lumina_Pure/Zen")
        .await;

    let assets = library.list_assets().unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(std::fs::metadata(&assets[0]).unwrap().len(), 3000);
}

#[tokio::test]
async fn test_failed_fetch_is_logged_not_raised() {
    let temp = TempDir::new().unwrap();
    let library = open_library(&temp);
    let images = StubImages::failing_on(4096, "broken");

    let outcome = library
        .persist(&images, "http://img/broken", "Lumina_Urban Flow")
        .await;
    assert!(outcome.is_none());

    let err = library
        .try_persist(&images, "http://img/broken", "Lumina_Urban Flow")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::FetchStatus { status: 503, .. }));
}

#[test]
fn test_listing_is_newest_first() {
    let temp = TempDir::new().unwrap();
    let library = open_library(&temp);
    let base = SystemTime::now() - Duration::from_secs(3600);

    for (name, offset) in [("older", 0u64), ("newest", 120), ("middle", 60)] {
        library.store_bytes(name, &vec![0u8; 2048]).unwrap();
        let file = File::options()
            .write(true)
            .open(library.asset_path(name).unwrap())
            .unwrap();
        file.set_modified(base + Duration::from_secs(offset)).unwrap();
    }
    std::fs::write(library.root().join("notes.txt"), "not an asset").unwrap();

    let names: Vec<String> = library
        .list_assets()
        .unwrap()
        .iter()
        .map(|p| p.file_stem().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["newest", "middle", "older"]);
}

#[test]
fn test_missing_library_lists_empty() {
    let temp = TempDir::new().unwrap();
    let assets = list_assets_in(&temp.path().join("never_created")).unwrap();
    assert!(assets.is_empty());
}
