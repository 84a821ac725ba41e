//! Zip bundle layout

use campaign_forge::campaign::mock_campaigns;
use campaign_forge::package::{archive_filename, bundle_filename, Packager, MANIFEST_NAME};
use std::io::{Cursor, Read};

use crate::integration::test_utils::{record, StubImages};

fn entry_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

#[test]
fn test_entry_name_uses_first_theme_word() {
    let r = record("High Energy", "Go.", "http://img/x");
    assert_eq!(archive_filename(2, &r), "Var_3_High.jpg");
    assert_eq!(bundle_filename("Lumina"), "Lumina_Assets.zip");
}

#[tokio::test]
async fn test_failed_image_is_skipped_but_listed_in_manifest() {
    let records = vec![
        record("Neon Future", "Light Up.", "http://img/neon"),
        record("Pure Zen", "Simple.", "http://img/zen"),
        record("Urban Flow", "Move.", "http://img/broken"),
        record("Luxury Gold", "Excel.", "http://img/gold"),
    ];
    let images = StubImages::failing_on(2048, "broken");

    let bundle = Packager::new(&images).package(&records).await.unwrap();

    assert_eq!(bundle.images.len(), 3);
    assert_eq!(bundle.skipped, vec!["Var_3_Urban.jpg".to_string()]);
    assert_eq!(
        entry_names(&bundle.bytes),
        vec![
            "Var_1_Neon.jpg",
            "Var_2_Pure.jpg",
            "Var_4_Luxury.jpg",
            MANIFEST_NAME,
        ]
    );

    let mut archive = zip::ZipArchive::new(Cursor::new(bundle.bytes)).unwrap();
    let mut manifest = String::new();
    archive
        .by_name(MANIFEST_NAME)
        .unwrap()
        .read_to_string(&mut manifest)
        .unwrap();
    for r in &records {
        assert!(manifest.contains(&format!("[{}]\nHEADLINE: {}\n", r.theme, r.headline)));
    }
    assert!(manifest.contains("FILE: Var_3_Urban.jpg"));
}

#[tokio::test]
async fn test_no_reachable_images_still_yields_manifest() {
    let images = StubImages::failing_on(2048, "pollinations");
    let bundle = Packager::new(&images).package(&mock_campaigns()).await.unwrap();

    assert!(bundle.images.is_empty());
    assert_eq!(bundle.skipped.len(), 4);
    assert_eq!(entry_names(&bundle.bytes), vec![MANIFEST_NAME]);
}
