//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::kmz_packager::{decode_href, default_archive_path, resolve_asset, KmzPackager};
use elementtree::Element;
use gdal2kml_core::core::{parse_config, ApplicationCfg, CollisionPolicy, Config};
use gdal2kml_core::Error;
use std::env;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

fn test_dir(name: &str) -> PathBuf {
    let mut dir = env::temp_dir();
    dir.push("gdal2kml_kmz_test");
    dir.push(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn kml(hrefs: &[&str]) -> String {
    let overlays: Vec<String> = hrefs
        .iter()
        .map(|href| {
            format!(
                "<GroundOverlay><name>t</name><Icon><href>{}</href></Icon></GroundOverlay>",
                href
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2"><Folder><name>map</name>{}</Folder></kml>"#,
        overlays.join("")
    )
}

fn collect_hrefs(element: &Element, hrefs: &mut Vec<String>) {
    if element.tag().name() == "href" {
        hrefs.push(element.text().to_string());
    }
    for child in element.children() {
        collect_hrefs(child, hrefs);
    }
}

/// Entry names and contents of an archive
fn read_archive(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut content = Vec::new();
        file.read_to_end(&mut content).unwrap();
        entries.push((file.name().to_string(), content));
    }
    entries
}

fn archive_hrefs(entries: &[(String, Vec<u8>)]) -> Vec<String> {
    let (_, doc) = entries.iter().find(|(name, _)| name == "doc.kml").unwrap();
    let root = Element::from_reader(&doc[..]).unwrap();
    let mut hrefs = Vec::new();
    collect_hrefs(&root, &mut hrefs);
    hrefs
}

#[test]
fn test_decode_href() {
    let cases = [
        ("tiles/a.jpg", "tiles/a.jpg"),
        ("tiles/a%20b.jpg", "tiles/a b.jpg"),
        ("file:///tmp/a%20b.jpg", "/tmp/a b.jpg"),
        ("file://localhost/tmp/a.jpg", "/tmp/a.jpg"),
        ("file:a.jpg", "a.jpg"),
        ("/tmp/%C3%A4.jpg", "/tmp/ä.jpg"),
        ("%2Ftmp%2Fx.jpg", "/tmp/x.jpg"),
        ("  a.jpg\n", "a.jpg"),
        ("100%.jpg", "100%.jpg"),
        // escapes which are no UTF-8 are read as Latin-1
        ("%E9t%E9.jpg", "été.jpg"),
        ("caf%E9 ü.jpg", "café ü.jpg"),
        ("file:///tmp/%FC%20x.jpg", "/tmp/ü x.jpg"),
    ];
    for (href, expected) in cases.iter() {
        assert_eq!(&decode_href(href), expected, "{}", href);
    }
}

#[test]
fn test_resolve_asset() {
    let dir = test_dir("resolve");
    let image = dir.join("a.jpg");
    fs::write(&image, b"jpeg").unwrap();
    let absolute = image.to_string_lossy().into_owned();

    assert_eq!(resolve_asset(&absolute, Path::new("/nonexistent")).unwrap(), image);
    assert_eq!(resolve_asset("a.jpg", &dir).unwrap(), image);
    match resolve_asset("b.jpg", &dir) {
        Err(Error::MissingAsset(path)) => assert_eq!(path, dir.join("b.jpg")),
        other => panic!("unexpected result {:?}", other),
    }
    // directories are no images
    assert!(resolve_asset(".", &dir).is_err());
}

#[test]
fn test_default_archive_path() {
    assert_eq!(
        default_archive_path(Path::new("/data/map.kml")),
        PathBuf::from("/data/map.kmz")
    );
    assert_eq!(default_archive_path(Path::new("map")), PathBuf::from("map.kmz"));
}

#[test]
fn test_repackage() {
    let dir = test_dir("repackage");
    fs::create_dir_all(dir.join("map.files")).unwrap();
    fs::write(dir.join("map.files").join("a b.jpg"), b"first").unwrap();
    fs::write(dir.join("map.files").join("c.jpg"), b"second").unwrap();
    let absolute = dir.join("map.files").join("c.jpg");
    let document = dir.join("map.kml");
    fs::write(
        &document,
        kml(&[
            "map.files/a%20b.jpg",
            &format!("file://{}", absolute.display()),
            "map.files/c.jpg",
        ]),
    )
    .unwrap();

    let kmz = default_archive_path(&document);
    let summary = KmzPackager::default().repackage(&document, &kmz).unwrap();
    assert_eq!(summary.references, 3);
    assert_eq!(summary.assets.len(), 2);
    assert!(!dir.join("map.kmz.part").exists());

    let entries = read_archive(&kmz);
    let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["files/a b.jpg", "files/c.jpg", "doc.kml"]);
    assert_eq!(entries[0].1, b"first".to_vec());
    assert_eq!(entries[1].1, b"second".to_vec());
    assert_eq!(
        archive_hrefs(&entries),
        vec!["files/a b.jpg", "files/c.jpg", "files/c.jpg"]
    );

    let mut archive = zip::ZipArchive::new(File::open(&kmz).unwrap()).unwrap();
    assert_eq!(
        archive.by_name("files/c.jpg").unwrap().compression(),
        zip::CompressionMethod::Stored
    );
    assert_eq!(
        archive.by_name("doc.kml").unwrap().compression(),
        zip::CompressionMethod::Deflated
    );
}

#[test]
fn test_collisions() {
    let dir = test_dir("collisions");
    for sub in &["a", "b"] {
        fs::create_dir_all(dir.join(sub)).unwrap();
        fs::write(dir.join(sub).join("tile.jpg"), sub.as_bytes()).unwrap();
    }
    let document = dir.join("map.kml");
    fs::write(&document, kml(&["a/tile.jpg", "b/tile.jpg"])).unwrap();

    let kmz = dir.join("renamed.kmz");
    KmzPackager::default().repackage(&document, &kmz).unwrap();
    let entries = read_archive(&kmz);
    assert_eq!(entries[0], ("files/tile.jpg".to_string(), b"a".to_vec()));
    assert_eq!(entries[1], ("files/tile_1.jpg".to_string(), b"b".to_vec()));
    assert_eq!(
        archive_hrefs(&entries),
        vec!["files/tile.jpg", "files/tile_1.jpg"]
    );

    let packager = KmzPackager {
        collisions: CollisionPolicy::Overwrite,
        ..Default::default()
    };
    let kmz = dir.join("overwritten.kmz");
    packager.repackage(&document, &kmz).unwrap();
    let entries = read_archive(&kmz);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], ("files/tile.jpg".to_string(), b"b".to_vec()));
    assert_eq!(archive_hrefs(&entries), vec!["files/tile.jpg", "files/tile.jpg"]);
}

#[test]
fn test_repackage_extracted_archive() {
    let dir = test_dir("idempotent");
    fs::write(dir.join("x.jpg"), b"x").unwrap();
    let document = dir.join("map.kml");
    fs::write(&document, kml(&["x.jpg"])).unwrap();
    let kmz = dir.join("map.kmz");
    KmzPackager::default().repackage(&document, &kmz).unwrap();

    let extracted = dir.join("extracted");
    fs::create_dir_all(extracted.join("files")).unwrap();
    for (name, content) in read_archive(&kmz) {
        fs::write(extracted.join(&name), content).unwrap();
    }
    let again = dir.join("again.kmz");
    KmzPackager::default()
        .repackage(&extracted.join("doc.kml"), &again)
        .unwrap();
    let first = read_archive(&kmz);
    let second = read_archive(&again);
    assert_eq!(first, second);
    assert_eq!(archive_hrefs(&second), vec!["files/x.jpg"]);
    assert_eq!(fs::read(&kmz).unwrap(), fs::read(&again).unwrap());
}

#[test]
fn test_repackage_latin1_reference() {
    let dir = test_dir("latin1");
    fs::write(dir.join("été.jpg"), b"summer").unwrap();
    let document = dir.join("map.kml");
    fs::write(&document, kml(&["%E9t%E9.jpg"])).unwrap();
    let kmz = dir.join("map.kmz");
    KmzPackager::default().repackage(&document, &kmz).unwrap();
    let entries = read_archive(&kmz);
    assert_eq!(entries[0], ("files/été.jpg".to_string(), b"summer".to_vec()));
    assert_eq!(archive_hrefs(&entries), vec!["files/été.jpg"]);
}

#[test]
fn test_missing_asset() {
    let dir = test_dir("missing");
    let document = dir.join("map.kml");
    fs::write(&document, kml(&["gone.jpg"])).unwrap();
    let kmz = dir.join("map.kmz");
    match KmzPackager::default().repackage(&document, &kmz) {
        Err(Error::MissingAsset(path)) => assert_eq!(path, dir.join("gone.jpg")),
        other => panic!("unexpected result {:?}", other),
    }
    assert!(!kmz.exists());
    assert!(!dir.join("map.kmz.part").exists());
}

#[test]
fn test_invalid_document() {
    let dir = test_dir("invalid");
    let document = dir.join("map.kml");
    fs::write(&document, "<kml><Folder></kml>").unwrap();
    match KmzPackager::default().repackage(&document, &dir.join("map.kmz")) {
        Err(Error::InvalidDocument { path, .. }) => assert_eq!(path, document),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_packager_from_config() {
    let config: ApplicationCfg = parse_config(
        "[package]\nasset_dir = \"images\"\ncollisions = \"overwrite\"".to_string(),
        "",
    )
    .unwrap();
    let packager = KmzPackager::from_config(&config).unwrap();
    assert_eq!(packager.asset_dir, "images");
    assert_eq!(packager.document, "doc.kml");
    assert_eq!(packager.collisions, CollisionPolicy::Overwrite);

    let config: ApplicationCfg =
        parse_config("[package]\ncollisions = \"hash\"".to_string(), "").unwrap();
    assert!(KmzPackager::from_config(&config).is_err());
}
