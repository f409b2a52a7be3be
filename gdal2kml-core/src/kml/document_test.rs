//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::ExclusionSet;
use crate::error::Error;
use crate::kml::document::{escape, OverlayDocument, OverlayDocumentBuilder, OverlayEntry};
use tile_layout::{GeoBounds, TileCell, TileLayout};

fn unit_bounds(cell: &TileCell) -> GeoBounds {
    GeoBounds {
        north: -(cell.row as f64),
        south: -(cell.row as f64) - 1.0,
        east: cell.column as f64 + 1.0,
        west: cell.column as f64,
    }
}

fn build(layout: TileLayout, exclusions: &ExclusionSet) -> (OverlayDocument, Vec<TileCell>) {
    let builder = OverlayDocumentBuilder::new("map", 20, "map.files");
    let mut visited = Vec::new();
    let document = builder
        .build(&layout, exclusions, |cell| {
            visited.push(*cell);
            Ok((
                format!("map_{}_{}.jpg", cell.column, cell.row),
                unit_bounds(cell),
            ))
        })
        .unwrap();
    (document, visited)
}

#[test]
fn test_row_major_entries() {
    let (document, visited) = build(TileLayout::new(2, 1), &ExclusionSet::new());
    assert_eq!(visited, vec![TileCell::new(0, 0), TileCell::new(1, 0)]);
    assert_eq!(document.name, "map");
    assert_eq!(document.entries.len(), 2);
    assert_eq!(
        document.entries[0],
        OverlayEntry {
            name: "map_0_0.jpg".to_string(),
            href: "map.files/map_0_0.jpg".to_string(),
            draw_order: 20,
            bounds: GeoBounds {
                north: 0.0,
                south: -1.0,
                east: 1.0,
                west: 0.0
            },
        }
    );
    assert_eq!(document.entries[1].name, "map_1_0.jpg");

    let (document, _) = build(TileLayout::new(2, 2), &ExclusionSet::new());
    let names: Vec<&str> = document.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["map_0_0.jpg", "map_1_0.jpg", "map_0_1.jpg", "map_1_1.jpg"]
    );
}

#[test]
fn test_excluded_cells() {
    let mut exclusions = ExclusionSet::new();
    exclusions.insert("0,1");
    let (document, visited) = build(TileLayout::new(2, 1), &exclusions);
    assert_eq!(visited, vec![TileCell::new(0, 0)]);
    assert_eq!(document.entries.len(), 1);
    assert_eq!(document.entries[0].name, "map_0_0.jpg");

    // identifiers of cells outside the grid are ignored
    exclusions.insert("7,7");
    let (document, _) = build(TileLayout::new(2, 1), &exclusions);
    assert_eq!(document.entries.len(), 1);
}

#[test]
fn test_tile_error() {
    let builder = OverlayDocumentBuilder::new("map", 20, "");
    let result = builder.build(&TileLayout::new(3, 3), &ExclusionSet::new(), |cell| {
        if cell.column == 1 {
            Err(Error::Cancelled)
        } else {
            Ok(("t.jpg".to_string(), unit_bounds(cell)))
        }
    });
    match result {
        Err(Error::Cancelled) => {}
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_href() {
    assert_eq!(OverlayDocumentBuilder::new("", 0, "").href("a.jpg"), "a.jpg");
    assert_eq!(OverlayDocumentBuilder::new("", 0, ".").href("a.jpg"), "a.jpg");
    assert_eq!(
        OverlayDocumentBuilder::new("", 0, "tiles/").href("a.jpg"),
        "tiles/a.jpg"
    );
    assert_eq!(
        OverlayDocumentBuilder::new("", 0, "out/tiles").href("a.jpg"),
        "out/tiles/a.jpg"
    );
}

#[test]
fn test_escape() {
    assert_eq!(escape("plain"), "plain");
    assert_eq!(
        escape(r#"A & B <"x"> 'y'"#),
        "A &amp; B &lt;&quot;x&quot;&gt; &apos;y&apos;"
    );
}

#[test]
fn test_kml_output() {
    let mut document = OverlayDocument::new("Berne & Co");
    document.entries.push(OverlayEntry {
        name: "a<1>.jpg".to_string(),
        href: "tiles/a<1>.jpg".to_string(),
        draw_order: 5,
        bounds: GeoBounds {
            north: 47.5,
            south: 46.25,
            east: 8.0,
            west: -7.125,
        },
    });
    let kml = document.to_kml();
    assert!(kml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(kml.contains(r#"xmlns="http://www.opengis.net/kml/2.2""#));
    assert!(kml.contains("<name>Berne &amp; Co</name>"));
    assert!(kml.contains("<name>a&lt;1&gt;.jpg</name>"));
    assert!(kml.contains("<href>tiles/a&lt;1&gt;.jpg</href>"));
    assert!(kml.contains("<color>ffffffff</color>"));
    assert!(kml.contains("<drawOrder>5</drawOrder>"));
    assert!(kml.contains("<north>47.5</north>"));
    assert!(kml.contains("<south>46.25</south>"));
    assert!(kml.contains("<east>8</east>"));
    assert!(kml.contains("<west>-7.125</west>"));
    assert!(kml.contains("<rotation>0</rotation>"));
    assert_eq!(kml.matches("<GroundOverlay>").count(), 1);
    assert!(kml.trim_end().ends_with("</kml>"));

    let empty = OverlayDocument::new("empty").to_kml();
    assert_eq!(empty.matches("<GroundOverlay>").count(), 0);
    assert!(empty.contains("<Folder>"));
}
