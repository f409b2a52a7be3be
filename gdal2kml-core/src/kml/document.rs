//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::ExclusionSet;
use crate::error::Result;
use std::fmt::Write;
use tile_layout::{GeoBounds, TileCell, TileLayout};

/// Ground overlay referencing one tile image
#[derive(PartialEq, Clone, Debug)]
pub struct OverlayEntry {
    /// Tile file name
    pub name: String,
    /// Image reference relative to the document
    pub href: String,
    pub draw_order: i32,
    pub bounds: GeoBounds,
}

/// KML folder with ground overlays in emission order
#[derive(PartialEq, Clone, Debug)]
pub struct OverlayDocument {
    pub name: String,
    pub entries: Vec<OverlayEntry>,
}

/// Collects the overlays of a tile grid
pub struct OverlayDocumentBuilder {
    folder_name: String,
    draw_order: i32,
    /// Tile directory relative to the document directory
    href_dir: String,
}

impl OverlayDocumentBuilder {
    pub fn new(folder_name: &str, draw_order: i32, href_dir: &str) -> OverlayDocumentBuilder {
        OverlayDocumentBuilder {
            folder_name: folder_name.to_string(),
            draw_order,
            href_dir: href_dir.trim_end_matches('/').to_string(),
        }
    }

    pub fn href(&self, file_name: &str) -> String {
        if self.href_dir.is_empty() || self.href_dir == "." {
            file_name.to_string()
        } else {
            format!("{}/{}", self.href_dir, file_name)
        }
    }

    /// Visit all cells of `layout` in row-major order.
    ///
    /// Excluded cells are skipped without calling `tile`. For all other cells
    /// `tile` produces the tile file name and bounds.
    pub fn build<F>(
        &self,
        layout: &TileLayout,
        exclusions: &ExclusionSet,
        mut tile: F,
    ) -> Result<OverlayDocument>
    where
        F: FnMut(&TileCell) -> Result<(String, GeoBounds)>,
    {
        let mut document = OverlayDocument::new(&self.folder_name);
        for cell in layout.cells() {
            if exclusions.contains(&cell) {
                debug!("Excluding tile {}", cell.id());
                continue;
            }
            let (name, bounds) = tile(&cell)?;
            document.entries.push(OverlayEntry {
                href: self.href(&name),
                name,
                draw_order: self.draw_order,
                bounds,
            });
        }
        Ok(document)
    }
}

impl OverlayDocument {
    pub fn new(name: &str) -> OverlayDocument {
        OverlayDocument {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    /// Serialize as KML 2.2 document
    pub fn to_kml(&self) -> String {
        let mut kml = String::new();
        kml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        kml.push('\n');
        kml.push_str(concat!(
            r#"<kml xmlns="http://www.opengis.net/kml/2.2" xmlns:gx="http://www.google.com/kml/ext/2.2" "#,
            r#"xmlns:kml="http://www.opengis.net/kml/2.2" xmlns:atom="http://www.w3.org/2005/Atom">"#
        ));
        kml.push('\n');
        kml.push_str("  <Folder>\n");
        let _ = writeln!(kml, "    <name>{}</name>", escape(&self.name));
        for entry in &self.entries {
            let _ = write!(
                kml,
                r#"    <GroundOverlay>
      <name>{name}</name>
      <color>ffffffff</color>
      <drawOrder>{order}</drawOrder>
      <Icon>
        <href>{href}</href>
        <viewBoundScale>0.75</viewBoundScale>
      </Icon>
      <LatLonBox>
        <north>{north}</north>
        <south>{south}</south>
        <east>{east}</east>
        <west>{west}</west>
        <rotation>0</rotation>
      </LatLonBox>
    </GroundOverlay>
"#,
                name = escape(&entry.name),
                order = entry.draw_order,
                href = escape(&entry.href),
                north = entry.bounds.north,
                south = entry.bounds.south,
                east = entry.bounds.east,
                west = entry.bounds.west,
            );
        }
        kml.push_str("  </Folder>\n");
        kml.push_str("</kml>\n");
        kml
    }
}

/// Escape XML special characters in text content
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
