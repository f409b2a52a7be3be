//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;

#[cfg(feature = "with-gdal")]
extern crate gdal2kml_gdal;

pub mod kmz_packager;
#[cfg(test)]
mod kmz_packager_test;
pub mod overlay_service;
pub mod tile_extractor;

pub use kmz_packager::{default_archive_path, KmzPackager, PackageSummary};
pub use overlay_service::{GenerationSummary, OverlayService, TilingOptions};
pub use tile_extractor::TileExtractor;
