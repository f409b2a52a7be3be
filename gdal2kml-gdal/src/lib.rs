//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;

mod gdal_raster;

pub use crate::gdal_raster::GdalRaster;

pub fn gdal_version() -> String {
    gdal::version::version_info("RELEASE_NAME")
}
