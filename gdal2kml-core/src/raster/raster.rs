//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::{Error, Result};
use std::fmt;
use tile_layout::{AffineTransform, PixelRect};

/// Authority of a coordinate reference system, e.g. EPSG 4326
#[derive(PartialEq, Clone, Debug)]
pub struct Authority {
    pub name: String,
    pub code: String,
}

impl Authority {
    pub fn new(name: &str, code: &str) -> Authority {
        Authority {
            name: name.to_string(),
            code: code.to_string(),
        }
    }
    pub fn wgs84() -> Authority {
        Authority::new("EPSG", "4326")
    }
    pub fn is_wgs84(&self) -> bool {
        self.name.eq_ignore_ascii_case("EPSG") && self.code == "4326"
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.code)
    }
}

/// Read-only georeferenced raster
pub trait RasterSource {
    /// Name for log and error messages
    fn description(&self) -> String;
    /// Image size in pixels (width, height)
    fn size(&self) -> (u32, u32);
    fn band_count(&self) -> usize;
    fn geo_transform(&self) -> Result<AffineTransform>;
    /// CRS authority, `None` for rasters without spatial reference
    fn authority(&self) -> Result<Option<Authority>>;
    /// 8 bit samples of `rect`, pixel interleaved, rows top to bottom.
    /// `rect` must lie within the image.
    fn read_window(&self, rect: &PixelRect) -> Result<Vec<u8>>;

    /// Fail unless the raster is in EPSG:4326
    fn check_wgs84(&self) -> Result<Authority> {
        match self.authority()? {
            Some(authority) => {
                info!("Source CRS: {}", authority);
                if authority.is_wgs84() {
                    Ok(authority)
                } else {
                    error!(
                        "Input file is not in standard CRS. Should be EPSG 4326 but is {}",
                        authority
                    );
                    Err(Error::UnsupportedCrs(authority.to_string()))
                }
            }
            None => Err(Error::InvalidInput(format!(
                "{} has no spatial reference",
                self.description()
            ))),
        }
    }
}
