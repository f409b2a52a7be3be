//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use gdal2kml_core::core::EdgePolicy;
use gdal2kml_core::raster::{JpegEncoder, RasterSource};
use gdal2kml_core::{Error, Result};
use std::path::Path;
use tile_layout::PixelRect;

/// Writes one JPEG per pixel rectangle of a raster
pub struct TileExtractor {
    encoder: JpegEncoder,
    on_edge: EdgePolicy,
}

impl TileExtractor {
    pub fn new(quality: u8, on_edge: EdgePolicy) -> TileExtractor {
        TileExtractor {
            encoder: JpegEncoder::new(quality),
            on_edge,
        }
    }

    /// Rectangle to read for `rect` according to the edge policy
    pub fn clip<R: RasterSource + ?Sized>(&self, raster: &R, rect: &PixelRect) -> Result<PixelRect> {
        let (width, height) = raster.size();
        let out_of_bounds = Error::OutOfBounds {
            rect: *rect,
            width,
            height,
        };
        if rect.width == 0 || rect.height == 0 || rect.x >= width || rect.y >= height {
            return Err(out_of_bounds);
        }
        if rect.fits_within(width, height) {
            return Ok(*rect);
        }
        let (right, bottom) = rect.bottom_right();
        match self.on_edge {
            EdgePolicy::Fail => {
                error!("Pixel range outside image data!");
                error!(
                    "Image size {}x{}, trying to get at x={} y={}",
                    width, height, right, bottom
                );
                Err(out_of_bounds)
            }
            EdgePolicy::Clamp => {
                let clamped = PixelRect::new(
                    rect.x,
                    rect.y,
                    right.min(width) - rect.x,
                    bottom.min(height) - rect.y,
                );
                warn!("Clamping tile {:?} to {:?}", rect, clamped);
                Ok(clamped)
            }
        }
    }

    /// Write the JPEG for `rect` to `path` and return the rectangle written
    pub fn extract<R: RasterSource + ?Sized>(
        &self,
        raster: &R,
        rect: &PixelRect,
        path: &Path,
    ) -> Result<PixelRect> {
        let rect = self.clip(raster, rect)?;
        let pixels = raster.read_window(&rect)?;
        self.encoder
            .write(path, &pixels, rect.width, rect.height, raster.band_count())?;
        debug!("Tile {} {:?}", path.display(), rect);
        Ok(rect)
    }
}
