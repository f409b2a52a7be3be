//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use gdal::errors::GdalError;
use gdal::Dataset;
use gdal2kml_core::raster::{Authority, RasterSource};
use gdal2kml_core::{Error, Result};
use std::path::{Path, PathBuf};
use tile_layout::{AffineTransform, PixelRect};

/// Raster dataset opened with GDAL
pub struct GdalRaster {
    pub path: PathBuf,
    dataset: Dataset,
}

impl GdalRaster {
    pub fn open(path: &Path) -> Result<GdalRaster> {
        let dataset = Dataset::open(path)
            .map_err(|e| Error::InvalidInput(format!("{}: {}", path.display(), e)))?;
        if dataset.raster_count() < 1 {
            return Err(Error::InvalidInput(format!(
                "{} contains no raster bands",
                path.display()
            )));
        }
        let raster = GdalRaster {
            path: path.to_path_buf(),
            dataset,
        };
        debug!("Image size: {:?}", raster.size());
        Ok(raster)
    }

    fn gdal_error(&self, e: GdalError) -> Error {
        Error::InvalidInput(format!("{}: {}", self.path.display(), e))
    }
}

impl RasterSource for GdalRaster {
    fn description(&self) -> String {
        self.path.display().to_string()
    }
    fn size(&self) -> (u32, u32) {
        let (width, height) = self.dataset.raster_size();
        (width as u32, height as u32)
    }
    fn band_count(&self) -> usize {
        self.dataset.raster_count() as usize
    }
    fn geo_transform(&self) -> Result<AffineTransform> {
        self.dataset
            .geo_transform()
            .map(AffineTransform::from_coefficients)
            .map_err(|e| self.gdal_error(e))
    }
    fn authority(&self) -> Result<Option<Authority>> {
        let mut srs = match self.dataset.spatial_ref() {
            Ok(srs) => srs,
            Err(e) => {
                debug!("No spatial reference: {}", e);
                return Ok(None);
            }
        };
        if let Ok(wkt) = srs.to_wkt() {
            debug!("{}", wkt);
        }
        if srs.auth_name().is_err() {
            // WKT without AUTHORITY node
            let _ = srs.auto_identify_epsg();
        }
        let authority = match (srs.auth_name(), srs.auth_code()) {
            (Ok(name), Ok(code)) => Authority::new(&name, &code.to_string()),
            _ => Authority::new("unknown", "unknown"),
        };
        debug!("Authority: {:?}", authority);
        Ok(Some(authority))
    }
    fn read_window(&self, rect: &PixelRect) -> Result<Vec<u8>> {
        let (width, height) = self.size();
        if !rect.fits_within(width, height) {
            return Err(Error::OutOfBounds {
                rect: *rect,
                width,
                height,
            });
        }
        let bands = self.band_count();
        let window = (rect.x as isize, rect.y as isize);
        let size = (rect.width as usize, rect.height as usize);
        let mut pixels = vec![0u8; size.0 * size.1 * bands];
        for b in 0..bands {
            let band = self
                .dataset
                .rasterband((b + 1) as _)
                .map_err(|e| self.gdal_error(e))?;
            let buf = band
                .read_as::<u8>(window, size, size, None)
                .map_err(|e| self.gdal_error(e))?;
            for (i, v) in buf.data.iter().enumerate() {
                pixels[i * bands + b] = *v;
            }
        }
        Ok(pixels)
    }
}
