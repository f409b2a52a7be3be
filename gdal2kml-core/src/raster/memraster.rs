//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::{Error, Result};
use crate::raster::raster::{Authority, RasterSource};
use tile_layout::{AffineTransform, PixelRect};

/// In-memory raster with pixel interleaved 8 bit bands
#[derive(Clone, Debug)]
pub struct MemRaster {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub bands: usize,
    pub data: Vec<u8>,
    pub transform: AffineTransform,
    pub authority: Option<Authority>,
}

impl MemRaster {
    /// EPSG:4326 raster filled with a diagonal gradient
    pub fn new(width: u32, height: u32, bands: usize, transform: AffineTransform) -> MemRaster {
        let mut data = Vec::with_capacity(width as usize * height as usize * bands);
        for y in 0..height {
            for x in 0..width {
                for band in 0..bands {
                    data.push(((x + y + band as u32 * 85) % 256) as u8);
                }
            }
        }
        MemRaster {
            name: "memory".to_string(),
            width,
            height,
            bands,
            data,
            transform,
            authority: Some(Authority::wgs84()),
        }
    }
    pub fn with_authority(mut self, authority: Option<Authority>) -> MemRaster {
        self.authority = authority;
        self
    }
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = (y as usize * self.width as usize + x as usize) * self.bands;
        &self.data[start..start + self.bands]
    }
}

impl RasterSource for MemRaster {
    fn description(&self) -> String {
        self.name.clone()
    }
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
    fn band_count(&self) -> usize {
        self.bands
    }
    fn geo_transform(&self) -> Result<AffineTransform> {
        Ok(self.transform)
    }
    fn authority(&self) -> Result<Option<Authority>> {
        Ok(self.authority.clone())
    }
    fn read_window(&self, rect: &PixelRect) -> Result<Vec<u8>> {
        if !rect.fits_within(self.width, self.height) {
            return Err(Error::OutOfBounds {
                rect: *rect,
                width: self.width,
                height: self.height,
            });
        }
        let mut window = Vec::with_capacity(rect.width as usize * rect.height as usize * self.bands);
        for y in rect.y..rect.y + rect.height {
            let start = (y as usize * self.width as usize + rect.x as usize) * self.bands;
            let end = start + rect.width as usize * self.bands;
            window.extend_from_slice(&self.data[start..end]);
        }
        Ok(window)
    }
}
