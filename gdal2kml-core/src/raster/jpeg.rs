//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::{Error, Result};
use image::codecs::jpeg;
use image::ExtendedColorType;
use std::fs;
use std::path::Path;

/// JPEG tile encoder for 8 bit rasters
#[derive(Clone, Debug)]
pub struct JpegEncoder {
    quality: u8,
}

impl JpegEncoder {
    /// Quality is clamped to 1..=100
    pub fn new(quality: u8) -> JpegEncoder {
        JpegEncoder {
            quality: quality.max(1).min(100),
        }
    }
    pub fn quality(&self) -> u8 {
        self.quality
    }
    /// Encode pixel interleaved samples with `bands` bands.
    ///
    /// One or two bands are written as grayscale, three or more as RGB.
    /// Alpha and further bands are dropped.
    pub fn encode(&self, pixels: &[u8], width: u32, height: u32, bands: usize) -> Result<Vec<u8>> {
        let (samples, color_type) = match bands {
            0 => return Err(Error::InvalidInput("Raster without bands".to_string())),
            1 => (pixels.to_vec(), ExtendedColorType::L8),
            2 => (select_bands(pixels, bands, 1), ExtendedColorType::L8),
            3 => (pixels.to_vec(), ExtendedColorType::Rgb8),
            _ => (select_bands(pixels, bands, 3), ExtendedColorType::Rgb8),
        };
        let mut buf = Vec::new();
        let mut encoder = jpeg::JpegEncoder::new_with_quality(&mut buf, self.quality);
        encoder
            .encode(&samples, width, height, color_type)
            .map_err(|e| Error::Encode {
                path: Path::new("<memory>").to_path_buf(),
                msg: e.to_string(),
            })?;
        Ok(buf)
    }
    /// Encode and write to `path`
    pub fn write(
        &self,
        path: &Path,
        pixels: &[u8],
        width: u32,
        height: u32,
        bands: usize,
    ) -> Result<()> {
        let jpeg = self
            .encode(pixels, width, height, bands)
            .map_err(|e| match e {
                Error::Encode { msg, .. } => Error::Encode {
                    path: path.to_path_buf(),
                    msg,
                },
                e => e,
            })?;
        fs::write(path, jpeg)?;
        Ok(())
    }
}

/// First `keep` samples of every pixel
fn select_bands(pixels: &[u8], bands: usize, keep: usize) -> Vec<u8> {
    pixels
        .chunks(bands)
        .flat_map(|pixel| pixel[..keep].iter().cloned())
        .collect()
}
