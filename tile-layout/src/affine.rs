//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Affine georeferencing

use std::error::Error;
use std::fmt;

/// Six coefficient pixel to geo transform in GDAL order
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct AffineTransform {
    pub origin_x: f64,
    pub pixel_width: f64,
    pub row_rotation: f64,
    pub origin_y: f64,
    pub column_rotation: f64,
    /// Negative for north-up rasters
    pub pixel_height: f64,
}

/// Bounding box in the raster's native reference system
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

#[derive(PartialEq, Clone, Debug)]
pub enum ProjectionError {
    /// Transform contains rotation or shear terms
    Rotated {
        row_rotation: f64,
        column_rotation: f64,
    },
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::Rotated {
                row_rotation,
                column_rotation,
            } => write!(
                f,
                "Source projection incompatible, transform contains rotation ({}, {})",
                row_rotation, column_rotation
            ),
        }
    }
}

impl Error for ProjectionError {}

impl AffineTransform {
    /// Transform from `[origin_x, pixel_width, row_rotation, origin_y, column_rotation, pixel_height]`
    pub fn from_coefficients(c: [f64; 6]) -> AffineTransform {
        AffineTransform {
            origin_x: c[0],
            pixel_width: c[1],
            row_rotation: c[2],
            origin_y: c[3],
            column_rotation: c[4],
            pixel_height: c[5],
        }
    }
    pub fn coefficients(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.row_rotation,
            self.origin_y,
            self.column_rotation,
            self.pixel_height,
        ]
    }
    /// Geo coordinates of pixel position (`px` column, `py` row)
    pub fn apply(&self, px: f64, py: f64) -> (f64, f64) {
        let x = self.origin_x + px * self.pixel_width + py * self.row_rotation;
        let y = self.origin_y + px * self.column_rotation + py * self.pixel_height;
        (x, y)
    }
    pub fn is_axis_aligned(&self) -> bool {
        self.row_rotation == 0.0 && self.column_rotation == 0.0
    }
    pub fn check_axis_aligned(&self) -> Result<(), ProjectionError> {
        if self.is_axis_aligned() {
            Ok(())
        } else {
            Err(ProjectionError::Rotated {
                row_rotation: self.row_rotation,
                column_rotation: self.column_rotation,
            })
        }
    }
    /// Bounds of the pixel rectangle spanned by two corners.
    ///
    /// North and west come from `top_left`, south and east from
    /// `bottom_right`. No sign correction is applied: with a positive
    /// `pixel_height` north and south are swapped.
    pub fn bounds_for_rect(
        &self,
        top_left: (u32, u32),
        bottom_right: (u32, u32),
    ) -> Result<GeoBounds, ProjectionError> {
        self.check_axis_aligned()?;
        let (west, north) = self.apply(top_left.0 as f64, top_left.1 as f64);
        let (east, south) = self.apply(bottom_right.0 as f64, bottom_right.1 as f64);
        Ok(GeoBounds {
            north,
            south,
            east,
            west,
        })
    }
}
