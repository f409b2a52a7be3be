//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile layouts

use crate::cell_iterator::CellIterator;
use std::error::Error;
use std::fmt;

/// Pixel dimensions of the usable image area (source size minus border crop)
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// Grid dimensions (columns x rows)
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct TileLayout {
    pub columns: u32,
    pub rows: u32,
}

/// Grid cell, 0-based
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct TileCell {
    pub column: u32,
    pub row: u32,
}

/// Pixel rectangle in source image coordinates
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(PartialEq, Clone, Debug)]
pub enum LayoutError {
    /// Canvas without pixels, e.g. after cropping a too wide border
    EmptyCanvas { width: i64, height: i64 },
    /// Target tile edge length of 0
    ZeroTarget,
    /// All candidate layouts were invalid
    NoCandidate { width: u32, height: u32, target: u32 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::EmptyCanvas { width, height } => {
                write!(f, "Canvas size {}x{} has no pixels", width, height)
            }
            LayoutError::ZeroTarget => write!(f, "Tile size must be greater than 0"),
            LayoutError::NoCandidate {
                width,
                height,
                target,
            } => write!(
                f,
                "No valid tile layout for canvas {}x{} with tile size {}",
                width, height, target
            ),
        }
    }
}

impl Error for LayoutError {}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Canvas {
        Canvas { width, height }
    }
    /// Canvas of an image with `border` pixels cropped on every side
    pub fn cropped(image_width: u32, image_height: u32, border: u32) -> Result<Canvas, LayoutError> {
        let width = image_width as i64 - 2 * border as i64;
        let height = image_height as i64 - 2 * border as i64;
        if width <= 0 || height <= 0 {
            return Err(LayoutError::EmptyCanvas { width, height });
        }
        Ok(Canvas::new(width as u32, height as u32))
    }
    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }
    fn dim(&self, axis: usize) -> u32 {
        if axis == 0 {
            self.width
        } else {
            self.height
        }
    }
}

impl TileCell {
    pub fn new(column: u32, row: u32) -> TileCell {
        TileCell { column, row }
    }
    /// Identifier used in exclusion files: `"{row},{column}"`
    pub fn id(&self) -> String {
        format!("{},{}", self.row, self.column)
    }
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> PixelRect {
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }
    pub fn top_left(&self) -> (u32, u32) {
        (self.x, self.y)
    }
    /// Exclusive bottom-right corner, saturating at `u32::MAX`
    pub fn bottom_right(&self) -> (u32, u32) {
        (
            self.x.saturating_add(self.width),
            self.y.saturating_add(self.height),
        )
    }
    /// Whether the rectangle lies within an image of `width` x `height`
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(height)
    }
}

impl TileLayout {
    pub fn new(columns: u32, rows: u32) -> TileLayout {
        TileLayout { columns, rows }
    }

    /// Grid with the fewest cells of edge length about `target` covering `canvas`
    pub fn solve(canvas: &Canvas, target: u32) -> Result<TileLayout, LayoutError> {
        if target == 0 {
            return Err(LayoutError::ZeroTarget);
        }
        if canvas.width == 0 || canvas.height == 0 {
            return Err(LayoutError::EmptyCanvas {
                width: canvas.width as i64,
                height: canvas.height as i64,
            });
        }
        let best_case = best_case(canvas, target);

        // Trivial cases
        if canvas.width <= target {
            return Ok(TileLayout::new(1, ceil_count(best_case)));
        }
        if canvas.height <= target {
            return Ok(TileLayout::new(ceil_count(best_case), 1));
        }

        let mut candidates = TileLayout::candidates(canvas, target);
        // stable: first candidate wins on equal counts
        candidates.sort_by_key(|layout| layout.count());
        candidates
            .into_iter()
            .next()
            .ok_or(LayoutError::NoCandidate {
                width: canvas.width,
                height: canvas.height,
                target,
            })
    }

    /// Brute force candidates in generation order.
    ///
    /// For each axis the ideal count is rounded up and down and the other axis
    /// is derived from the best case cell count. Rounding down to zero
    /// yields no candidate.
    pub fn candidates(canvas: &Canvas, target: u32) -> Vec<TileLayout> {
        let best_case = best_case(canvas, target);
        let mut candidates = Vec::with_capacity(4);
        for axis in 0..2 {
            let ratio = canvas.dim(axis) as f64 / target as f64;
            for driving in [ratio.ceil(), ratio.floor()].iter() {
                if *driving < 1.0 {
                    continue;
                }
                let driving = *driving as u32;
                let derived = ceil_count(best_case / driving as f64);
                candidates.push(if axis == 0 {
                    TileLayout::new(driving, derived)
                } else {
                    TileLayout::new(derived, driving)
                });
            }
        }
        candidates
    }

    /// Total number of cells
    pub fn count(&self) -> u64 {
        self.columns as u64 * self.rows as u64
    }

    /// Regular tile size in pixels, rounded down
    pub fn tile_size(&self, canvas: &Canvas) -> (u32, u32) {
        (canvas.width / self.columns, canvas.height / self.rows)
    }

    /// Source pixel rectangle of a cell.
    ///
    /// The last column and row extend to the canvas edge, so the grid always
    /// covers the whole canvas. `border` is the crop offset into the source.
    pub fn cell_rect(&self, canvas: &Canvas, border: u32, cell: &TileCell) -> PixelRect {
        let (tile_w, tile_h) = self.tile_size(canvas);
        let x = cell.column * tile_w;
        let y = cell.row * tile_h;
        let width = if cell.column + 1 >= self.columns {
            canvas.width - x
        } else {
            tile_w
        };
        let height = if cell.row + 1 >= self.rows {
            canvas.height - y
        } else {
            tile_h
        };
        PixelRect::new(border + x, border + y, width, height)
    }

    /// Row-major iterator over all cells
    pub fn cells(&self) -> CellIterator {
        CellIterator::new(self.columns, self.rows)
    }
}

/// Cell count with tiles of exactly `target` x `target` pixels
fn best_case(canvas: &Canvas, target: u32) -> f64 {
    canvas.area() / (target as f64 * target as f64)
}

fn ceil_count(value: f64) -> u32 {
    let count = value.ceil();
    if count < 1.0 {
        1
    } else {
        count as u32
    }
}
