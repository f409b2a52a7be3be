//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use std::io;
use std::path::PathBuf;
use tile_layout::{LayoutError, PixelRect, ProjectionError};

pub type Result<T> = std::result::Result<T, Error>;

/// Overlay generation and packaging errors
///
/// None of these are transient: every variant aborts the current run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unreadable or non-georeferenced source
    #[error("Not a valid georeferenced image: {0}")]
    InvalidInput(String),

    #[error("Input file is not in standard CRS. Should be EPSG 4326 but is {0}")]
    UnsupportedCrs(String),

    #[error(transparent)]
    UnsupportedProjection(#[from] ProjectionError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Requested pixel rectangle exceeds the source extent
    #[error("Pixel range outside image data: {rect:?} exceeds image size {width}x{height}")]
    OutOfBounds {
        rect: PixelRect,
        width: u32,
        height: u32,
    },

    /// Image reference which could not be resolved
    #[error("Unable to find image: {}", .0.display())]
    MissingAsset(PathBuf),

    #[error("Invalid document {}: {msg}", .path.display())]
    InvalidDocument { path: PathBuf, msg: String },

    #[error("Error encoding {}: {msg}", .path.display())]
    Encode { path: PathBuf, msg: String },

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Tile generation cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] io::Error),
}
