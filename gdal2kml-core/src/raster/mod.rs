//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod jpeg;
pub mod memraster;
pub mod raster;

pub use self::jpeg::JpegEncoder;
pub use self::memraster::MemRaster;
pub use self::raster::{Authority, RasterSource};
