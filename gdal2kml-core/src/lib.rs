//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod core;
mod error;
pub mod kml;
pub mod output;
pub mod raster;

pub use crate::error::{Error, Result};
