//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod filewriter;

pub use self::filewriter::{href_dir, partial_path, write_atomic, TileDirectory};
