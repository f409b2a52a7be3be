//! Tile layout calculations for georeferenced image overlays
//!
//! ## Layout solver
//!
//! ```rust
//! use tile_layout::{Canvas, TileLayout};
//!
//! let canvas = Canvas::new(3000, 2000);
//! let layout = TileLayout::solve(&canvas, 1024).unwrap();
//! assert_eq!((layout.columns, layout.rows), (3, 2));
//! assert_eq!(layout.tile_size(&canvas), (1000, 1000));
//! ```
//!
//! ## Cell iterator
//!
//! ```rust
//! use tile_layout::TileLayout;
//!
//! let layout = TileLayout::new(2, 2);
//! let ids: Vec<String> = layout.cells().map(|cell| cell.id()).collect();
//! assert_eq!(ids, vec!["0,0", "0,1", "1,0", "1,1"]);
//! ```
//!
//! ## Georeferencing
//!
//! ```rust
//! use tile_layout::{AffineTransform, GeoBounds};
//!
//! let transform = AffineTransform::from_coefficients([0.0, 1.0, 0.0, 0.0, 0.0, -1.0]);
//! let bounds = transform.bounds_for_rect((0, 0), (10, 10)).unwrap();
//! assert_eq!(
//!     bounds,
//!     GeoBounds {
//!         north: 0.0,
//!         south: -10.0,
//!         east: 10.0,
//!         west: 0.0,
//!     }
//! );
//! ```

mod affine;
mod cell_iterator;
mod layout;

pub use affine::{AffineTransform, GeoBounds, ProjectionError};
pub use cell_iterator::CellIterator;
pub use layout::{Canvas, LayoutError, PixelRect, TileCell, TileLayout};
