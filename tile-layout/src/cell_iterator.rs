//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Grid cell iterator

use crate::layout::TileCell;

/// Row-major iterator (row 0 all columns, then row 1, ...)
pub struct CellIterator {
    column: u32,
    row: u32,
    columns: u32,
    rows: u32,
    finished: bool,
}

impl CellIterator {
    pub fn new(columns: u32, rows: u32) -> CellIterator {
        CellIterator {
            column: 0,
            row: 0,
            columns,
            rows,
            // Return "empty" iterator for empty grids
            finished: columns == 0 || rows == 0,
        }
    }
}

impl Iterator for CellIterator {
    type Item = TileCell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let current = TileCell::new(self.column, self.row);
        if self.column < self.columns - 1 {
            self.column += 1;
        } else if self.row < self.rows - 1 {
            self.row += 1;
            self.column = 0;
        } else {
            self.finished = true;
        }
        Some(current)
    }
}

#[test]
fn test_row_major_iter() {
    let cells = CellIterator::new(3, 2)
        .map(|cell| (cell.column, cell.row))
        .collect::<Vec<_>>();
    assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);

    let cells = CellIterator::new(1, 1).collect::<Vec<_>>();
    assert_eq!(cells, vec![TileCell::new(0, 0)]);
}

#[test]
fn test_empty_grid() {
    assert_eq!(CellIterator::new(0, 5).count(), 0);
    assert_eq!(CellIterator::new(5, 0).count(), 0);
}
