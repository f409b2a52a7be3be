//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::Result;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tile_layout::TileCell;

/// Grid cells to omit, identified by `"{row},{column}"`
#[derive(Clone, Debug, Default)]
pub struct ExclusionSet {
    ids: HashSet<String>,
}

impl ExclusionSet {
    pub fn new() -> ExclusionSet {
        ExclusionSet::default()
    }
    /// One identifier per line, trailing whitespace and blank lines ignored
    pub fn from_reader<R: BufRead>(reader: R) -> Result<ExclusionSet> {
        let mut set = ExclusionSet::new();
        for line in reader.lines() {
            let line = line?;
            let id = line.trim_end();
            if !id.is_empty() {
                set.insert(id);
            }
        }
        Ok(set)
    }
    /// Read exclusion file, a missing file excludes nothing
    pub fn load(path: &Path) -> Result<ExclusionSet> {
        if !path.exists() {
            return Ok(ExclusionSet::new());
        }
        debug!("Using exclude file {}", path.display());
        let set = ExclusionSet::from_reader(BufReader::new(File::open(path)?))?;
        debug!("Excluded tiles: {:?}", set.ids);
        Ok(set)
    }
    /// Conventional exclusion file next to the source image
    pub fn sibling_path(source: &Path, extension: &str) -> PathBuf {
        source.with_extension(extension)
    }
    pub fn insert(&mut self, id: &str) {
        self.ids.insert(id.to_string());
    }
    pub fn contains(&self, cell: &TileCell) -> bool {
        self.ids.contains(&cell.id())
    }
    pub fn len(&self) -> usize {
        self.ids.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
