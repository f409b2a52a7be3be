//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use std::env;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

/// Output directory for tile images
#[derive(Clone, Debug)]
pub struct TileDirectory {
    pub basepath: PathBuf,
}

impl TileDirectory {
    pub fn new(basepath: &Path) -> TileDirectory {
        TileDirectory {
            basepath: basepath.to_path_buf(),
        }
    }
    /// Default tile directory: document path with `extension`
    pub fn for_document(document: &Path, extension: &str) -> TileDirectory {
        TileDirectory::new(&document.with_extension(extension))
    }
    pub fn info(&self) -> String {
        format!("Tile directory: {}", self.basepath.display())
    }
    /// Create directory including parents
    pub fn create(&self) -> Result<(), io::Error> {
        fs::create_dir_all(&self.basepath)
    }
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.basepath.join(file_name)
    }
}

/// Temporary sibling path used while `path` is being written
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".part");
    path.with_file_name(name)
}

/// Write `obj` to a temporary file and rename it to `path` on success
pub fn write_atomic(path: &Path, obj: &[u8]) -> Result<(), io::Error> {
    let partial = partial_path(path);
    debug!("write {} via {}", path.display(), partial.display());
    let result = File::create(&partial).and_then(|mut f| {
        f.write_all(obj)?;
        f.sync_all()
    });
    if let Err(e) = result.and_then(|_| fs::rename(&partial, path)) {
        let _ = fs::remove_file(&partial);
        return Err(e);
    }
    Ok(())
}

/// Lexically normalized components, `.` dropped and `..` resolved where possible
fn normalize(path: &Path) -> Vec<Component<'_>> {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for c in path.components() {
        match c {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(c),
            },
            c => parts.push(c),
        }
    }
    parts
}

fn absolute(path: &Path) -> Result<PathBuf, io::Error> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

/// Tile directory relative to the document directory, with `/` separators.
///
/// Relative paths are resolved against the working directory when they
/// cannot be compared lexically.
pub fn href_dir(tile_dir: &Path, document: &Path) -> Result<String, io::Error> {
    let doc_dir = document.parent().unwrap_or_else(|| Path::new(""));
    let comparable = tile_dir.is_absolute() == doc_dir.is_absolute()
        && !normalize(tile_dir).contains(&Component::ParentDir)
        && !normalize(doc_dir).contains(&Component::ParentDir);
    let (doc_dir, tile_dir) = if comparable {
        (doc_dir.to_path_buf(), tile_dir.to_path_buf())
    } else {
        (absolute(doc_dir)?, absolute(tile_dir)?)
    };
    let base = normalize(&doc_dir);
    let target = normalize(&tile_dir);
    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let parts: Vec<String> = base[common..]
        .iter()
        .map(|_| "..".to_string())
        .chain(
            target[common..]
                .iter()
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        )
        .collect();
    Ok(parts.join("/"))
}
