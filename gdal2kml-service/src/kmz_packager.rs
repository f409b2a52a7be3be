//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use elementtree::Element;
use gdal2kml_core::core::config::DEFAULT_CONFIG;
use gdal2kml_core::core::{ApplicationCfg, CollisionPolicy, Config, PackageCfg};
use gdal2kml_core::output::partial_path;
use gdal2kml_core::{Error, Result};
use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Repackages a KML document and the images it references into a KMZ archive
#[derive(Clone, Debug)]
pub struct KmzPackager {
    /// Archive directory of the images
    pub asset_dir: String,
    /// Archive name of the document
    pub document: String,
    pub collisions: CollisionPolicy,
}

impl Default for KmzPackager {
    fn default() -> Self {
        let cfg = PackageCfg::default();
        KmzPackager {
            asset_dir: cfg.asset_dir,
            document: cfg.document,
            collisions: CollisionPolicy::Rename,
        }
    }
}

impl<'a> Config<'a, ApplicationCfg> for KmzPackager {
    fn from_config(config: &ApplicationCfg) -> std::result::Result<Self, String> {
        let cfg = &config.package;
        Ok(KmzPackager {
            asset_dir: cfg.asset_dir.clone(),
            document: cfg.document.clone(),
            collisions: CollisionPolicy::from_str(&cfg.collisions)?,
        })
    }
    fn gen_config() -> String {
        DEFAULT_CONFIG.to_string()
    }
}

#[derive(Clone, Debug)]
pub struct PackagedAsset {
    pub source: PathBuf,
    /// Entry name inside the archive
    pub entry: String,
}

/// Result of a repackaging run
#[derive(Clone, Debug)]
pub struct PackageSummary {
    pub archive: PathBuf,
    pub references: usize,
    pub assets: Vec<PackagedAsset>,
}

/// Archive path used when none is given: the document path with extension `kmz`
pub fn default_archive_path(kml: &Path) -> PathBuf {
    kml.with_extension("kmz")
}

/// Percent-decode `text` byte-wise, each decoded byte taken as Latin-1
fn decode_latin1(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut run_start = 0;
    for (idx, c) in text.char_indices() {
        if !c.is_ascii() {
            decoded.extend(percent_decode_str(&text[run_start..idx]).map(char::from));
            decoded.push(c);
            run_start = idx + c.len_utf8();
        }
    }
    decoded.extend(percent_decode_str(&text[run_start..]).map(char::from));
    decoded
}

/// Percent-decode an image reference and strip a local file URI prefix.
///
/// Escapes forming UTF-8 are decoded as UTF-8, otherwise every escape is
/// one Latin-1 character.
pub fn decode_href(href: &str) -> String {
    let href = href.trim();
    let decoded = match percent_decode_str(href).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => decode_latin1(href),
    };
    for prefix in &["file://localhost", "file://", "file:"] {
        if let Some(path) = decoded.strip_prefix(prefix) {
            return path.to_string();
        }
    }
    decoded
}

/// Resolve a decoded reference, first as given, then relative to `base_dir`
pub fn resolve_asset(path: &str, base_dir: &Path) -> Result<PathBuf> {
    let path = PathBuf::from(path);
    if path.is_file() {
        return Ok(path);
    }
    let relative = base_dir.join(&path);
    if relative.is_file() {
        Ok(relative)
    } else {
        Err(Error::MissingAsset(relative))
    }
}

/// Archive names of the images, in order of first reference
struct AssetTable {
    collisions: CollisionPolicy,
    by_source: HashMap<PathBuf, String>,
    assets: Vec<PackagedAsset>,
}

impl AssetTable {
    fn new(collisions: CollisionPolicy) -> AssetTable {
        AssetTable {
            collisions,
            by_source: HashMap::new(),
            assets: Vec::new(),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.assets.iter().position(|a| a.entry == name)
    }

    /// Archive file name for `source`. Identical files share one entry.
    fn name_for(&mut self, source: &Path) -> Result<String> {
        let key = fs::canonicalize(source)?;
        if let Some(name) = self.by_source.get(&key) {
            return Ok(name.clone());
        }
        let basename = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::MissingAsset(source.to_path_buf()))?;
        let name = match (self.collisions, self.position(&basename)) {
            (_, None) => {
                self.assets.push(PackagedAsset {
                    source: source.to_path_buf(),
                    entry: basename.clone(),
                });
                basename
            }
            (CollisionPolicy::Overwrite, Some(idx)) => {
                warn!(
                    "{} replaces {} in archive",
                    source.display(),
                    self.assets[idx].source.display()
                );
                self.assets[idx].source = source.to_path_buf();
                basename
            }
            (CollisionPolicy::Rename, Some(_)) => {
                let name = self.unique_name(source, &basename);
                info!("Storing {} as {} to avoid a name clash", source.display(), name);
                self.assets.push(PackagedAsset {
                    source: source.to_path_buf(),
                    entry: name.clone(),
                });
                name
            }
        };
        self.by_source.insert(key, name.clone());
        Ok(name)
    }

    fn unique_name(&self, source: &Path, basename: &str) -> String {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| basename.to_string());
        let ext = source
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        (1..)
            .map(|n| format!("{}_{}{}", stem, n, ext))
            .find(|name| self.position(name).is_none())
            .unwrap_or_else(|| basename.to_string())
    }
}

fn archive_error(e: zip::result::ZipError) -> Error {
    Error::Archive(e.to_string())
}

/// Replace the text of every `href` element below `element`
fn rewrite_hrefs(
    element: &mut Element,
    rewrite: &mut dyn FnMut(&str) -> Result<String>,
) -> Result<usize> {
    let mut count = 0;
    if element.tag().name() == "href" {
        let target = rewrite(element.text())?;
        element.set_text(target);
        count += 1;
    }
    for child in element.children_mut() {
        count += rewrite_hrefs(child, rewrite)?;
    }
    Ok(count)
}

impl KmzPackager {
    fn entry_name(&self, name: &str) -> String {
        let dir = self.asset_dir.trim_matches('/');
        if dir.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", dir, name)
        }
    }

    fn read_document(kml: &Path) -> Result<Element> {
        let file = File::open(kml)?;
        let mut reader = BufReader::new(file);
        Element::from_reader(&mut reader).map_err(|e| Error::InvalidDocument {
            path: kml.to_path_buf(),
            msg: e.to_string(),
        })
    }

    /// Write `kml` and its images to the archive `kmz`.
    ///
    /// The archive is written to a partial file first and renamed when complete.
    pub fn repackage(&self, kml: &Path, kmz: &Path) -> Result<PackageSummary> {
        let mut root = Self::read_document(kml)?;
        let base_dir = kml.parent().unwrap_or_else(|| Path::new(""));
        let mut table = AssetTable::new(self.collisions);

        let references = rewrite_hrefs(&mut root, &mut |href| {
            let source = resolve_asset(&decode_href(href), base_dir)?;
            let entry = self.entry_name(&table.name_for(&source)?);
            debug!("Storing {} as {}", source.display(), entry);
            Ok(entry)
        })?;

        let mut document = Vec::new();
        root.to_writer(&mut document)
            .map_err(|e| Error::InvalidDocument {
                path: kml.to_path_buf(),
                msg: e.to_string(),
            })?;

        let assets: Vec<PackagedAsset> = table
            .assets
            .into_iter()
            .map(|a| PackagedAsset {
                entry: self.entry_name(&a.entry),
                source: a.source,
            })
            .collect();

        let partial = partial_path(kmz);
        if let Err(e) = self.write_archive(&partial, &assets, &document) {
            let _ = fs::remove_file(&partial);
            return Err(e);
        }
        fs::rename(&partial, kmz)?;
        info!(
            "Wrote {} with {} images ({} references)",
            kmz.display(),
            assets.len(),
            references
        );
        Ok(PackageSummary {
            archive: kmz.to_path_buf(),
            references,
            assets,
        })
    }

    fn write_archive(&self, path: &Path, assets: &[PackagedAsset], document: &[u8]) -> Result<()> {
        let mut zip = ZipWriter::new(File::create(path)?);
        // JPEGs are already compressed
        let stored = FileOptions::default().compression_method(CompressionMethod::Stored);
        for asset in assets {
            zip.start_file(asset.entry.as_str(), stored)
                .map_err(archive_error)?;
            let mut image = File::open(&asset.source)?;
            io::copy(&mut image, &mut zip)?;
        }
        debug!("Storing KML as {}", self.document);
        let deflated = FileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file(self.document.as_str(), deflated)
            .map_err(archive_error)?;
        zip.write_all(document)?;
        let file = zip.finish().map_err(archive_error)?;
        file.sync_all()?;
        Ok(())
    }
}
