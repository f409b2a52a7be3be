//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::tile_extractor::TileExtractor;
use gdal2kml_core::core::config::DEFAULT_CONFIG;
use gdal2kml_core::core::{ApplicationCfg, Config, EdgePolicy, ExclusionSet, TilingCfg};
use gdal2kml_core::kml::OverlayDocumentBuilder;
use gdal2kml_core::output::{href_dir, write_atomic, TileDirectory};
use gdal2kml_core::raster::RasterSource;
use gdal2kml_core::{Error, Result};
use pbr::ProgressBar;
use std::io::{stderr, Stderr};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tile_layout::{Canvas, TileLayout};

/// Options of a tiling run
#[derive(Clone, Debug)]
pub struct TilingOptions {
    pub tile_size: u32,
    pub border: u32,
    pub quality: u8,
    pub draw_order: i32,
    /// KML folder name, source file stem if `None`
    pub name: Option<String>,
    /// Tile directory, derived from the document path if `None`
    pub dir: Option<PathBuf>,
    pub on_edge: EdgePolicy,
    pub exclude_extension: String,
    pub tiles_extension: String,
    pub progress: bool,
}

impl Default for TilingOptions {
    fn default() -> Self {
        let cfg = TilingCfg::default();
        TilingOptions {
            tile_size: cfg.tile_size,
            border: cfg.border,
            quality: cfg.quality,
            draw_order: cfg.draw_order,
            name: None,
            dir: None,
            on_edge: EdgePolicy::Fail,
            exclude_extension: cfg.exclude_extension,
            tiles_extension: cfg.tiles_extension,
            progress: false,
        }
    }
}

impl<'a> Config<'a, ApplicationCfg> for TilingOptions {
    fn from_config(config: &ApplicationCfg) -> std::result::Result<Self, String> {
        let cfg = &config.tiling;
        Ok(TilingOptions {
            tile_size: cfg.tile_size,
            border: cfg.border,
            quality: cfg.quality,
            draw_order: cfg.draw_order,
            name: cfg.name.clone(),
            dir: cfg.dir.as_ref().map(PathBuf::from),
            on_edge: EdgePolicy::from_str(&cfg.on_edge)?,
            exclude_extension: cfg.exclude_extension.clone(),
            tiles_extension: cfg.tiles_extension.clone(),
            progress: false,
        })
    }
    fn gen_config() -> String {
        DEFAULT_CONFIG.to_string()
    }
}

/// Result of a tiling run
#[derive(Clone, Debug)]
pub struct GenerationSummary {
    pub layout: TileLayout,
    /// Regular tile size in pixels
    pub tile_size: (u32, u32),
    pub tiles: usize,
    pub excluded: usize,
    pub document: PathBuf,
    pub tile_dir: PathBuf,
}

/// Tiles a georeferenced raster into JPEGs and a KML document referencing them
pub struct OverlayService {
    pub options: TilingOptions,
    cancelled: Arc<AtomicBool>,
}

impl OverlayService {
    pub fn new(options: TilingOptions) -> OverlayService {
        OverlayService {
            options,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag which stops the run before the next tile when set
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    pub fn tile_directory(&self, document: &Path) -> TileDirectory {
        match self.options.dir {
            Some(ref dir) => TileDirectory::new(dir),
            None => TileDirectory::for_document(document, &self.options.tiles_extension),
        }
    }

    /// Exclusion file next to `source`
    pub fn load_exclusions(&self, source: &Path) -> Result<ExclusionSet> {
        ExclusionSet::load(&ExclusionSet::sibling_path(
            source,
            &self.options.exclude_extension,
        ))
    }

    fn progress_bar(&self, tiles: u64) -> Option<ProgressBar<Stderr>> {
        if !self.options.progress {
            return None;
        }
        let mut pb = ProgressBar::on(stderr(), tiles);
        pb.message("Tile ");
        pb.show_speed = false;
        pb.show_percent = false;
        pb.show_time_left = false;
        Some(pb)
    }

    /// Write tiles of `raster` and the KML `document`.
    ///
    /// `source` names the tiles (`{stem}_{column}_{row}.jpg`) and the
    /// default folder.
    pub fn generate<R: RasterSource + ?Sized>(
        &self,
        raster: &R,
        source: &Path,
        document: &Path,
        exclusions: &ExclusionSet,
    ) -> Result<GenerationSummary> {
        let opts = &self.options;
        raster.check_wgs84()?;
        let (width, height) = raster.size();
        debug!("Image size: {}x{}", width, height);
        let canvas = Canvas::cropped(width, height, opts.border)?;
        let transform = raster.geo_transform()?;
        transform.check_axis_aligned()?;

        let layout = TileLayout::solve(&canvas, opts.tile_size)?;
        let tile_size = layout.tile_size(&canvas);
        info!(
            "Using tile layout {}x{} -> {}x{} pixels",
            layout.columns, layout.rows, tile_size.0, tile_size.1
        );

        let tile_dir = self.tile_directory(document);
        tile_dir.create()?;
        info!("{}", tile_dir.info());

        let base = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidInput(format!("{}", source.display())))?;
        let name = opts.name.clone().unwrap_or_else(|| base.clone());
        let builder = OverlayDocumentBuilder::new(
            &name,
            opts.draw_order,
            &href_dir(&tile_dir.basepath, document)?,
        );
        let extractor = TileExtractor::new(opts.quality, opts.on_edge);
        let mut pb = self.progress_bar(layout.count());

        let overlays = builder.build(&layout, exclusions, |cell| {
            if self.cancelled.load(Ordering::Relaxed) {
                return Err(Error::Cancelled);
            }
            let rect = layout.cell_rect(&canvas, opts.border, cell);
            let file_name = format!("{}_{}_{}.jpg", base, cell.column, cell.row);
            let written = extractor.extract(raster, &rect, &tile_dir.path(&file_name))?;
            let bounds = transform.bounds_for_rect(written.top_left(), written.bottom_right())?;
            if let Some(ref mut pb) = pb {
                pb.inc();
            }
            Ok((file_name, bounds))
        })?;
        if let Some(ref mut pb) = pb {
            pb.finish();
        }

        write_atomic(document, overlays.to_kml().as_bytes())?;
        info!(
            "Wrote {} with {} overlays",
            document.display(),
            overlays.entries.len()
        );
        Ok(GenerationSummary {
            layout,
            tile_size,
            tiles: overlays.entries.len(),
            excluded: layout.count() as usize - overlays.entries.len(),
            document: document.to_path_buf(),
            tile_dir: tile_dir.basepath,
        })
    }

    /// Open `source` with GDAL and generate tiles and `document`
    #[cfg(feature = "with-gdal")]
    pub fn generate_from_file(&self, source: &Path, document: &Path) -> Result<GenerationSummary> {
        let raster = gdal2kml_gdal::GdalRaster::open(source)?;
        let exclusions = self.load_exclusions(source)?;
        self.generate(&raster, source, document, &exclusions)
    }
}
