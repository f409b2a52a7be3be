//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use clap::{App, Arg, ArgMatches};
use gdal2kml_core::core::config::DEFAULT_CONFIG;
use gdal2kml_core::core::{parse_config, read_config, ApplicationCfg, Config, EdgePolicy};
use gdal2kml_service::{KmzPackager, TilingOptions};
use std::path::PathBuf;
use std::str::FromStr;

pub fn gdal2kml_app<'a, 'b>(version: &'b str) -> App<'a, 'b> {
    App::new("gdal2kml")
        .version(version)
        .author("Pirmin Kalberer <pka@sourcepole.ch>")
        .about("Tile a georeferenced raster into JPEG ground overlays described by a KML file")
        .arg(Arg::from_usage("[src_file] 'Source raster (EPSG:4326)'").required_unless("genconfig"))
        .arg(Arg::from_usage("[dst_file] 'Destination KML file'").required_unless("genconfig"))
        .args_from_usage("-d, --dir=[DIR] 'Tile directory (Default: <dst_file>.files)'
                          -c, --crop=[PIXELS] 'Crop border of PIXELS on every side'
                          -n, --name=[NAME] 'KML folder name (Default: source file name)'
                          -o, --draw-order=[ORDER] 'KML draw order (Default: 20)'
                          -t, --tile-size=[PIXELS] 'Maximal tile edge length (Default: 1024)'
                          -q, --quality=[QUALITY] 'JPEG quality 1-100 (Default: 75)'
                          --on-edge=[fail|clamp] 'Tiles reaching beyond the image (Default: fail)'
                          --config=[FILE] 'Load from custom config file'
                          --progress 'Show progress bar'
                          --genconfig 'Print configuration template'
                          --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                          -v, --verbose 'Verbose output'")
}

pub fn kml2kmz_app<'a, 'b>(version: &'b str) -> App<'a, 'b> {
    App::new("kml2kmz")
        .version(version)
        .author("Pirmin Kalberer <pka@sourcepole.ch>")
        .about("Convert KML file to KMZ (Garmin CustomMap) file")
        .arg(Arg::from_usage("<src_file> 'Source KML file'"))
        .args_from_usage("-o, --outfile=[FILE] 'Write output to FILE (Default: <src_file>.kmz)'
                          --config=[FILE] 'Load from custom config file'
                          --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                          -v, --verbose 'Verbose output'")
}

pub fn config_from_args(args: &ArgMatches<'_>) -> Result<ApplicationCfg, String> {
    match args.value_of("config") {
        Some(cfgpath) => {
            info!("Reading configuration from '{}'", cfgpath);
            read_config(cfgpath)
        }
        None => parse_config(DEFAULT_CONFIG.to_string(), ""),
    }
}

fn parse_arg<T: FromStr>(args: &ArgMatches<'_>, name: &str, kind: &str) -> Result<Option<T>, String> {
    args.value_of(name)
        .map(|s| {
            s.parse::<T>()
                .map_err(|_| format!("Error parsing '{}' as {} value", name, kind))
        })
        .transpose()
}

/// Tiling options from configuration, overridden by command line arguments
pub fn tiling_options_from_args(
    config: &ApplicationCfg,
    args: &ArgMatches<'_>,
) -> Result<TilingOptions, String> {
    let mut options = TilingOptions::from_config(config)?;
    if let Some(dir) = args.value_of("dir") {
        options.dir = Some(PathBuf::from(dir));
    }
    if let Some(name) = args.value_of("name") {
        options.name = Some(name.to_string());
    }
    if let Some(border) = parse_arg(args, "crop", "integer")? {
        options.border = border;
    }
    if let Some(draw_order) = parse_arg(args, "draw-order", "integer")? {
        options.draw_order = draw_order;
    }
    if let Some(tile_size) = parse_arg(args, "tile-size", "integer")? {
        options.tile_size = tile_size;
    }
    if let Some(quality) = parse_arg::<i64>(args, "quality", "integer")? {
        options.quality = quality.max(0).min(100) as u8;
    }
    if let Some(on_edge) = args.value_of("on-edge") {
        options.on_edge = EdgePolicy::from_str(on_edge)?;
    }
    options.progress = args.is_present("progress");
    Ok(options)
}

pub fn packager_from_args(config: &ApplicationCfg) -> Result<KmzPackager, String> {
    KmzPackager::from_config(config)
}
