//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{ArgMatches, ErrorKind};
use dotenv::dotenv;
use gdal2kml::logger::init_logger;
use gdal2kml::runtime_config::{config_from_args, kml2kmz_app, packager_from_args};
use gdal2kml_core::Error;
use gdal2kml_service::default_archive_path;
use std::path::{Path, PathBuf};
use std::process;

fn usage_error(msg: &str) -> ! {
    clap::Error::with_description(msg, ErrorKind::ValueValidation).exit()
}

fn run(args: &ArgMatches<'_>, source: &Path) -> Result<(), String> {
    let config = config_from_args(args)?;
    let packager = packager_from_args(&config)?;
    let archive = args
        .value_of("outfile")
        .map(PathBuf::from)
        .unwrap_or_else(|| default_archive_path(source));
    info!("Output to {}", archive.display());
    packager
        .repackage(source, &archive)
        .map_err(|e| match e {
            Error::MissingAsset(_) => usage_error(&e.to_string()),
            e => e.to_string(),
        })?;
    Ok(())
}

fn main() {
    dotenv().ok();
    let args = kml2kmz_app(crate_version!()).get_matches();
    init_logger(&args);

    let source = Path::new(args.value_of("src_file").unwrap_or_default());
    if !source.exists() {
        usage_error(&format!("Unable to find KML: {}", source.display()));
    }
    if let Err(e) = run(&args, source) {
        error!("{}", e);
        process::exit(1);
    }
    info!("Finished");
}
