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
use gdal2kml::runtime_config::{config_from_args, gdal2kml_app, tiling_options_from_args};
use gdal2kml_core::core::Config;
use gdal2kml_service::{OverlayService, TilingOptions};
use std::path::Path;
use std::process;

#[cfg(feature = "with-gdal")]
extern crate gdal2kml_gdal;

fn version_info() -> String {
    #[cfg(feature = "with-gdal")]
    let version = format!(
        "{} (GDAL version {})",
        crate_version!(),
        gdal2kml_gdal::gdal_version()
    );
    #[cfg(not(feature = "with-gdal"))]
    let version = crate_version!().to_string();
    version
}

#[cfg(feature = "with-gdal")]
fn generate(service: &OverlayService, source: &Path, document: &Path) -> Result<(), String> {
    let summary = service
        .generate_from_file(source, document)
        .map_err(|e| e.to_string())?;
    debug!("{:?}", summary);
    Ok(())
}

#[cfg(not(feature = "with-gdal"))]
fn generate(_service: &OverlayService, _source: &Path, _document: &Path) -> Result<(), String> {
    Err("gdal2kml was built without GDAL support".to_string())
}

fn run(args: &ArgMatches<'_>) -> Result<(), String> {
    let config = config_from_args(args)?;
    let options = tiling_options_from_args(&config, args)?;
    let source = Path::new(args.value_of("src_file").unwrap_or_default());
    let document = Path::new(args.value_of("dst_file").unwrap_or_default());
    generate(&OverlayService::new(options), source, document)
}

fn main() {
    dotenv().ok();
    let version_info = version_info();
    let args = gdal2kml_app(&version_info).get_matches();
    init_logger(&args);

    if args.is_present("genconfig") {
        println!("{}", TilingOptions::gen_config());
        return;
    }
    if let Some(source) = args.value_of("src_file") {
        if !Path::new(source).exists() {
            clap::Error::with_description(
                &format!("Unable to find source: {}", source),
                ErrorKind::ValueValidation,
            )
            .exit();
        }
    }
    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
    info!("Finished");
}
