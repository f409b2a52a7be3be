//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use serde::Deserialize;
use std::fs::File;
use std::io::prelude::*;
use std::str::FromStr;
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, String>;
    /// Generate configuration template
    fn gen_config() -> String;
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ApplicationCfg {
    #[serde(default)]
    pub tiling: TilingCfg,
    #[serde(default)]
    pub package: PackageCfg,
}

#[derive(Deserialize, Clone, Debug)]
pub struct TilingCfg {
    /// Max tile edge length in pixels
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
    /// Border cropped on every side, in pixels
    #[serde(default)]
    pub border: u32,
    /// JPEG quality (0-100)
    #[serde(default = "default_quality")]
    pub quality: u8,
    /// KML draw order of all overlays
    #[serde(default = "default_draw_order")]
    pub draw_order: i32,
    /// KML folder name (Default: source file name without extension)
    pub name: Option<String>,
    /// Tile directory (Default: destination with extension `tiles_extension`)
    pub dir: Option<String>,
    /// Tiles exceeding the image: "fail" or "clamp"
    #[serde(default = "default_on_edge")]
    pub on_edge: String,
    #[serde(default = "default_exclude_extension")]
    pub exclude_extension: String,
    #[serde(default = "default_tiles_extension")]
    pub tiles_extension: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct PackageCfg {
    /// Archive directory for images
    #[serde(default = "default_asset_dir")]
    pub asset_dir: String,
    /// Archive name of the KML document
    #[serde(default = "default_document")]
    pub document: String,
    /// Images with equal file names: "rename" or "overwrite"
    #[serde(default = "default_collisions")]
    pub collisions: String,
}

pub fn default_tile_size() -> u32 {
    1024
}

pub fn default_quality() -> u8 {
    75
}

pub fn default_draw_order() -> i32 {
    20
}

fn default_on_edge() -> String {
    "fail".to_string()
}

fn default_exclude_extension() -> String {
    "exclude".to_string()
}

fn default_tiles_extension() -> String {
    "files".to_string()
}

fn default_asset_dir() -> String {
    "files".to_string()
}

fn default_document() -> String {
    "doc.kml".to_string()
}

fn default_collisions() -> String {
    "rename".to_string()
}

impl Default for TilingCfg {
    fn default() -> Self {
        TilingCfg {
            tile_size: default_tile_size(),
            border: 0,
            quality: default_quality(),
            draw_order: default_draw_order(),
            name: None,
            dir: None,
            on_edge: default_on_edge(),
            exclude_extension: default_exclude_extension(),
            tiles_extension: default_tiles_extension(),
        }
    }
}

impl Default for PackageCfg {
    fn default() -> Self {
        PackageCfg {
            asset_dir: default_asset_dir(),
            document: default_document(),
            collisions: default_collisions(),
        }
    }
}

/// Handling of tile rectangles reaching beyond the source image
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum EdgePolicy {
    /// Abort with an out of bounds error
    Fail,
    /// Shrink the rectangle to the image extent
    Clamp,
}

impl FromStr for EdgePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail" => Ok(EdgePolicy::Fail),
            "clamp" => Ok(EdgePolicy::Clamp),
            _ => Err(format!("Unknown edge policy '{}' (expected fail or clamp)", s)),
        }
    }
}

/// Handling of archive images sharing a file name
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum CollisionPolicy {
    /// Store later images as `<stem>_<n>.<ext>`
    Rename,
    /// Later images replace earlier ones
    Overwrite,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rename" => Ok(CollisionPolicy::Rename),
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            _ => Err(format!(
                "Unknown collision policy '{}' (expected rename or overwrite)",
                s
            )),
        }
    }
}

pub const DEFAULT_CONFIG: &'static str = r#"
[tiling]
tile_size = 1024
border = 0
quality = 75
draw_order = 20
#name = "My map"
#dir = "tiles"
on_edge = "fail"
exclude_extension = "exclude"
tiles_extension = "files"

[package]
asset_dir = "files"
document = "doc.kml"
collisions = "rename"
"#;

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(format!("Error while reading config: [{}]", err));
    };

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T, String> {
    config_toml
        .parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| format!("{} - {}", path, err))
}
