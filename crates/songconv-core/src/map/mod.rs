//! Per-layout map loaders.
//!
//! - `p4` - Lua-like P4 folders
//! - `assets` - media discovery for downstream pipelines
//! - `lookup` - case-insensitive path resolution
//! - `wav` - sample rate from the map audio

mod assets;
mod lookup;
pub mod p4;
pub mod wav;

pub use assets::AssetInventory;
pub use lookup::{find_dir, find_file, find_path};

use std::path::{Path, PathBuf};

use tracing::info;

use crate::best::BestMap;
use crate::config::ConvertConfig;
use crate::detect::{self, MapType};
use crate::error::{Error, Result};
use crate::export::ExportReport;

/// Result of converting one map.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub map_type: MapType,
    /// Folder the records were written to.
    pub output_dir: PathBuf,
    pub best: BestMap,
    pub assets: AssetInventory,
    pub export: ExportReport,
}

/// Convert a map of a known layout.
pub fn convert(
    map_type: MapType,
    input: &Path,
    output: &Path,
    config: &ConvertConfig,
) -> Result<ConversionOutcome> {
    match map_type {
        MapType::P4 => p4::convert(input, output, config),
        MapType::Uaf | MapType::Now => Err(Error::UnsupportedMapType(map_type)),
    }
}

/// Detect the layout of `input`, then convert it.
pub fn detect_and_convert(
    input: &Path,
    output: &Path,
    config: &ConvertConfig,
) -> Result<ConversionOutcome> {
    let map_type = detect::detect(input)?.map_type()?;
    info!("Detected {} map in {}", map_type, input.display());
    convert(map_type, input, output, config)
}
