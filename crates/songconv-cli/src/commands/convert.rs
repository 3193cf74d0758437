//! Convert command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use songconv_core::ConvertConfig;
use songconv_core::detect_and_convert;
use songconv_core::export::format_conversion_summary;
use tracing::{error, info, warn};

/// Settings given as flags; they win over the config file.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub sample_rate: Option<u32>,
    pub pretty: bool,
}

/// Read the optional TOML config and apply flag overrides.
pub fn load_settings(config_file: Option<&Path>, overrides: Overrides) -> Result<ConvertConfig> {
    let config = match config_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config: ConvertConfig = toml::from_str(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            config
        }
        None => ConvertConfig::default(),
    };

    let mut builder = ConvertConfig::builder()
        .minify_json(config.minify_json && !overrides.pretty)
        .sample_rate(config.sample_rate)
        .seed(config.seed);
    if overrides.sample_rate.is_some() {
        builder = builder.sample_rate(overrides.sample_rate);
    }
    if overrides.seed.is_some() {
        builder = builder.seed(overrides.seed);
    }
    Ok(builder.build())
}

/// Run the convert command. Fails if any map failed.
pub fn run(inputs: &[PathBuf], output: &Path, config: &ConvertConfig) -> Result<()> {
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output folder {}", output.display()))?;

    let mut failed = 0;
    for input in inputs {
        info!("Converting {}", input.display());
        match detect_and_convert(input, output, config) {
            Ok(outcome) => {
                println!("{}", format_conversion_summary(&outcome));
                if !outcome.export.is_complete() {
                    warn!(
                        "{} record(s) of {} could not be written",
                        outcome.export.failed.len(),
                        outcome.best.map_name()
                    );
                    failed += 1;
                }
            }
            Err(e) => {
                error!("Failed to convert {}: {}", input.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} map(s) failed", failed, inputs.len());
    }
    info!("Converted {} map(s)", inputs.len());
    Ok(())
}
