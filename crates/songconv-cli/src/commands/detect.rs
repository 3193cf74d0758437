//! Detect command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use songconv_core::detect;
use songconv_core::export::format_detection_report;

/// Run the detect command
pub fn run(input: &Path, json: bool) -> Result<()> {
    let report = detect(input).with_context(|| format!("Failed to scan {}", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_detection_report(&report));
    }
    Ok(())
}
