//! Parse command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use songconv_core::export::to_json_string;
use songconv_core::parse_file;

/// Run the parse command
pub fn run(file: &Path, pretty: bool) -> Result<()> {
    let value = parse_file(file).with_context(|| format!("Failed to read {}", file.display()))?;
    println!("{}", to_json_string(&value.to_json(), !pretty)?);
    Ok(())
}
