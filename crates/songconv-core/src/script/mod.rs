//! Static reader for Lua-style table literal files (`.tpl`, `.trk`, `.dtape`, `.ktape`, `.tape`).
//!
//! Files are never executed. Top-level assignments are evaluated into a
//! [`ScriptValue`] tree; anything dynamic is kept as a placeholder.

mod lexer;
mod parser;
mod value;

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::error::{Error, Result};

pub use parser::parse;
pub use value::{DottedReference, ScriptValue};

/// Syntax error with the 1-based position where it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{line}:{column}] {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Read, decode and parse a script file.
pub fn parse_file(path: &Path) -> Result<ScriptValue> {
    let bytes = std::fs::read(path)?;
    let (text, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if had_errors {
        debug!("{} contains invalid UTF-8, replaced", path.display());
    }
    parse(&text).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}
