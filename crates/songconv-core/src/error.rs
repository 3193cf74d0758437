use std::path::PathBuf;

use thiserror::Error;

use crate::detect::MapType;
use crate::script::ParseError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Required {what} was not found: {path}")]
    MissingFile { what: &'static str, path: PathBuf },

    #[error("Required field {field} was not found in {file}")]
    MissingField {
        field: &'static str,
        file: &'static str,
    },

    #[error("No markers were found in the track, cancelling processing")]
    NoMarkers,

    #[error("Unexpected structure in {file}: {message}")]
    SourceShape { file: String, message: String },

    #[error("Converting {0} maps is not supported yet")]
    UnsupportedMapType(MapType),

    #[error("Could not detect map type: {0}")]
    MapTypeNotDetected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
