pub mod best;
pub mod coerce;
pub mod config;
pub mod detect;
pub mod error;
pub mod export;
pub mod map;
pub mod paths;
pub mod script;
pub mod source;
pub mod tape;
pub mod timing;

pub use best::{BestMap, assemble};
pub use config::ConvertConfig;
pub use detect::{Detection, DetectionReport, MapType, detect};
pub use error::{Error, Result};
pub use export::{ExportReport, Exporter, JsonExporter, export_best};
pub use map::{AssetInventory, ConversionOutcome, convert, detect_and_convert};
pub use script::{ParseError, ScriptValue, parse, parse_file};
pub use tape::CanonicalClip;
pub use timing::TimeUnitConverter;
