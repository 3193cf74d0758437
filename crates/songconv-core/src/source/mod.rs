//! Typed views over the parsed script files of a map.

pub mod lenient;
mod songdesc;
mod tape;
mod timeline;
mod track;

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};
use crate::script;

pub use songdesc::*;
pub use tape::*;
pub use timeline::*;
pub use track::*;

/// Parse a script file and read it as `T`.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let root = script::parse_file(path)?;
    debug!("Parsed {}", path.display());
    serde_json::from_value(root.to_json()).map_err(|e| Error::SourceShape {
        file: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_load_track_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"structure = {{
                MusicTrackStructure = {{
                    markers = {{ {{ VAL = 0 }}, {{ VAL = 48000 }} }},
                    startBeat = -4,
                    endBeat = 200,
                    videoStartTime = -2.5,
                }},
            }}"#
        )
        .unwrap();

        let track: TrackFile = load(file.path()).unwrap();
        assert_eq!(track.structure().marker_values(), vec![0, 48000]);
        assert_eq!(track.structure().start_beat, Some(-4));
    }

    #[test]
    fn test_wrong_shape_is_reported() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "params = 5").unwrap();
        let err = load::<TapeFile>(file.path()).unwrap_err();
        assert!(matches!(err, Error::SourceShape { .. }));
    }
}
