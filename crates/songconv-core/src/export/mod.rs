//! Writing converted maps to disk.

mod console;

pub use console::{format_conversion_summary, format_detection_report};

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value as JsonValue;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, error};

use crate::best::BestMap;
use crate::error::{Error, Result};

const PRETTY_INDENT: &[u8] = b"    ";

/// Destination for serialized records.
pub trait Exporter {
    /// Persist one record under `relative`, a `/`-separated path.
    fn write_record(&mut self, relative: &str, record: &JsonValue) -> Result<()>;
}

/// Writes records as JSON files below a map output folder.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    root: PathBuf,
    minify: bool,
}

impl JsonExporter {
    pub fn new(root: impl Into<PathBuf>, minify: bool) -> Self {
        Self {
            root: root.into(),
            minify,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Exporter for JsonExporter {
    fn write_record(&mut self, relative: &str, record: &JsonValue) -> Result<()> {
        let path = self.root.join(relative.to_lowercase());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, to_json_string(record, self.minify)?)?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// Serialize as compact JSON, or pretty-printed with 4-space indentation.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T, minify: bool) -> Result<String> {
    if minify {
        return Ok(serde_json::to_string(value)?);
    }
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(PRETTY_INDENT));
    value.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Which records were persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub written: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Relative output paths of the five records, lower-cased.
pub fn record_paths(map_name: &str) -> [String; 5] {
    let map = map_name.to_lowercase();
    [
        "songdesc.json".to_string(),
        format!("audio/{}_musictrack.json", map),
        format!("timeline/{}_dance.json", map),
        format!("timeline/{}_karaoke.json", map),
        format!("cinematics/{}_mainsequence.json", map),
    ]
}

/// Write all five records. A failed record is logged and does not stop the others.
pub fn export_best<E: Exporter>(exporter: &mut E, map: &BestMap) -> ExportReport {
    let [song, music_track, dance, karaoke, cinematics] = record_paths(map.map_name());
    let records = [
        (song, serde_json::to_value(&map.song)),
        (music_track, serde_json::to_value(&map.music_track)),
        (dance, serde_json::to_value(&map.dance)),
        (karaoke, serde_json::to_value(&map.karaoke)),
        (cinematics, serde_json::to_value(&map.cinematics)),
    ];

    let mut report = ExportReport::default();
    for (path, value) in records {
        let outcome = value
            .map_err(Error::from)
            .and_then(|value| exporter.write_record(&path, &value));
        match outcome {
            Ok(()) => report.written.push(path),
            Err(e) => {
                error!("Failed to write {}: {}", path, e);
                report.failed.push((path, e.to_string()));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::best::{AudioPreview, Cinematics, Dance, Karaoke, MusicTrack, Song};

    fn sample_map() -> BestMap {
        BestMap {
            song: Song {
                map_name: "BadRomance".into(),
                original_jd_version: 2014,
                title: "Bad Romance".into(),
                artist: "Lady Gaga".into(),
                difficulty: 2,
                sweat_difficulty: 1,
                num_coach: 1,
                flags: 1,
                status: 3,
                mode: 0,
                background_type: 0,
                lyrics_type: 0,
                locale_id: 4_294_967_295,
                mojo_value: 0,
            },
            music_track: MusicTrack {
                markers: vec![0, 48000],
                comments: Vec::new(),
                sections: Vec::new(),
                start_beat: 0,
                end_beat: 2,
                audio_preview: AudioPreview::default(),
                video_start_time: 0.0,
                volume: 0.0,
            },
            dance: Dance {
                clips: Vec::new(),
                map_name: "BadRomance".into(),
            },
            karaoke: Karaoke {
                clips: Vec::new(),
                map_name: "BadRomance".into(),
            },
            cinematics: Cinematics {
                clips: Vec::new(),
                map_name: "BadRomance".into(),
            },
        }
    }

    /// Keeps records in memory and refuses paths containing `refuse`.
    #[derive(Default)]
    struct MemoryExporter {
        refuse: Option<&'static str>,
        records: HashMap<String, JsonValue>,
    }

    impl Exporter for MemoryExporter {
        fn write_record(&mut self, relative: &str, record: &JsonValue) -> Result<()> {
            if self.refuse.is_some_and(|r| relative.contains(r)) {
                return Err(Error::Io(std::io::Error::other("disk full")));
            }
            self.records.insert(relative.to_string(), record.clone());
            Ok(())
        }
    }

    #[test]
    fn test_record_paths_are_lowercase() {
        let paths = record_paths("BadRomance");
        assert_eq!(paths[1], "audio/badromance_musictrack.json");
        assert_eq!(paths[4], "cinematics/badromance_mainsequence.json");
    }

    #[test]
    fn test_failed_write_does_not_block_others() {
        let mut exporter = MemoryExporter {
            refuse: Some("karaoke"),
            ..Default::default()
        };
        let report = export_best(&mut exporter, &sample_map());
        assert_eq!(report.written.len(), 4);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "timeline/badromance_karaoke.json");
        assert!(!report.is_complete());
        assert_eq!(exporter.records["songdesc.json"]["title"], json!("Bad Romance"));
    }

    #[test]
    fn test_json_exporter_writes_files() {
        let dir = TempDir::new().unwrap();
        let mut exporter = JsonExporter::new(dir.path(), false);
        let report = export_best(&mut exporter, &sample_map());
        assert!(report.is_complete());

        let text = fs::read_to_string(dir.path().join("timeline/badromance_dance.json")).unwrap();
        assert!(text.contains("\n    \"clips\""));
        let value: JsonValue = serde_json::from_str(&text).unwrap();
        assert_eq!(value["class"], json!("Dance"));
    }

    #[test]
    fn test_minified_output() {
        let text = to_json_string(&json!({ "a": [1, 2] }), true).unwrap();
        assert_eq!(text, r#"{"a":[1,2]}"#);
        let pretty = to_json_string(&json!({ "a": 1 }), false).unwrap();
        assert_eq!(pretty, "{\n    \"a\": 1\n}");
    }
}
