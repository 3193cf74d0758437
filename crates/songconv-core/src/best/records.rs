use serde::{Deserialize, Serialize};

use crate::config::preview;
use crate::source::{Comment, MusicSection};
use crate::tape::CanonicalClip;

/// Song descriptor record (`songdesc.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "class", rename = "SongDescriptor", rename_all = "camelCase")]
pub struct Song {
    pub map_name: String,
    #[serde(rename = "originalJDVersion")]
    pub original_jd_version: i64,
    pub title: String,
    pub artist: String,
    pub difficulty: i64,
    pub sweat_difficulty: i64,
    pub num_coach: i64,
    pub flags: i64,
    pub status: i64,
    pub mode: i64,
    pub background_type: i64,
    pub lyrics_type: i64,
    #[serde(rename = "localeID")]
    pub locale_id: i64,
    pub mojo_value: i64,
}

/// Preview window, as beat indices into the track markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPreview {
    pub entry: i64,
    pub loop_start: i64,
    pub loop_end: i64,
}

impl Default for AudioPreview {
    fn default() -> Self {
        Self {
            entry: preview::DEFAULT_ENTRY,
            loop_start: preview::DEFAULT_LOOP_START,
            loop_end: preview::DEFAULT_LOOP_END,
        }
    }
}

/// Music track record (`audio/{map}_musictrack.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename = "MusicTrack", rename_all = "camelCase")]
pub struct MusicTrack {
    pub markers: Vec<i64>,
    pub comments: Vec<Comment>,
    pub sections: Vec<MusicSection>,
    pub start_beat: i64,
    pub end_beat: i64,
    pub audio_preview: AudioPreview,
    /// Seconds; negative values are a pre-roll.
    pub video_start_time: f64,
    pub volume: f64,
}

/// Dance tape record (`timeline/{map}_dance.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename = "Dance", rename_all = "camelCase")]
pub struct Dance {
    pub clips: Vec<CanonicalClip>,
    pub map_name: String,
}

/// Karaoke tape record (`timeline/{map}_karaoke.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename = "Karaoke", rename_all = "camelCase")]
pub struct Karaoke {
    pub clips: Vec<CanonicalClip>,
    pub map_name: String,
}

/// Cinematics tape record (`cinematics/{map}_mainsequence.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename = "Cinematics", rename_all = "camelCase")]
pub struct Cinematics {
    pub clips: Vec<CanonicalClip>,
    pub map_name: String,
}

/// The five records of one converted map.
#[derive(Debug, Clone, PartialEq)]
pub struct BestMap {
    pub song: Song,
    pub music_track: MusicTrack,
    pub dance: Dance,
    pub karaoke: Karaoke,
    pub cinematics: Cinematics,
}

impl BestMap {
    pub fn map_name(&self) -> &str {
        &self.song.map_name
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_song_field_names() {
        let song = Song {
            map_name: "Map".into(),
            original_jd_version: 2014,
            title: "T".into(),
            artist: "A".into(),
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
        };
        let value = serde_json::to_value(&song).unwrap();
        assert_eq!(value["class"], json!("SongDescriptor"));
        assert_eq!(value["mapName"], json!("Map"));
        assert_eq!(value["originalJDVersion"], json!(2014));
        assert_eq!(value["localeID"], json!(4_294_967_295_i64));
        assert_eq!(value["sweatDifficulty"], json!(1));
    }

    #[test]
    fn test_empty_tape_record() {
        let cinematics = Cinematics {
            clips: Vec::new(),
            map_name: "Map".into(),
        };
        assert_eq!(
            serde_json::to_value(&cinematics).unwrap(),
            json!({ "class": "Cinematics", "clips": [], "mapName": "Map" })
        );
    }

    #[test]
    fn test_default_preview() {
        let preview = AudioPreview::default();
        assert_eq!((preview.entry, preview.loop_start, preview.loop_end), (0, 30, 60));
        assert_eq!(serde_json::to_value(preview).unwrap()["loopStart"], json!(30));
    }
}
