use serde::{Deserialize, Serialize};

use super::lenient;

/// `.trk` music track file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackFile {
    pub structure: TrackStructureWrapper,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackStructureWrapper {
    #[serde(rename = "MusicTrackStructure")]
    pub music_track_structure: MusicTrackStructure,
}

impl TrackFile {
    pub fn structure(&self) -> &MusicTrackStructure {
        &self.structure.music_track_structure
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MusicTrackStructure {
    #[serde(deserialize_with = "lenient::seq")]
    pub markers: Vec<Marker>,
    #[serde(deserialize_with = "lenient::seq")]
    pub sections: Vec<SectionEntry>,
    #[serde(deserialize_with = "lenient::seq")]
    pub comments: Vec<CommentEntry>,
    #[serde(deserialize_with = "lenient::integer")]
    pub start_beat: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub end_beat: Option<i64>,
    #[serde(deserialize_with = "lenient::number")]
    pub video_start_time: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub volume: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub preview_entry: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub preview_loop_start: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub preview_loop_end: Option<f64>,
}

impl MusicTrackStructure {
    /// Marker sample positions, unwrapped.
    pub fn marker_values(&self) -> Vec<i64> {
        self.markers.iter().map(Marker::value).collect()
    }

    pub fn comment_values(&self) -> Vec<Comment> {
        self.comments
            .iter()
            .filter_map(|c| c.comment.clone())
            .collect()
    }

    pub fn section_values(&self) -> Vec<MusicSection> {
        self.sections
            .iter()
            .filter_map(|s| s.music_section.clone())
            .collect()
    }
}

/// A marker, either `{ VAL = n }` or a bare number.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum Marker {
    Wrapped {
        #[serde(rename = "VAL")]
        val: f64,
    },
    Bare(f64),
}

impl Marker {
    pub fn value(&self) -> i64 {
        match *self {
            Marker::Wrapped { val } | Marker::Bare(val) => val.trunc() as i64,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SectionEntry {
    #[serde(rename = "MusicSection")]
    pub music_section: Option<MusicSection>,
}

/// Song section marker, copied as-is into the output track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MusicSection {
    #[serde(deserialize_with = "lenient::integer")]
    pub section_type: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub marker: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommentEntry {
    #[serde(rename = "Comment")]
    pub comment: Option<Comment>,
}

/// Authoring comment attached to a marker, copied as-is into the output track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Comment {
    #[serde(deserialize_with = "lenient::integer")]
    pub marker: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub comment: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub comment_type: Option<String>,
}
