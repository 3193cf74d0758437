use serde::Deserialize;

use super::lenient;

/// A tape file: `.dtape` (dance), `.ktape` (karaoke) or `.tape` (main sequence).
///
/// All three share the same shape; each clip wrapper holds at most one of the
/// clip kinds below. Unused kinds (alpha/color/curve clips in main sequences)
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TapeFile {
    pub params: TapeParams,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TapeParams {
    #[serde(rename = "Tape")]
    pub tape: Tape,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Tape {
    #[serde(rename = "Clips", deserialize_with = "lenient::seq")]
    pub clips: Vec<ClipEntry>,
}

impl TapeFile {
    pub fn clips(&self) -> &[ClipEntry] {
        &self.params.tape.clips
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClipEntry {
    #[serde(rename = "MotionClip")]
    pub motion: Option<MotionClipSource>,
    #[serde(rename = "PictogramClip")]
    pub pictogram: Option<PictogramClipSource>,
    #[serde(rename = "GoldEffectClip")]
    pub gold_effect: Option<GoldEffectClipSource>,
    #[serde(rename = "KaraokeClip")]
    pub karaoke: Option<KaraokeClipSource>,
    #[serde(rename = "SoundSetClip")]
    pub sound_set: Option<SoundSetClipSource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MotionClipSource {
    #[serde(deserialize_with = "lenient::integer")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub track_id: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub is_active: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub start_time: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub duration: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub classifier_path: Option<String>,
    #[serde(deserialize_with = "lenient::integer")]
    pub gold_move: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub coach_id: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub move_type: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PictogramClipSource {
    #[serde(deserialize_with = "lenient::integer")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub track_id: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub is_active: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub start_time: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub duration: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub picto_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GoldEffectClipSource {
    #[serde(deserialize_with = "lenient::integer")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub track_id: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub is_active: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub start_time: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub duration: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub effect_type: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct KaraokeClipSource {
    #[serde(deserialize_with = "lenient::integer")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub track_id: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub is_active: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub start_time: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub duration: Option<i64>,
    #[serde(deserialize_with = "lenient::number")]
    pub pitch: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub lyrics: Option<String>,
    #[serde(deserialize_with = "lenient::integer")]
    pub is_end_of_line: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub content_type: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub start_time_tolerance: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub end_time_tolerance: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub semitone_tolerance: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SoundSetClipSource {
    #[serde(deserialize_with = "lenient::integer")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub track_id: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub start_time: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub duration: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub sound_set_path: Option<String>,
}
