use serde::{Deserialize, Serialize};

/// One timed clip of an output tape. Times and durations are in ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum CanonicalClip {
    #[serde(rename = "MotionClip")]
    Motion(MotionClip),
    #[serde(rename = "PictogramClip")]
    Picto(PictoClip),
    #[serde(rename = "GoldEffectClip")]
    GoldEffect(GoldEffectClip),
    #[serde(rename = "KaraokeClip")]
    Karaoke(KaraokeClip),
    #[serde(rename = "SoundSetClip")]
    SoundSet(SoundSetClip),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionClip {
    pub id: i64,
    pub track_id: i64,
    pub is_active: i64,
    pub start_time: i64,
    pub duration: i64,
    pub classifier_path: String,
    pub gold_move: i64,
    pub coach_id: i64,
    pub move_type: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PictoClip {
    pub id: i64,
    pub track_id: i64,
    pub is_active: i64,
    pub start_time: i64,
    pub duration: i64,
    pub picto_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldEffectClip {
    pub id: i64,
    pub track_id: i64,
    pub is_active: i64,
    pub start_time: i64,
    pub duration: i64,
    pub effect_type: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KaraokeClip {
    pub id: i64,
    pub track_id: i64,
    pub is_active: i64,
    pub start_time: i64,
    pub duration: i64,
    pub lyrics: String,
    pub is_end_of_line: i64,
    pub content_type: i64,
    pub pitch: f64,
    pub start_time_tolerance: i64,
    pub end_time_tolerance: i64,
    pub semitone_tolerance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundSetClip {
    pub id: i64,
    pub track_id: i64,
    pub start_time: i64,
    pub duration: i64,
    pub sound_set_path: String,
}

impl CanonicalClip {
    pub fn id(&self) -> i64 {
        match self {
            CanonicalClip::Motion(c) => c.id,
            CanonicalClip::Picto(c) => c.id,
            CanonicalClip::GoldEffect(c) => c.id,
            CanonicalClip::Karaoke(c) => c.id,
            CanonicalClip::SoundSet(c) => c.id,
        }
    }

    pub fn track_id(&self) -> i64 {
        match self {
            CanonicalClip::Motion(c) => c.track_id,
            CanonicalClip::Picto(c) => c.track_id,
            CanonicalClip::GoldEffect(c) => c.track_id,
            CanonicalClip::Karaoke(c) => c.track_id,
            CanonicalClip::SoundSet(c) => c.track_id,
        }
    }

    pub fn start_time(&self) -> i64 {
        match self {
            CanonicalClip::Motion(c) => c.start_time,
            CanonicalClip::Picto(c) => c.start_time,
            CanonicalClip::GoldEffect(c) => c.start_time,
            CanonicalClip::Karaoke(c) => c.start_time,
            CanonicalClip::SoundSet(c) => c.start_time,
        }
    }

    pub fn duration(&self) -> i64 {
        match self {
            CanonicalClip::Motion(c) => c.duration,
            CanonicalClip::Picto(c) => c.duration,
            CanonicalClip::GoldEffect(c) => c.duration,
            CanonicalClip::Karaoke(c) => c.duration,
            CanonicalClip::SoundSet(c) => c.duration,
        }
    }

    /// Output class name, as written in the `class` field.
    pub fn class_name(&self) -> &'static str {
        match self {
            CanonicalClip::Motion(_) => "MotionClip",
            CanonicalClip::Picto(_) => "PictogramClip",
            CanonicalClip::GoldEffect(_) => "GoldEffectClip",
            CanonicalClip::Karaoke(_) => "KaraokeClip",
            CanonicalClip::SoundSet(_) => "SoundSetClip",
        }
    }
}
