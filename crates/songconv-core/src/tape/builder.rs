use rand::Rng;

use super::clip::{
    CanonicalClip, GoldEffectClip, KaraokeClip, MotionClip, PictoClip, SoundSetClip,
};
use super::ids::random_id;
use crate::config::{karaoke, layers, timing};
use crate::paths::{AssetKind, fix_engine_path, fix_sound_set_path};
use crate::source::{
    ClipEntry, GoldEffectClipSource, KaraokeClipSource, MotionClipSource, PictogramClipSource,
    SoundSetClipSource,
};

const GESTURE_EXTENSION: &str = ".gesture";

/// Move type for a classifier file: 1 for gesture files, 0 otherwise.
pub fn move_type_for(classifier_path: &str) -> i64 {
    i64::from(classifier_path.to_lowercase().ends_with(GESTURE_EXTENSION))
}

/// Gold effect type for a timeline block model.
pub fn effect_type_for(model_name: &str) -> i64 {
    if model_name.to_lowercase() == layers::GOLD_MOVE_CASCADE_MODEL {
        layers::EFFECT_TYPE_CASCADE
    } else {
        layers::EFFECT_TYPE_DEFAULT
    }
}

/// Turns tape-shaped clip sources into canonical clips.
///
/// Both input paths go through here: clips read from `.dtape`/`.ktape`/`.tape`
/// files, and clips synthesized from a combined timeline. Missing ids are
/// generated, paths are rewritten to engine paths, and pictograms always
/// last one beat.
pub struct ClipBuilder<'a, R: Rng> {
    map_name: &'a str,
    rng: &'a mut R,
}

impl<'a, R: Rng> ClipBuilder<'a, R> {
    pub fn new(map_name: &'a str, rng: &'a mut R) -> Self {
        Self { map_name, rng }
    }

    pub fn map_name(&self) -> &str {
        self.map_name
    }

    pub fn random_id(&mut self) -> i64 {
        random_id(&mut *self.rng)
    }

    pub fn rng(&mut self) -> &mut R {
        &mut *self.rng
    }

    fn id_or_random(&mut self, id: Option<i64>) -> i64 {
        match id {
            Some(id) => id,
            None => self.random_id(),
        }
    }

    pub fn motion(&mut self, src: &MotionClipSource) -> CanonicalClip {
        let raw_path = src.classifier_path.as_deref().unwrap_or_default();
        CanonicalClip::Motion(MotionClip {
            id: self.id_or_random(src.id),
            track_id: self.id_or_random(src.track_id),
            is_active: src.is_active.unwrap_or(0),
            start_time: src.start_time.unwrap_or(0),
            duration: src.duration.unwrap_or(0),
            classifier_path: fix_engine_path(self.map_name, raw_path, AssetKind::Move),
            gold_move: src.gold_move.unwrap_or(0),
            coach_id: src.coach_id.unwrap_or(0),
            move_type: src.move_type.unwrap_or_else(|| move_type_for(raw_path)),
        })
    }

    pub fn picto(&mut self, src: &PictogramClipSource) -> CanonicalClip {
        let raw_path = src.picto_path.as_deref().unwrap_or_default();
        CanonicalClip::Picto(PictoClip {
            id: self.id_or_random(src.id),
            track_id: self.id_or_random(src.track_id),
            is_active: src.is_active.unwrap_or(0),
            start_time: src.start_time.unwrap_or(0),
            duration: timing::ONE_BEAT_TICKS,
            picto_path: fix_engine_path(self.map_name, raw_path, AssetKind::Picto),
        })
    }

    pub fn gold_effect(&mut self, src: &GoldEffectClipSource) -> CanonicalClip {
        CanonicalClip::GoldEffect(GoldEffectClip {
            id: self.id_or_random(src.id),
            track_id: self.id_or_random(src.track_id),
            is_active: src.is_active.unwrap_or(0),
            start_time: src.start_time.unwrap_or(0),
            duration: src.duration.unwrap_or(timing::ONE_BEAT_TICKS),
            effect_type: src.effect_type.unwrap_or(layers::EFFECT_TYPE_DEFAULT),
        })
    }

    pub fn karaoke(&mut self, src: &KaraokeClipSource) -> CanonicalClip {
        CanonicalClip::Karaoke(KaraokeClip {
            id: self.id_or_random(src.id),
            track_id: self.id_or_random(src.track_id),
            is_active: src.is_active.unwrap_or(1),
            start_time: src.start_time.unwrap_or(0),
            duration: src.duration.unwrap_or(0),
            lyrics: src.lyrics.clone().unwrap_or_default(),
            is_end_of_line: src.is_end_of_line.unwrap_or(0),
            content_type: src.content_type.unwrap_or(karaoke::CONTENT_TYPE),
            pitch: src.pitch.unwrap_or(karaoke::PITCH_PLACEHOLDER),
            start_time_tolerance: src
                .start_time_tolerance
                .unwrap_or(karaoke::START_TIME_TOLERANCE),
            end_time_tolerance: src
                .end_time_tolerance
                .unwrap_or(karaoke::END_TIME_TOLERANCE),
            semitone_tolerance: src
                .semitone_tolerance
                .unwrap_or(karaoke::SEMITONE_TOLERANCE),
        })
    }

    pub fn sound_set(&mut self, src: &SoundSetClipSource) -> CanonicalClip {
        CanonicalClip::SoundSet(SoundSetClip {
            id: self.id_or_random(src.id),
            track_id: self.id_or_random(src.track_id),
            start_time: src.start_time.unwrap_or(0),
            duration: src.duration.unwrap_or(0),
            sound_set_path: fix_sound_set_path(src.sound_set_path.as_deref().unwrap_or_default()),
        })
    }

    /// Dance clip of a `.dtape` entry (motion, pictogram or gold effect).
    pub fn dance_clip(&mut self, entry: &ClipEntry) -> Option<CanonicalClip> {
        if let Some(src) = &entry.motion {
            return Some(self.motion(src));
        }
        if let Some(src) = &entry.gold_effect {
            return Some(self.gold_effect(src));
        }
        entry.pictogram.as_ref().map(|src| self.picto(src))
    }

    /// Karaoke clip of a `.ktape` entry.
    pub fn karaoke_clip(&mut self, entry: &ClipEntry) -> Option<CanonicalClip> {
        entry.karaoke.as_ref().map(|src| self.karaoke(src))
    }

    /// Sound-set clip of a main-sequence entry; other cinematic clips are dropped.
    pub fn cinematic_clip(&mut self, entry: &ClipEntry) -> Option<CanonicalClip> {
        entry.sound_set.as_ref().map(|src| self.sound_set(src))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_picto_duration_is_fixed() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut builder = ClipBuilder::new("Map", &mut rng);
        let clip = builder.picto(&PictogramClipSource {
            id: Some(1),
            track_id: Some(2),
            is_active: Some(1),
            start_time: Some(240),
            duration: Some(999),
            picto_path: Some("world/maps/map/timeline/pictos/Pose.tga".into()),
        });
        match clip {
            CanonicalClip::Picto(p) => {
                assert_eq!(p.duration, 24);
                assert_eq!(p.picto_path, "res://maps/map/timeline/pictos/pose.png");
                assert_eq!(p.id, 1);
            }
            other => panic!("unexpected clip {:?}", other),
        }
    }

    #[test]
    fn test_missing_ids_are_generated() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut builder = ClipBuilder::new("Map", &mut rng);
        let clip = builder.gold_effect(&GoldEffectClipSource::default());
        assert!(clip.id() >= crate::config::ids::MIN_ID);
        assert!(clip.track_id() >= crate::config::ids::MIN_ID);
        assert_eq!(clip.duration(), 24);
    }

    #[test]
    fn test_motion_defaults() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut builder = ClipBuilder::new("Map", &mut rng);
        let clip = builder.motion(&MotionClipSource {
            classifier_path: Some("moves/Map_Intro.gesture".into()),
            ..Default::default()
        });
        let CanonicalClip::Motion(m) = clip else {
            panic!("expected motion clip");
        };
        assert_eq!(m.move_type, 1);
        assert_eq!(m.gold_move, 0);
        assert_eq!(m.classifier_path, "res://maps/map/timeline/moves/map_intro.gesture");
    }

    #[test]
    fn test_karaoke_defaults() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut builder = ClipBuilder::new("Map", &mut rng);
        let CanonicalClip::Karaoke(k) = builder.karaoke(&KaraokeClipSource {
            lyrics: Some("la".into()),
            ..Default::default()
        }) else {
            panic!("expected karaoke clip");
        };
        assert_eq!(k.is_end_of_line, 0);
        assert_eq!(k.semitone_tolerance, 5);
        assert_eq!(k.start_time_tolerance, 4);
        assert_eq!(k.end_time_tolerance, 4);
        assert_eq!(k.pitch, karaoke::PITCH_PLACEHOLDER);
    }

    #[test]
    fn test_entry_dispatch() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut builder = ClipBuilder::new("Map", &mut rng);
        let entry = ClipEntry {
            sound_set: Some(SoundSetClipSource {
                sound_set_path: Some("audio/set_amb_x.tpl".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(builder.dance_clip(&entry).is_none());
        assert!(builder.karaoke_clip(&entry).is_none());
        let clip = builder.cinematic_clip(&entry).unwrap();
        let CanonicalClip::SoundSet(s) = clip else {
            panic!("expected sound set clip");
        };
        assert_eq!(s.sound_set_path, "audio/amb_x.wav");
    }

    #[test]
    fn test_effect_and_move_types() {
        assert_eq!(effect_type_for("GoldMoveCascade"), 2);
        assert_eq!(effect_type_for("goldmove"), 0);
        assert_eq!(move_type_for("a.msm"), 0);
        assert_eq!(move_type_for("a.gesture"), 1);
    }
}
