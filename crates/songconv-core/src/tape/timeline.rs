use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use super::builder::{ClipBuilder, effect_type_for, move_type_for};
use super::clip::CanonicalClip;
use crate::config::{karaoke, layers, timing};
use crate::source::{
    GoldEffectClipSource, KaraokeClipSource, MotionClipSource, PictogramClipSource,
    TimelineTemplate,
};
use crate::timing::TimeUnitConverter;

/// Tick span between two beat positions. A missing stop means an empty span.
fn tick_span(converter: &TimeUnitConverter, start: f64, stop: Option<f64>) -> (i64, i64) {
    let start_ticks = converter.ticks_from_beat(start);
    let stop_ticks = converter.ticks_from_beat(stop.unwrap_or(start));
    (start_ticks, stop_ticks - start_ticks)
}

/// Dance clips (moves, pictograms, gold effects) of a combined timeline, in random order.
pub fn to_dance_clips<R: Rng>(
    timeline: &TimelineTemplate,
    converter: &TimeUnitConverter,
    builder: &mut ClipBuilder<'_, R>,
) -> Vec<CanonicalClip> {
    let move_tracks: Vec<i64> = (0..layers::MOVE_LAYER_COUNT)
        .map(|_| builder.random_id())
        .collect();

    let mut clips = Vec::new();

    for mv in timeline.all_moves() {
        let layer = mv.layer_id.unwrap_or(0);
        let track_id = match usize::try_from(layer).ok().and_then(|i| move_tracks.get(i)) {
            Some(&id) => id,
            None => builder.random_id(),
        };
        let (start_time, duration) =
            tick_span(converter, mv.start_position.unwrap_or(0.0), mv.stop_position);
        let classifier_path = mv.classifier_path.clone().unwrap_or_default();

        clips.push(builder.motion(&MotionClipSource {
            id: None,
            track_id: Some(track_id),
            is_active: Some(0),
            start_time: Some(start_time),
            duration: Some(duration),
            move_type: Some(move_type_for(&classifier_path)),
            classifier_path: Some(classifier_path),
            gold_move: Some(mv.gold_move.unwrap_or(0)),
            coach_id: Some(layer),
        }));
    }
    let move_count = clips.len();

    let picto_track = builder.random_id();
    for picto in timeline.picto_clips() {
        clips.push(builder.picto(&PictogramClipSource {
            id: None,
            track_id: Some(picto_track),
            is_active: Some(0),
            start_time: Some(converter.ticks_from_beat(picto.position.unwrap_or(0.0))),
            duration: Some(timing::ONE_BEAT_TICKS),
            picto_path: picto.texture_path.clone(),
        }));
    }
    let picto_count = clips.len() - move_count;

    let gold_layers: HashSet<i64> = timeline
        .timeline_layers()
        .filter(|layer| layer.layer_type == Some(layers::GOLD_MOVE_LAYER_TYPE))
        .filter_map(|layer| layer.layer_id)
        .collect();
    let gold_track = builder.random_id();
    for block in timeline
        .timeline_blocks()
        .filter(|block| block.layer_id.is_some_and(|id| gold_layers.contains(&id)))
    {
        clips.push(builder.gold_effect(&GoldEffectClipSource {
            id: None,
            track_id: Some(gold_track),
            is_active: Some(0),
            start_time: Some(converter.ticks_from_beat(block.start_position.unwrap_or(0.0))),
            duration: Some(timing::ONE_BEAT_TICKS),
            effect_type: Some(effect_type_for(block.model_name.as_deref().unwrap_or_default())),
        }));
    }

    debug!(
        "Timeline dance clips: {} moves, {} pictos, {} gold effects",
        move_count,
        picto_count,
        clips.len() - move_count - picto_count
    );

    clips.shuffle(builder.rng());
    clips
}

/// Karaoke clips of a combined timeline, in random order.
pub fn to_karaoke_clips<R: Rng>(
    timeline: &TimelineTemplate,
    converter: &TimeUnitConverter,
    builder: &mut ClipBuilder<'_, R>,
) -> Vec<CanonicalClip> {
    let lyrics_track = builder.random_id();
    let mut clips: Vec<CanonicalClip> = timeline
        .lyric_clips()
        .map(|lyric| {
            let (start_time, duration) = tick_span(
                converter,
                lyric.start_position.unwrap_or(0.0),
                lyric.stop_position,
            );
            builder.karaoke(&KaraokeClipSource {
                id: None,
                track_id: Some(lyrics_track),
                is_active: Some(1),
                start_time: Some(start_time),
                duration: Some(duration),
                pitch: Some(karaoke::PITCH_PLACEHOLDER),
                lyrics: lyric.text.clone(),
                is_end_of_line: Some(lyric.is_line_ending.unwrap_or(0)),
                content_type: Some(karaoke::CONTENT_TYPE),
                start_time_tolerance: Some(karaoke::START_TIME_TOLERANCE),
                end_time_tolerance: Some(karaoke::END_TIME_TOLERANCE),
                semitone_tolerance: Some(karaoke::SEMITONE_TOLERANCE),
            })
        })
        .collect();

    debug!("Timeline karaoke clips: {}", clips.len());

    clips.shuffle(builder.rng());
    clips
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    use super::*;

    fn converter() -> TimeUnitConverter {
        TimeUnitConverter::new(vec![0, 48_000, 96_000, 144_000], 48_000, 24)
    }

    fn timeline(value: serde_json::Value) -> TimelineTemplate {
        serde_json::from_value(value).unwrap()
    }

    fn dance(template: &TimelineTemplate, seed: u64) -> Vec<CanonicalClip> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut builder = ClipBuilder::new("Map", &mut rng);
        to_dance_clips(template, &converter(), &mut builder)
    }

    #[test]
    fn test_picto_duration_ignores_stop_position() {
        let template = timeline(json!({
            "pictos": [
                { "PictoClip": { "position": 2, "stopPosition": 10, "texturePath": "a.tga" } },
                { "PictoClip": { "position": 3.5, "texturePath": "b.tga" } }
            ]
        }));
        let clips = dance(&template, 1);
        assert_eq!(clips.len(), 2);
        assert!(clips.iter().all(|c| c.duration() == 24));
        let mut starts: Vec<i64> = clips.iter().map(CanonicalClip::start_time).collect();
        starts.sort();
        assert_eq!(starts, vec![48, 84]);
    }

    #[test]
    fn test_gold_moves_follow_gold_layers() {
        let template = timeline(json!({
            "layers": [
                { "TimelineLayer": { "layerType": 12, "layerID": 100 } },
                { "TimelineLayer": { "layerType": 5, "layerID": 200 } }
            ],
            "Block": [
                { "TimelineBlock": { "layerID": 100, "startPosition": 1, "stopPosition": 2, "modelName": "GoldMoveCascade" } },
                { "TimelineBlock": { "layerID": 200, "startPosition": 2, "stopPosition": 3, "modelName": "Other" } }
            ]
        }));
        let clips = dance(&template, 2);
        assert_eq!(clips.len(), 1);
        match &clips[0] {
            CanonicalClip::GoldEffect(g) => {
                assert_eq!(g.start_time, 24);
                assert_eq!(g.duration, 24);
                assert_eq!(g.effect_type, 2);
            }
            other => panic!("unexpected clip {:?}", other),
        }
    }

    #[test]
    fn test_move_tracks_per_layer() {
        let template = timeline(json!({
            "moves": [
                { "MoveClip": { "layerID": 0, "startPosition": 0, "stopPosition": 1, "classifierPath": "a.msm" } },
                { "MoveClip": { "layerID": 0, "startPosition": 1, "stopPosition": 2, "classifierPath": "b.msm" } },
                { "MoveClip": { "layerID": 1, "startPosition": 2, "stopPosition": 3, "classifierPath": "c.gesture" } }
            ],
            "movesKinect": [
                { "MoveClip": { "layerID": 9, "startPosition": 1.5, "stopPosition": 2.2, "classifierPath": "d.gesture" } }
            ]
        }));
        let clips = dance(&template, 3);
        let motions: HashMap<String, _> = clips
            .iter()
            .filter_map(|c| match c {
                CanonicalClip::Motion(m) => Some((m.classifier_path.clone(), m.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(motions.len(), 4);

        let a = &motions["res://maps/map/timeline/moves/a.msm"];
        let b = &motions["res://maps/map/timeline/moves/b.msm"];
        let c = &motions["res://maps/map/timeline/moves/c.gesture"];
        let d = &motions["res://maps/map/timeline/moves/d.gesture"];
        assert_eq!(a.track_id, b.track_id);
        assert_ne!(a.track_id, c.track_id);
        assert_eq!(c.coach_id, 1);
        assert_eq!(c.move_type, 1);
        assert_eq!(a.move_type, 0);
        // floor(2.2 * 24) - floor(1.5 * 24)
        assert_eq!(d.start_time, 36);
        assert_eq!(d.duration, 16);
    }

    #[test]
    fn test_shuffle_keeps_clip_set() {
        let template = timeline(json!({
            "moves": (0..20).map(|i| json!({ "MoveClip": {
                "layerID": i % 3, "startPosition": i, "stopPosition": i + 1, "classifierPath": format!("m{}.msm", i)
            } })).collect::<Vec<_>>(),
            "pictos": (0..20).map(|i| json!({ "PictoClip": { "position": i, "texturePath": format!("p{}.tga", i) } })).collect::<Vec<_>>()
        }));
        let clips = dance(&template, 4);
        assert_eq!(clips.len(), 40);

        let mut ids: Vec<i64> = clips.iter().map(CanonicalClip::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 40);

        let starts: HashSet<(&str, i64)> = clips
            .iter()
            .map(|c| (c.class_name(), c.start_time()))
            .collect();
        let expected: HashSet<(&str, i64)> = (0..20)
            .flat_map(|i| [("MotionClip", i * 24), ("PictogramClip", i * 24)])
            .collect();
        assert_eq!(starts, expected);
    }

    #[test]
    fn test_same_seed_same_output() {
        let template = timeline(json!({
            "pictos": (0..10).map(|i| json!({ "PictoClip": { "position": i } })).collect::<Vec<_>>()
        }));
        assert_eq!(dance(&template, 7), dance(&template, 7));
    }

    #[test]
    fn test_karaoke_clips() {
        let template = timeline(json!({
            "lyrics": [
                { "LyricClip": { "text": "Hel", "startPosition": 1, "stopPosition": 1.5 } },
                { "LyricClip": { "text": "lo", "startPosition": 1.5, "stopPosition": 2, "isLineEnding": 1 } }
            ]
        }));
        let mut rng = StdRng::seed_from_u64(5);
        let mut builder = ClipBuilder::new("Map", &mut rng);
        let clips = to_karaoke_clips(&template, &converter(), &mut builder);
        assert_eq!(clips.len(), 2);

        let mut by_text: Vec<_> = clips
            .iter()
            .filter_map(|c| match c {
                CanonicalClip::Karaoke(k) => Some(k.clone()),
                _ => None,
            })
            .collect();
        by_text.sort_by(|a, b| a.lyrics.cmp(&b.lyrics));
        assert_eq!(by_text[0].lyrics, "Hel");
        assert_eq!(by_text[0].is_end_of_line, 0);
        assert_eq!(by_text[0].start_time, 24);
        assert_eq!(by_text[0].duration, 12);
        assert_eq!(by_text[1].is_end_of_line, 1);
        assert_eq!(by_text[1].semitone_tolerance, 5);
        assert_eq!(by_text[1].content_type, 1);
        assert_eq!(by_text[1].is_active, 1);
    }

    #[test]
    fn test_missing_collections_are_empty() {
        let template = timeline(json!({}));
        assert!(dance(&template, 0).is_empty());
    }
}
