use rand::Rng;
use tracing::{info, warn};

use super::records::{AudioPreview, BestMap, Cinematics, Dance, Karaoke, MusicTrack, Song};
use crate::coerce::{
    BackgroundType, Difficulty, GameMode, GameModeFlags, GameModeStatus, LyricsType, NumCoach,
    SweatDifficulty, assure_jd_version, parse_enum, parse_enum_code,
};
use crate::config::ids::DEFAULT_LOCALE_ID;
use crate::error::{Error, Result};
use crate::source::{MusicTrackStructure, SongDescTemplate, TapeFile};
use crate::tape::{CanonicalClip, ClipBuilder};

/// Where dance and karaoke clips come from.
#[derive(Debug)]
pub enum TimelineInput<'a> {
    /// Explicit `.dtape` / `.ktape` files, mapped clip by clip.
    Tapes {
        dtape: Option<&'a TapeFile>,
        ktape: Option<&'a TapeFile>,
    },
    /// Clips already produced from a combined timeline; passed through unchanged.
    Normalized {
        dance: Vec<CanonicalClip>,
        karaoke: Vec<CanonicalClip>,
    },
}

/// Everything [`assemble`] needs for one map.
#[derive(Debug)]
pub struct AssembleInput<'a> {
    pub map_name: &'a str,
    pub song_desc: &'a SongDescTemplate,
    pub track: &'a MusicTrackStructure,
    pub audio_preview: AudioPreview,
    pub timeline: TimelineInput<'a>,
    pub main_sequence: Option<&'a TapeFile>,
}

/// Build the five output records of a map.
///
/// Fails with [`Error::NoMarkers`] when the track has no markers.
pub fn assemble<R: Rng>(input: AssembleInput<'_>, rng: &mut R) -> Result<BestMap> {
    let music_track = build_music_track(input.track, input.audio_preview)?;
    let song = build_song(input.map_name, input.song_desc);

    let mut builder = ClipBuilder::new(input.map_name, rng);

    let (dance_clips, karaoke_clips) = match input.timeline {
        TimelineInput::Tapes { dtape, ktape } => {
            let dance = dtape
                .map(|tape| {
                    tape.clips()
                        .iter()
                        .filter_map(|entry| builder.dance_clip(entry))
                        .collect()
                })
                .unwrap_or_default();
            let karaoke = ktape
                .map(|tape| {
                    tape.clips()
                        .iter()
                        .filter_map(|entry| builder.karaoke_clip(entry))
                        .collect()
                })
                .unwrap_or_default();
            (dance, karaoke)
        }
        TimelineInput::Normalized { dance, karaoke } => (dance, karaoke),
    };

    let cinematic_clips: Vec<CanonicalClip> = match input.main_sequence {
        Some(tape) => tape
            .clips()
            .iter()
            .filter_map(|entry| builder.cinematic_clip(entry))
            .collect(),
        None => {
            info!("No main sequence, cinematics will be empty");
            Vec::new()
        }
    };

    info!(
        "Assembled {}: {} markers, {} dance clips, {} karaoke clips, {} cinematic clips",
        input.map_name,
        music_track.markers.len(),
        dance_clips.len(),
        karaoke_clips.len(),
        cinematic_clips.len()
    );

    let map_name = input.map_name.to_string();
    Ok(BestMap {
        song,
        music_track,
        dance: Dance {
            clips: dance_clips,
            map_name: map_name.clone(),
        },
        karaoke: Karaoke {
            clips: karaoke_clips,
            map_name: map_name.clone(),
        },
        cinematics: Cinematics {
            clips: cinematic_clips,
            map_name,
        },
    })
}

/// Song record from the descriptor fields. Unrecognized enum values fall back
/// to per-field defaults.
pub fn build_song(map_name: &str, desc: &SongDescTemplate) -> Song {
    let game_mode = desc.first_game_mode();
    let flags = game_mode.and_then(|g| g.flags.as_ref());
    let status = desc
        .status
        .as_ref()
        .or_else(|| game_mode.and_then(|g| g.status.as_ref()));
    let mode = desc
        .mode
        .as_ref()
        .or_else(|| game_mode.and_then(|g| g.mode.as_ref()));

    Song {
        map_name: map_name.to_string(),
        original_jd_version: assure_jd_version(desc.jd_version),
        title: desc.title.clone().unwrap_or_default(),
        artist: desc.artist.clone().unwrap_or_default(),
        difficulty: parse_enum(desc.difficulty.as_ref(), Difficulty::Normal) as i64,
        sweat_difficulty: parse_enum(desc.sweat_difficulty.as_ref(), SweatDifficulty::Low) as i64,
        num_coach: parse_enum(desc.num_coach.as_ref(), NumCoach::Solo) as i64,
        flags: parse_enum(flags, GameModeFlags::Classic) as i64,
        status: parse_enum(status, GameModeStatus::Available) as i64,
        mode: parse_enum(mode, GameMode::Classic) as i64,
        background_type: parse_enum_code(
            desc.background_type.as_ref(),
            BackgroundType::OldSystem,
        ),
        lyrics_type: parse_enum_code(desc.lyrics_type.as_ref(), LyricsType::OldSystem),
        locale_id: desc
            .locale_id
            .filter(|id| *id != 0)
            .unwrap_or(DEFAULT_LOCALE_ID),
        mojo_value: desc.mojo_value.unwrap_or(0),
    }
}

/// Music track record. A track without markers cannot be converted.
pub fn build_music_track(
    track: &MusicTrackStructure,
    audio_preview: AudioPreview,
) -> Result<MusicTrack> {
    let markers = track.marker_values();
    if markers.is_empty() {
        return Err(Error::NoMarkers);
    }
    if track.start_beat.is_none() || track.end_beat.is_none() {
        warn!("Track has no start/end beat, using 0");
    }

    Ok(MusicTrack {
        markers,
        comments: track.comment_values(),
        sections: track.section_values(),
        start_beat: track.start_beat.unwrap_or(0),
        end_beat: track.end_beat.unwrap_or(0),
        audio_preview,
        video_start_time: track.video_start_time.unwrap_or(0.0),
        volume: track.volume.unwrap_or(0.0),
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    use super::*;

    fn track(value: serde_json::Value) -> MusicTrackStructure {
        serde_json::from_value(value).unwrap()
    }

    fn song_desc(value: serde_json::Value) -> SongDescTemplate {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_zero_markers_is_fatal() {
        let track = track(json!({ "markers": [], "startBeat": 0, "endBeat": 10 }));
        let err = build_music_track(&track, AudioPreview::default()).unwrap_err();
        assert!(matches!(err, Error::NoMarkers));
    }

    #[test]
    fn test_assemble_without_markers_fails() {
        let track = track(json!({ "markers": {} }));
        let desc = song_desc(json!({ "MapName": "Map" }));
        let mut rng = StdRng::seed_from_u64(0);
        let result = assemble(
            AssembleInput {
                map_name: "Map",
                song_desc: &desc,
                track: &track,
                audio_preview: AudioPreview::default(),
                timeline: TimelineInput::Tapes {
                    dtape: None,
                    ktape: None,
                },
                main_sequence: None,
            },
            &mut rng,
        );
        assert!(matches!(result, Err(Error::NoMarkers)));
    }

    #[test]
    fn test_song_fallbacks() {
        let song = build_song("Map", &song_desc(json!({})));
        assert_eq!(song.original_jd_version, 2018);
        assert_eq!(song.difficulty, 2);
        assert_eq!(song.sweat_difficulty, 1);
        assert_eq!(song.num_coach, 1);
        assert_eq!(song.flags, 1);
        assert_eq!(song.status, 3);
        assert_eq!(song.mode, 0);
        assert_eq!(song.locale_id, 4_294_967_295);
        assert_eq!(song.title, "");
    }

    #[test]
    fn test_song_status_prefers_descriptor() {
        let desc = song_desc(json!({
            "JDVersion": 5,
            "Difficulty": "Difficulty.Extreme",
            "NumCoach": "NumCoach.Trio",
            "Status": "GameModeStatus.Locked",
            "GameModes": [{ "GameModeDesc": {
                "flags": "GameModeFlags.Sweat",
                "status": "GameModeStatus.Hidden",
                "mode": "GameMode.Battle"
            } }],
            "LocaleID": 1234,
            "LyricsType": -1
        }));
        let song = build_song("Map", &desc);
        assert_eq!(song.original_jd_version, 2014);
        assert_eq!(song.difficulty, 4);
        assert_eq!(song.num_coach, 3);
        assert_eq!(song.status, 2);
        assert_eq!(song.flags, 4);
        assert_eq!(song.mode, 4);
        assert_eq!(song.locale_id, 1234);
        assert_eq!(song.lyrics_type, -1);
    }

    #[test]
    fn test_background_and_lyrics_codes_pass_through() {
        let desc = song_desc(json!({
            "BackgroundType": 7,
            "LyricsType": "LyricsType.OnStage"
        }));
        let song = build_song("Map", &desc);
        assert_eq!(song.background_type, 7);
        assert_eq!(song.lyrics_type, 2);
    }

    #[test]
    fn test_tapes_are_mapped() {
        let track = track(json!({
            "markers": [{ "VAL": 0 }, { "VAL": 48000 }],
            "startBeat": -2,
            "endBeat": 100,
            "videoStartTime": -1.5
        }));
        let desc = song_desc(json!({ "MapName": "Map" }));
        let dtape: TapeFile = serde_json::from_value(json!({ "params": { "Tape": { "Clips": [
            { "MotionClip": { "Id": 1, "TrackId": 10, "StartTime": 0, "Duration": 48, "ClassifierPath": "x/Move.msm" } },
            { "PictogramClip": { "Id": 2, "TrackId": 11, "StartTime": 24, "Duration": 96, "PictoPath": "x/P.tga" } },
            { "GoldEffectClip": { "Id": 3, "TrackId": 12, "StartTime": 48, "Duration": 24, "EffectType": 1 } }
        ] } } }))
        .unwrap();
        let ktape: TapeFile = serde_json::from_value(json!({ "params": { "Tape": { "Clips": [
            { "KaraokeClip": { "Id": 4, "TrackId": 13, "Lyrics": "la", "IsEndOfLine": 1 } }
        ] } } }))
        .unwrap();
        let main_sequence: TapeFile = serde_json::from_value(json!({ "params": { "Tape": { "Clips": [
            { "SoundSetClip": { "Id": 5, "TrackId": 14, "SoundSetPath": "amb/set_amb_intro.tpl" } },
            { "AlphaClip": { "Id": 6 } }
        ] } } }))
        .unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        let best = assemble(
            AssembleInput {
                map_name: "Map",
                song_desc: &desc,
                track: &track,
                audio_preview: AudioPreview::default(),
                timeline: TimelineInput::Tapes {
                    dtape: Some(&dtape),
                    ktape: Some(&ktape),
                },
                main_sequence: Some(&main_sequence),
            },
            &mut rng,
        )
        .unwrap();

        assert_eq!(best.map_name(), "Map");
        assert_eq!(best.music_track.markers, vec![0, 48000]);
        assert_eq!(best.music_track.video_start_time, -1.5);
        assert_eq!(best.dance.clips.len(), 3);
        assert_eq!(best.dance.clips[1].duration(), 24);
        assert_eq!(best.karaoke.clips.len(), 1);
        assert_eq!(best.cinematics.clips.len(), 1);
        match &best.cinematics.clips[0] {
            CanonicalClip::SoundSet(s) => assert_eq!(s.sound_set_path, "amb/amb_intro.wav"),
            other => panic!("unexpected clip {:?}", other),
        }
    }

    #[test]
    fn test_normalized_clips_pass_through() {
        let track = track(json!({ "markers": [0] }));
        let desc = song_desc(json!({}));
        let dance = vec![CanonicalClip::GoldEffect(crate::tape::GoldEffectClip {
            id: 1,
            track_id: 2,
            is_active: 0,
            start_time: 0,
            duration: 24,
            effect_type: 2,
        })];
        let mut rng = StdRng::seed_from_u64(0);
        let best = assemble(
            AssembleInput {
                map_name: "Map",
                song_desc: &desc,
                track: &track,
                audio_preview: AudioPreview::default(),
                timeline: TimelineInput::Normalized {
                    dance: dance.clone(),
                    karaoke: Vec::new(),
                },
                main_sequence: None,
            },
            &mut rng,
        )
        .unwrap();
        assert_eq!(best.dance.clips, dance);
        assert!(best.cinematics.clips.is_empty());
    }
}
