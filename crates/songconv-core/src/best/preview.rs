use tracing::{info, warn};

use super::records::AudioPreview;
use crate::config::preview::PREVIEW_NAMES;
use crate::source::{MusicTrackStructure, SongDescTemplate};

/// Pick the audio preview window.
///
/// Track preview fields win; otherwise the descriptor's `coverflow` preview,
/// then `prelobby`; otherwise the default window.
pub fn resolve_preview(
    track: &MusicTrackStructure,
    song_desc: Option<&SongDescTemplate>,
) -> AudioPreview {
    if let (Some(entry), Some(loop_start), Some(loop_end)) = (
        track.preview_entry,
        track.preview_loop_start,
        track.preview_loop_end,
    ) {
        info!("Using preview values from the track");
        return AudioPreview {
            entry: entry.trunc() as i64,
            loop_start: loop_start.trunc() as i64,
            loop_end: loop_end.trunc() as i64,
        };
    }

    let named = song_desc.and_then(|desc| {
        PREVIEW_NAMES
            .iter()
            .find_map(|name| desc.audio_preview(name).map(|p| (*name, p)))
    });
    match named {
        Some((name, preview)) => {
            info!("Found \"{}\" preview values", name);
            let start = preview.startbeat.unwrap_or(0.0).trunc() as i64;
            AudioPreview {
                entry: start,
                loop_start: start,
                loop_end: preview
                    .endbeat
                    .map_or(AudioPreview::default().loop_end, |b| b.trunc() as i64),
            }
        }
        None => {
            warn!("Neither coverflow nor prelobby preview values were found, using default preview values");
            AudioPreview::default()
        }
    }
}
