//! BPM command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use songconv_core::TimeUnitConverter;
use songconv_core::config::timing::{DEFAULT_SAMPLE_RATE, DEFAULT_TICKS_PER_BEAT};
use songconv_core::map::wav;
use songconv_core::source::{self, TrackFile};
use tracing::{debug, warn};

/// Run the bpm command
pub fn run(track_path: &Path, sample_rate: Option<u32>) -> Result<()> {
    let track: TrackFile = source::load(track_path)
        .with_context(|| format!("Failed to load {}", track_path.display()))?;
    let markers = track.structure().marker_values();
    if markers.is_empty() {
        bail!("No markers were found in {}", track_path.display());
    }

    let sample_rate = match sample_rate {
        Some(rate) => rate,
        None => sibling_sample_rate(track_path).unwrap_or_else(|| {
            warn!("No audio next to the track, assuming {} Hz", DEFAULT_SAMPLE_RATE);
            DEFAULT_SAMPLE_RATE
        }),
    };

    let converter = TimeUnitConverter::new(markers, sample_rate, DEFAULT_TICKS_PER_BEAT);
    println!("Markers:     {}", converter.markers().len());
    println!("Sample rate: {} Hz", converter.sample_rate());
    println!("BPM:         {:.3}", converter.bpm());
    Ok(())
}

/// Sample rate of the `.wav` with the same stem as the track, if any.
fn sibling_sample_rate(track_path: &Path) -> Option<u32> {
    let audio = track_path.with_extension("wav");
    match wav::read_sample_rate(&audio) {
        Ok(rate) => Some(rate),
        Err(e) => {
            debug!("Could not read {}: {}", audio.display(), e);
            None
        }
    }
}
