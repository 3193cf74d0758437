//! P4 map folders: Lua-like `.tpl`/`.trk`/`.tape` sources.

use std::path::Path;

use tracing::{info, warn};

use super::ConversionOutcome;
use super::assets::AssetInventory;
use super::lookup::find_file;
use super::wav;
use crate::best::{AssembleInput, TimelineInput, assemble, resolve_preview};
use crate::config::ConvertConfig;
use crate::config::timing::{DEFAULT_SAMPLE_RATE, DEFAULT_TICKS_PER_BEAT};
use crate::detect::MapType;
use crate::error::{Error, Result};
use crate::export::{JsonExporter, export_best};
use crate::source::{self, SongDescFile, TapeFile, TimelineFile, TimelineTemplate, TrackFile};
use crate::tape::{ClipBuilder, to_dance_clips, to_karaoke_clips};
use crate::timing::TimeUnitConverter;

const SONG_DESC: &str = "SongDesc.tpl";
const COMBINED_TIMELINE: &str = "timeline/timeline.tpl";

/// Which timeline sub-format a map ships.
#[derive(Debug)]
enum TimelineSource {
    Combined(TimelineTemplate),
    Tapes {
        dtape: TapeFile,
        ktape: Option<TapeFile>,
    },
}

/// Version codes of the release that ships a combined timeline.
fn uses_combined_timeline(jd_version: Option<i64>) -> bool {
    matches!(jd_version, Some(5) | Some(2014))
}

/// Convert the P4 map in `input` into `output/{map name lower-case}/`.
pub fn convert(input: &Path, output: &Path, config: &ConvertConfig) -> Result<ConversionOutcome> {
    let song_desc_path = find_file(input, SONG_DESC).ok_or_else(|| Error::MissingFile {
        what: "song descriptor",
        path: input.join(SONG_DESC),
    })?;

    info!("Trying to find the map name...");
    let song_desc: SongDescFile = source::load(&song_desc_path)?;
    let template = song_desc.template().ok_or(Error::MissingField {
        field: "JD_SongDescTemplate",
        file: SONG_DESC,
    })?;
    let map_name = template
        .map_name
        .clone()
        .filter(|name| !name.is_empty())
        .ok_or(Error::MissingField {
            field: "MapName",
            file: SONG_DESC,
        })?;
    info!("Map name found: \"{}\"", map_name);

    let assets = AssetInventory::collect(input, &map_name)?;

    let track_relative = format!("Audio/{}.trk", map_name);
    let track_path = find_file(input, &track_relative).ok_or_else(|| Error::MissingFile {
        what: "track file",
        path: input.join(&track_relative),
    })?;
    let track_file: TrackFile = source::load(&track_path)?;
    let track = track_file.structure();
    let markers = track.marker_values();
    if markers.is_empty() {
        return Err(Error::NoMarkers);
    }

    let sample_rate = resolve_sample_rate(&assets.audio, config);
    let converter = TimeUnitConverter::new(markers, sample_rate, DEFAULT_TICKS_PER_BEAT);
    info!(
        "Track has {} markers at {} Hz, {:.2} BPM",
        converter.markers().len(),
        sample_rate,
        converter.bpm()
    );

    let timeline_source = load_timeline(input, &map_name, template.jd_version)?;
    let main_sequence = load_main_sequence(input, &map_name);
    let audio_preview = resolve_preview(track, Some(template));

    info!("Starting to process the map...");
    let mut rng = config.rng();
    let timeline = match &timeline_source {
        TimelineSource::Combined(timeline) => {
            let mut builder = ClipBuilder::new(&map_name, &mut rng);
            let dance = to_dance_clips(timeline, &converter, &mut builder);
            let karaoke = to_karaoke_clips(timeline, &converter, &mut builder);
            TimelineInput::Normalized { dance, karaoke }
        }
        TimelineSource::Tapes { dtape, ktape } => TimelineInput::Tapes {
            dtape: Some(dtape),
            ktape: ktape.as_ref(),
        },
    };

    let best = assemble(
        AssembleInput {
            map_name: &map_name,
            song_desc: template,
            track,
            audio_preview,
            timeline,
            main_sequence: main_sequence.as_ref(),
        },
        &mut rng,
    )?;

    let output_dir = output.join(map_name.to_lowercase());
    let mut exporter = JsonExporter::new(&output_dir, config.minify_json);
    let export = export_best(&mut exporter, &best);

    Ok(ConversionOutcome {
        map_type: MapType::P4,
        output_dir,
        best,
        assets,
        export,
    })
}

/// Config override, else the rate in the audio header. Encodings the WAV
/// reader rejects fall back to the default rate.
fn resolve_sample_rate(audio: &Path, config: &ConvertConfig) -> u32 {
    if let Some(rate) = config.sample_rate {
        return rate;
    }
    match wav::read_sample_rate(audio) {
        Ok(rate) => {
            info!("Sample rate detected: {} Hz", rate);
            rate
        }
        Err(e) => {
            warn!(
                "Could not read the sample rate of {}: {}, using {} Hz",
                audio.display(),
                e,
                DEFAULT_SAMPLE_RATE
            );
            DEFAULT_SAMPLE_RATE
        }
    }
}

fn load_timeline(input: &Path, map_name: &str, jd_version: Option<i64>) -> Result<TimelineSource> {
    let combined = find_file(input, COMBINED_TIMELINE);
    let dtape_relative = format!("timeline/{}_TML_Dance.dtape", map_name);
    let dtape = find_file(input, &dtape_relative);

    let prefer_combined = uses_combined_timeline(jd_version);
    let use_combined = match (&combined, &dtape) {
        (Some(_), Some(_)) => prefer_combined,
        (Some(_), None) => {
            if !prefer_combined {
                warn!("Dance tape not found, falling back to the combined timeline");
            }
            true
        }
        (None, Some(_)) => {
            if prefer_combined {
                warn!("Combined timeline not found, falling back to dance/karaoke tapes");
            }
            false
        }
        (None, None) => {
            let missing = if prefer_combined {
                COMBINED_TIMELINE.to_string()
            } else {
                dtape_relative
            };
            return Err(Error::MissingFile {
                what: "timeline",
                path: input.join(missing),
            });
        }
    };

    if use_combined && let Some(path) = combined {
        let file: TimelineFile = source::load(&path)?;
        let template = file.template().cloned().ok_or(Error::MissingField {
            field: "JD_Timeline_Template",
            file: "timeline.tpl",
        })?;
        info!("Using the combined timeline");
        return Ok(TimelineSource::Combined(template));
    }

    let dtape_path = dtape.ok_or_else(|| Error::MissingFile {
        what: "dance tape",
        path: input.join(&dtape_relative),
    })?;
    let dtape: TapeFile = source::load(&dtape_path)?;
    let ktape = match find_file(input, &format!("timeline/{}_TML_Karaoke.ktape", map_name)) {
        Some(path) => Some(source::load(&path)?),
        None => {
            warn!("Karaoke tape not found, karaoke will be empty");
            None
        }
    };
    info!("Using dance/karaoke tapes");
    Ok(TimelineSource::Tapes { dtape, ktape })
}

fn load_main_sequence(input: &Path, map_name: &str) -> Option<TapeFile> {
    let path = find_file(input, &format!("Cinematics/{}_MainSequence.tape", map_name))?;
    match source::load(&path) {
        Ok(tape) => Some(tape),
        Err(e) => {
            warn!("Ignoring main sequence {}: {}", path.display(), e);
            None
        }
    }
}
