use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::lookup::{find_dir, find_file};
use crate::error::{Error, Result};

const PICTOS_DIR: &str = "timeline/pictos";
const MOVES_DIR: &str = "timeline/moves";
const MENU_ART_DIR: &str = "MenuArt/Textures";

/// Media a converted map still needs from the source folder. Nothing here is
/// processed by the converter itself, apart from reading the audio sample rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetInventory {
    pub pictos_dir: PathBuf,
    pub moves_dir: PathBuf,
    pub audio: PathBuf,
    pub menu_art_dir: PathBuf,
    /// Ambient sounds, sorted by path.
    pub amb_files: Vec<PathBuf>,
    pub coach_video: Option<PathBuf>,
}

impl AssetInventory {
    /// Locate the map media. The pictos, moves and menu art folders and the
    /// main audio file must exist; ambient sounds and the coach video may not.
    pub fn collect(input: &Path, map_name: &str) -> Result<Self> {
        let audio = format!("Audio/{}.wav", map_name);
        let inventory = Self {
            pictos_dir: required(input, PICTOS_DIR, find_dir(input, PICTOS_DIR), "pictos folder")?,
            moves_dir: required(input, MOVES_DIR, find_dir(input, MOVES_DIR), "moves folder")?,
            audio: required(input, &audio, find_file(input, &audio), "audio file")?,
            menu_art_dir: required(
                input,
                MENU_ART_DIR,
                find_dir(input, MENU_ART_DIR),
                "menu art folder",
            )?,
            amb_files: ambient_files(input),
            coach_video: coach_video(input, map_name),
        };
        info!(
            "Found {} ambient sound(s), coach video: {}",
            inventory.amb_files.len(),
            inventory.coach_video.is_some()
        );
        Ok(inventory)
    }
}

fn required(
    input: &Path,
    relative: &str,
    found: Option<PathBuf>,
    what: &'static str,
) -> Result<PathBuf> {
    found.ok_or_else(|| Error::MissingFile {
        what,
        path: input.join(relative),
    })
}

fn ambient_files(input: &Path) -> Vec<PathBuf> {
    let Some(dir) = find_dir(input, "Audio/AMB") else {
        return Vec::new();
    };
    let Ok(entries) = fs::read_dir(&dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("wav"))
        })
        .collect();
    files.sort();
    files
}

fn coach_video(input: &Path, map_name: &str) -> Option<PathBuf> {
    let dir = find_dir(input, "VideosCoach")?;
    let accepted = [
        format!("{}.hd.webm", map_name),
        format!("{}_ultra.hd.webm", map_name),
        format!("{}.webm", map_name),
    ];
    let found = accepted
        .iter()
        .find_map(|name| find_file(&dir, name));
    match &found {
        Some(path) => info!("Found the coach video: {}", path.display()),
        None => warn!("No video file was found in the VideosCoach folder"),
    }
    found
}
