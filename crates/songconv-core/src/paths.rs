//! Rewriting of source asset paths into engine resource paths.

use strum::{EnumString, IntoStaticStr};
use tracing::warn;

/// Asset folders an engine path can point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum AssetKind {
    Move,
    Picto,
    Audio,
}

impl AssetKind {
    fn folder(self) -> &'static str {
        match self {
            AssetKind::Move => "timeline/moves",
            AssetKind::Picto => "timeline/pictos",
            AssetKind::Audio => "audio",
        }
    }
}

const TEXTURE_EXTENSION: &str = ".tga";
const IMAGE_EXTENSION: &str = ".png";
const TEMPLATE_EXTENSION: &str = ".tpl";
const AUDIO_EXTENSION: &str = ".wav";
const SOUND_SET_PREFIX: &str = "set_";

/// Last path component; both separators are accepted.
fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// `res://maps/{map}/{folder}/{file}`, lower-cased.
pub fn fix_engine_path(map_name: &str, path: &str, kind: AssetKind) -> String {
    let mut name = file_name(path).to_lowercase();
    if kind == AssetKind::Picto
        && let Some(stem) = name.strip_suffix(TEXTURE_EXTENSION)
    {
        name = format!("{}{}", stem, IMAGE_EXTENSION);
    }
    format!("res://maps/{}/{}/{}", map_name, kind.folder(), name).to_lowercase()
}

/// Like [`fix_engine_path`] with the kind given by name. Unknown kinds leave the path as is.
pub fn fix_engine_path_named(map_name: &str, path: &str, kind: &str) -> String {
    match kind.parse::<AssetKind>() {
        Ok(kind) => fix_engine_path(map_name, path, kind),
        Err(_) => {
            warn!("Unknown asset type \"{}\", not fixing path", kind);
            path.to_string()
        }
    }
}

/// Point a sound-set template at its audio file: `.../set_foo.tpl` becomes `.../foo.wav`.
pub fn fix_sound_set_path(path: &str) -> String {
    let name = file_name(path);
    let dir = &path[..path.len() - name.len()];

    let name = name.strip_prefix(SOUND_SET_PREFIX).unwrap_or(name);
    let name = match name.strip_suffix(TEMPLATE_EXTENSION) {
        Some(stem) => format!("{}{}", stem, AUDIO_EXTENSION),
        None => name.to_string(),
    };
    format!("{}{}", dir, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_path() {
        assert_eq!(
            fix_engine_path(
                "Rasputin",
                "world/maps/rasputin/timeline/moves/Rasputin_Intro.gesture",
                AssetKind::Move
            ),
            "res://maps/rasputin/timeline/moves/rasputin_intro.gesture"
        );
    }

    #[test]
    fn test_picto_path_swaps_extension() {
        assert_eq!(
            fix_engine_path("Map", "world\\maps\\map\\Pictos\\Clap.TGA", AssetKind::Picto),
            "res://maps/map/timeline/pictos/clap.png"
        );
    }

    #[test]
    fn test_audio_path() {
        assert_eq!(
            fix_engine_path("Map", "Audio/AMB/amb_intro.wav", AssetKind::Audio),
            "res://maps/map/audio/amb_intro.wav"
        );
    }

    #[test]
    fn test_unknown_kind_passes_through() {
        assert_eq!(
            fix_engine_path_named("Map", "Some/Path.bin", "video"),
            "Some/Path.bin"
        );
        assert_eq!(
            fix_engine_path_named("Map", "a/b.msm", "move"),
            "res://maps/map/timeline/moves/b.msm"
        );
    }

    #[test]
    fn test_sound_set_path() {
        assert_eq!(
            fix_sound_set_path("world/maps/map/audio/amb/set_amb_map_intro.tpl"),
            "world/maps/map/audio/amb/amb_map_intro.wav"
        );
        assert_eq!(fix_sound_set_path("amb_outro.wav"), "amb_outro.wav");
    }
}
