use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::lenient;

/// `SongDesc.tpl`: an actor template whose components include the song descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SongDescFile {
    pub params: SongDescParams,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SongDescParams {
    #[serde(rename = "Actor_Template")]
    pub actor_template: SongDescActor,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SongDescActor {
    #[serde(rename = "COMPONENTS", deserialize_with = "lenient::seq")]
    pub components: Vec<SongDescComponent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SongDescComponent {
    #[serde(rename = "JD_SongDescTemplate")]
    pub song_desc: Option<SongDescTemplate>,
}

impl SongDescFile {
    /// The first component carrying a song descriptor.
    pub fn template(&self) -> Option<&SongDescTemplate> {
        self.params
            .actor_template
            .components
            .iter()
            .find_map(|c| c.song_desc.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SongDescTemplate {
    #[serde(deserialize_with = "lenient::text")]
    pub map_name: Option<String>,
    #[serde(rename = "JDVersion", deserialize_with = "lenient::integer")]
    pub jd_version: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub artist: Option<String>,
    #[serde(deserialize_with = "lenient::raw")]
    pub difficulty: Option<JsonValue>,
    #[serde(deserialize_with = "lenient::raw")]
    pub sweat_difficulty: Option<JsonValue>,
    #[serde(deserialize_with = "lenient::raw")]
    pub num_coach: Option<JsonValue>,
    #[serde(deserialize_with = "lenient::raw")]
    pub status: Option<JsonValue>,
    #[serde(deserialize_with = "lenient::raw")]
    pub mode: Option<JsonValue>,
    #[serde(deserialize_with = "lenient::raw")]
    pub background_type: Option<JsonValue>,
    #[serde(deserialize_with = "lenient::raw")]
    pub lyrics_type: Option<JsonValue>,
    #[serde(rename = "LocaleID", deserialize_with = "lenient::integer")]
    pub locale_id: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub mojo_value: Option<i64>,
    #[serde(deserialize_with = "lenient::seq")]
    pub game_modes: Vec<GameModeEntry>,
    #[serde(deserialize_with = "lenient::seq")]
    pub audio_previews: Vec<AudioPreviewEntry>,
}

impl SongDescTemplate {
    /// Descriptor of the first game mode, where flags/status/mode live in older maps.
    pub fn first_game_mode(&self) -> Option<&GameModeDesc> {
        self.game_modes.first()?.game_mode_desc.as_ref()
    }

    /// Audio preview with the given name.
    pub fn audio_preview(&self, name: &str) -> Option<&AudioPreview> {
        self.audio_previews
            .iter()
            .filter_map(|entry| entry.audio_preview.as_ref())
            .find(|preview| preview.name.as_deref() == Some(name))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameModeEntry {
    #[serde(rename = "GameModeDesc")]
    pub game_mode_desc: Option<GameModeDesc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameModeDesc {
    #[serde(deserialize_with = "lenient::raw")]
    pub mode: Option<JsonValue>,
    #[serde(deserialize_with = "lenient::raw")]
    pub flags: Option<JsonValue>,
    #[serde(deserialize_with = "lenient::raw")]
    pub status: Option<JsonValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AudioPreviewEntry {
    #[serde(rename = "AudioPreview")]
    pub audio_preview: Option<AudioPreview>,
}

/// Named preview window, in beats.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AudioPreview {
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub startbeat: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub endbeat: Option<f64>,
}
