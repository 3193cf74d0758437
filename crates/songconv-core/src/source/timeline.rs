use serde::Deserialize;

use super::lenient;

/// `timeline/timeline.tpl`: the combined dance + karaoke authoring timeline.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimelineFile {
    pub params: TimelineParams,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimelineParams {
    #[serde(rename = "Actor_Template")]
    pub actor_template: TimelineActor,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimelineActor {
    #[serde(rename = "COMPONENTS", deserialize_with = "lenient::seq")]
    pub components: Vec<TimelineComponent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimelineComponent {
    #[serde(rename = "JD_Timeline_Template")]
    pub timeline: Option<TimelineTemplate>,
}

impl TimelineFile {
    pub fn template(&self) -> Option<&TimelineTemplate> {
        self.params
            .actor_template
            .components
            .iter()
            .find_map(|c| c.timeline.as_ref())
    }
}

/// Timeline collections. Missing collections are empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimelineTemplate {
    #[serde(deserialize_with = "lenient::seq")]
    pub moves: Vec<MoveEntry>,
    #[serde(rename = "movesKinect", deserialize_with = "lenient::seq")]
    pub moves_kinect: Vec<MoveEntry>,
    #[serde(deserialize_with = "lenient::seq")]
    pub pictos: Vec<PictoEntry>,
    #[serde(deserialize_with = "lenient::seq")]
    pub lyrics: Vec<LyricEntry>,
    #[serde(rename = "Block", deserialize_with = "lenient::seq")]
    pub blocks: Vec<BlockEntry>,
    #[serde(deserialize_with = "lenient::seq")]
    pub layers: Vec<LayerEntry>,
}

impl TimelineTemplate {
    /// Moves from both the regular and Kinect lists, in that order.
    pub fn all_moves(&self) -> impl Iterator<Item = &MoveClip> {
        self.moves
            .iter()
            .chain(&self.moves_kinect)
            .filter_map(|m| m.move_clip.as_ref())
    }

    pub fn picto_clips(&self) -> impl Iterator<Item = &PictoClip> {
        self.pictos.iter().filter_map(|p| p.picto_clip.as_ref())
    }

    pub fn lyric_clips(&self) -> impl Iterator<Item = &LyricClip> {
        self.lyrics.iter().filter_map(|l| l.lyric_clip.as_ref())
    }

    pub fn timeline_blocks(&self) -> impl Iterator<Item = &TimelineBlock> {
        self.blocks.iter().filter_map(|b| b.timeline_block.as_ref())
    }

    pub fn timeline_layers(&self) -> impl Iterator<Item = &TimelineLayer> {
        self.layers.iter().filter_map(|l| l.timeline_layer.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MoveEntry {
    #[serde(rename = "MoveClip")]
    pub move_clip: Option<MoveClip>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoveClip {
    #[serde(rename = "layerID", deserialize_with = "lenient::integer")]
    pub layer_id: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub classifier_path: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub start_position: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub stop_position: Option<f64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub gold_move: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PictoEntry {
    #[serde(rename = "PictoClip")]
    pub picto_clip: Option<PictoClip>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PictoClip {
    #[serde(deserialize_with = "lenient::number")]
    pub position: Option<f64>,
    #[serde(rename = "layerID", deserialize_with = "lenient::integer")]
    pub layer_id: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub texture_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LyricEntry {
    #[serde(rename = "LyricClip")]
    pub lyric_clip: Option<LyricClip>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LyricClip {
    #[serde(deserialize_with = "lenient::text")]
    pub text: Option<String>,
    #[serde(rename = "layerID", deserialize_with = "lenient::integer")]
    pub layer_id: Option<i64>,
    #[serde(deserialize_with = "lenient::number")]
    pub start_position: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub stop_position: Option<f64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub is_line_ending: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlockEntry {
    #[serde(rename = "TimelineBlock")]
    pub timeline_block: Option<TimelineBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimelineBlock {
    #[serde(deserialize_with = "lenient::number")]
    pub start_position: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub stop_position: Option<f64>,
    #[serde(rename = "layerID", deserialize_with = "lenient::integer")]
    pub layer_id: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub model_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LayerEntry {
    #[serde(rename = "TimelineLayer")]
    pub timeline_layer: Option<TimelineLayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimelineLayer {
    #[serde(deserialize_with = "lenient::integer")]
    pub layer_type: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub layer_name: Option<String>,
    #[serde(rename = "layerID", deserialize_with = "lenient::integer")]
    pub layer_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_collections_default_to_empty() {
        let file: TimelineFile = serde_json::from_value(json!({
            "params": { "Actor_Template": { "COMPONENTS": [
                { "JD_Timeline_Template": { "moves": {}, "pictos": [] } }
            ] } }
        }))
        .unwrap();
        let template = file.template().unwrap();
        assert_eq!(template.all_moves().count(), 0);
        assert_eq!(template.picto_clips().count(), 0);
        assert_eq!(template.lyric_clips().count(), 0);
        assert_eq!(template.timeline_blocks().count(), 0);
    }

    #[test]
    fn test_moves_and_kinect_moves_are_merged() {
        let template: TimelineTemplate = serde_json::from_value(json!({
            "moves": [{ "MoveClip": { "classifierPath": "a.msm", "layerID": 0, "startPosition": 1, "stopPosition": 2 } }],
            "movesKinect": [{ "MoveClip": { "classifierPath": "b.gesture", "layerID": 1, "startPosition": 3.5, "stopPosition": 4 } }],
            "layers": [{ "TimelineLayer": { "layerType": 12, "layerID": 9 } }]
        }))
        .unwrap();
        let paths: Vec<_> = template
            .all_moves()
            .filter_map(|m| m.classifier_path.as_deref())
            .collect();
        assert_eq!(paths, vec!["a.msm", "b.gesture"]);
        assert_eq!(template.timeline_layers().next().unwrap().layer_id, Some(9));
    }
}
