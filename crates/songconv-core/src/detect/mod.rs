//! Map layout detection.
//!
//! Each layout has one or more sub-version checklists of glob patterns,
//! matched case-insensitively against paths relative to the map root. Only a
//! complete checklist gives a definite answer.

use std::path::Path;

use glob::{MatchOptions, Pattern};
use serde::Serialize;
use strum::{Display, EnumString};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Deepest folder level a checklist pattern looks at.
const MAX_SCAN_DEPTH: usize = 4;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    P4,
    Uaf,
    Now,
}

struct Checklist {
    name: &'static str,
    patterns: &'static [&'static str],
}

struct Layout {
    map_type: MapType,
    checklists: &'static [Checklist],
}

/// Layouts in tie-break priority order.
const LAYOUTS: &[Layout] = &[
    Layout {
        map_type: MapType::P4,
        checklists: &[
            Checklist {
                name: "timeline",
                patterns: &["SongDesc.tpl", "timeline/timeline.tpl", "Audio/*.trk"],
            },
            Checklist {
                name: "tapes",
                patterns: &[
                    "SongDesc.tpl",
                    "timeline/*.dtape",
                    "timeline/*.ktape",
                    "Audio/*.trk",
                ],
            },
        ],
    },
    Layout {
        map_type: MapType::Uaf,
        checklists: &[Checklist {
            name: "cooked",
            patterns: &[
                "songdesc.tpl.ckd",
                "timeline/*.dtape.ckd",
                "timeline/*.ktape.ckd",
                "audio/*_musictrack.tpl.ckd",
            ],
        }],
    },
    Layout {
        map_type: MapType::Now,
        checklists: &[Checklist {
            name: "web",
            patterns: &[
                "metadata.json",
                "songMetadata.zip",
                "assets/web/pictos-atlas.json",
                "assets/web/pictos-atlas.png",
                "assets/web/pictos-sprite.png",
                "assets/web/pictos-sprite.css",
            ],
        }],
    },
];

/// How well one layout matched, using its best sub-version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutScore {
    pub map_type: MapType,
    pub sub_version: &'static str,
    pub matched: usize,
    pub total: usize,
}

impl LayoutScore {
    /// Matched fraction in `0.0..=1.0`.
    pub fn score(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.matched == self.total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Detection {
    Definite { map_type: MapType },
    /// Something matched, but no checklist was complete.
    Ambiguous { best_guess: MapType, score: f64 },
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    pub detection: Detection,
    pub scores: Vec<LayoutScore>,
}

impl DetectionReport {
    /// The detected layout, or an error describing why there is none.
    pub fn map_type(&self) -> Result<MapType> {
        match &self.detection {
            Detection::Definite { map_type } => Ok(*map_type),
            Detection::Ambiguous { best_guess, score } => Err(Error::MapTypeNotDetected(format!(
                "best guess is {} at {:.0}%, but the structure is incomplete",
                best_guess,
                score * 100.0
            ))),
            Detection::NotFound => Err(Error::MapTypeNotDetected(
                "no known map structure found".to_string(),
            )),
        }
    }
}

/// Score every known layout against the files under `root`.
pub fn detect(root: &Path) -> Result<DetectionReport> {
    if !root.is_dir() {
        return Err(Error::MissingFile {
            what: "map folder",
            path: root.to_path_buf(),
        });
    }

    let entries = relative_entries(root);
    debug!("Scanned {} entries under {}", entries.len(), root.display());

    let scores: Vec<LayoutScore> = LAYOUTS
        .iter()
        .map(|layout| score_layout(layout, &entries))
        .collect();

    Ok(DetectionReport {
        detection: decide(&scores),
        scores,
    })
}

fn relative_entries(root: &Path) -> Vec<String> {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(MAX_SCAN_DEPTH)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(root).ok()?;
            let parts: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            Some(parts.join("/"))
        })
        .collect()
}

fn score_layout(layout: &Layout, entries: &[String]) -> LayoutScore {
    let mut best: Option<LayoutScore> = None;
    for checklist in layout.checklists {
        let matched = checklist
            .patterns
            .iter()
            .filter(|pattern| pattern_present(pattern, entries))
            .count();
        let candidate = LayoutScore {
            map_type: layout.map_type,
            sub_version: checklist.name,
            matched,
            total: checklist.patterns.len(),
        };
        debug!(
            "{} ({}): {}/{}",
            layout.map_type, checklist.name, candidate.matched, candidate.total
        );
        if best.as_ref().is_none_or(|b| candidate.score() > b.score()) {
            best = Some(candidate);
        }
    }
    best.unwrap_or(LayoutScore {
        map_type: layout.map_type,
        sub_version: "",
        matched: 0,
        total: 0,
    })
}

fn pattern_present(pattern: &str, entries: &[String]) -> bool {
    match Pattern::new(pattern) {
        Ok(compiled) => entries
            .iter()
            .any(|entry| compiled.matches_with(entry, MATCH_OPTIONS)),
        Err(_) => false,
    }
}

fn decide(scores: &[LayoutScore]) -> Detection {
    if let Some(complete) = scores.iter().find(|s| s.is_complete()) {
        return Detection::Definite {
            map_type: complete.map_type,
        };
    }

    let mut best: Option<&LayoutScore> = None;
    for score in scores.iter().filter(|s| s.matched > 0) {
        if best.is_none_or(|b| score.score() > b.score()) {
            best = Some(score);
        }
    }
    match best {
        Some(best) => Detection::Ambiguous {
            best_guess: best.map_type,
            score: best.score(),
        },
        None => Detection::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn tree(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"").unwrap();
        }
        dir
    }

    #[test]
    fn test_patterns_compile() {
        for layout in LAYOUTS {
            for checklist in layout.checklists {
                for pattern in checklist.patterns {
                    assert!(Pattern::new(pattern).is_ok(), "{}", pattern);
                }
            }
        }
    }

    #[test]
    fn test_complete_p4_tapes() {
        let dir = tree(&[
            "songdesc.tpl",
            "Timeline/map_TML_Dance.dtape",
            "Timeline/map_TML_Karaoke.ktape",
            "Audio/map.trk",
        ]);
        let report = detect(dir.path()).unwrap();
        assert_eq!(
            report.detection,
            Detection::Definite {
                map_type: MapType::P4
            }
        );
        assert_eq!(report.scores[0].sub_version, "tapes");
        assert_eq!(report.map_type().unwrap(), MapType::P4);
    }

    #[test]
    fn test_complete_beats_partial() {
        // all of NOW, 2 of the 4 UAF files
        let dir = tree(&[
            "metadata.json",
            "songMetadata.zip",
            "assets/web/pictos-atlas.json",
            "assets/web/pictos-atlas.png",
            "assets/web/pictos-sprite.png",
            "assets/web/pictos-sprite.css",
            "songdesc.tpl.ckd",
            "timeline/map_tml_dance.dtape.ckd",
        ]);
        let report = detect(dir.path()).unwrap();
        assert_eq!(
            report.detection,
            Detection::Definite {
                map_type: MapType::Now
            }
        );
    }

    #[test]
    fn test_partial_matches_are_ambiguous() {
        // 3 of 4 UAF files, 2 of 3 P4 timeline files
        let dir = tree(&[
            "SongDesc.tpl",
            "timeline/timeline.tpl",
            "songdesc.tpl.ckd",
            "timeline/a.dtape.ckd",
            "timeline/a.ktape.ckd",
        ]);
        let report = detect(dir.path()).unwrap();
        match &report.detection {
            Detection::Ambiguous { best_guess, score } => {
                assert_eq!(*best_guess, MapType::Uaf);
                assert_eq!(*score, 0.75);
            }
            other => panic!("unexpected detection {:?}", other),
        }
        assert!(matches!(
            report.map_type(),
            Err(Error::MapTypeNotDetected(_))
        ));
    }

    #[test]
    fn test_empty_folder_is_not_found() {
        let dir = tree(&["readme.txt"]);
        let report = detect(dir.path()).unwrap();
        assert_eq!(report.detection, Detection::NotFound);
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let result = detect(&dir.path().join("nope"));
        assert!(matches!(result, Err(Error::MissingFile { .. })));
    }

    #[test]
    fn test_map_type_names() {
        assert_eq!(MapType::Uaf.to_string(), "uaf");
        assert_eq!("P4".parse::<MapType>().unwrap(), MapType::P4);
    }
}
