use std::fs;
use std::path::{Path, PathBuf};

/// Resolve a `/`-separated relative path under `root`, matching each
/// component case-insensitively. Exact matches are preferred.
pub fn find_path(root: &Path, relative: &str) -> Option<PathBuf> {
    let mut current = root.to_path_buf();
    for part in relative.split('/').filter(|p| !p.is_empty()) {
        let exact = current.join(part);
        if exact.exists() {
            current = exact;
            continue;
        }
        let wanted = part.to_lowercase();
        let found = fs::read_dir(&current)
            .ok()?
            .filter_map(|e| e.ok())
            .find(|e| e.file_name().to_string_lossy().to_lowercase() == wanted)?;
        current = found.path();
    }
    Some(current)
}

pub fn find_file(root: &Path, relative: &str) -> Option<PathBuf> {
    find_path(root, relative).filter(|p| p.is_file())
}

pub fn find_dir(root: &Path, relative: &str) -> Option<PathBuf> {
    find_path(root, relative).filter(|p| p.is_dir())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_case_insensitive_components() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("Timeline")).unwrap();
        fs::write(dir.path().join("Timeline/Map_TML_Dance.dtape"), b"").unwrap();

        let found = find_file(dir.path(), "timeline/map_tml_dance.dtape").unwrap();
        assert_eq!(found, dir.path().join("Timeline/Map_TML_Dance.dtape"));
        assert!(find_dir(dir.path(), "TIMELINE").is_some());
        assert!(find_file(dir.path(), "timeline").is_none());
    }

    #[test]
    fn test_missing_path() {
        let dir = TempDir::new().unwrap();
        assert!(find_path(dir.path(), "audio/map.trk").is_none());
    }
}
