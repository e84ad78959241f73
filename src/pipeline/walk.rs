//! Candidate enumeration: one level of the dataset directory, filtered by extension.

use anyhow::{Context, Result, bail};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::engine::tools::is_candidate_name;

/// List candidate images directly under `dir` (no recursion), sorted by file name.
/// Paths are `dir` joined with the entry name. An unreadable `dir` is an error; unreadable entries are skipped.
pub fn enumerate_candidates(dir: &Path) -> Result<Vec<PathBuf>> {
    let meta = std::fs::metadata(dir)
        .with_context(|| format!("read dataset directory {}", dir.display()))?;
    if !meta.is_dir() {
        bail!("dataset path {} is not a directory", dir.display());
    }

    let mut candidates = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_dir() || !is_candidate_name(entry.path()) {
                    continue;
                }
                candidates.push(entry.into_path());
            }
            Err(err) if err.depth() == 0 => {
                return Err(err)
                    .with_context(|| format!("read dataset directory {}", dir.display()));
            }
            Err(err) => warn!("Skipping unreadable entry: {}", err),
        }
    }
    debug!("{} candidate images in {}", candidates.len(), dir.display());
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_lowercase_jpg_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.jpg", "a.jpg", "c.JPG", "d.jpeg", "e.png", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.jpg")).unwrap();
        std::fs::write(dir.path().join("nested.jpg").join("inner.jpg"), b"x").unwrap();

        let got = enumerate_candidates(dir.path()).unwrap();
        assert_eq!(got, vec![dir.path().join("a.jpg"), dir.path().join("b.jpg")]);
    }

    #[test]
    fn empty_directory_has_no_candidates() {
        let dir = tempfile::tempdir().unwrap();
        assert!(enumerate_candidates(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(enumerate_candidates(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn file_instead_of_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.jpg");
        std::fs::write(&file, b"x").unwrap();
        assert!(enumerate_candidates(&file).is_err());
    }
}
