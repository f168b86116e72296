//! # Levels Module
//!
//! Where level text comes from and how it becomes a grid.
//!
//! Levels are plain text files (see [`loader`] for the character table). A
//! small pack ships inside the binary; any directory of `.l1t` files can be
//! played as well.

pub mod loader;

pub use loader::*;

use crate::config::LEVEL_FILE_EXTENSION;
use crate::L1tResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A level compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinLevel {
    pub name: &'static str,
    pub text: &'static str,
}

/// The bundled level pack, in play order.
pub const BUILTIN_LEVELS: [BuiltinLevel; 4] = [
    BuiltinLevel {
        name: "First Light",
        text: include_str!("../../levels/1.l1t"),
    },
    BuiltinLevel {
        name: "Angles",
        text: include_str!("../../levels/2.l1t"),
    },
    BuiltinLevel {
        name: "Flip the Switch",
        text: include_str!("../../levels/3.l1t"),
    },
    BuiltinLevel {
        name: "Crossfire",
        text: include_str!("../../levels/4.l1t"),
    },
];

/// Where a level's text comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelSource {
    /// A level file on disk
    File(PathBuf),
    /// Index into [`BUILTIN_LEVELS`]
    Builtin(usize),
}

impl LevelSource {
    /// Reads the raw level text.
    pub fn read_text(&self) -> Result<String, LoadError> {
        match self {
            LevelSource::File(path) => {
                fs::read_to_string(path).map_err(|source| LoadError::Unreadable {
                    path: path.clone(),
                    source,
                })
            }
            LevelSource::Builtin(index) => BUILTIN_LEVELS
                .get(*index)
                .map(|level| level.text.to_string())
                .ok_or(LoadError::UnknownBuiltin(*index)),
        }
    }

    /// Human-readable name: the built-in title or the file stem.
    pub fn name(&self) -> String {
        match self {
            LevelSource::File(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            LevelSource::Builtin(index) => BUILTIN_LEVELS
                .get(*index)
                .map(|level| level.name.to_string())
                .unwrap_or_else(|| format!("Level {}", index + 1)),
        }
    }
}

/// Identity of the level a session is playing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub name: String,
    pub source: LevelSource,
}

impl LevelInfo {
    pub fn from_source(source: LevelSource) -> Self {
        Self {
            name: source.name(),
            source,
        }
    }
}

/// Every bundled level, in order.
pub fn builtin_sources() -> Vec<LevelSource> {
    (0..BUILTIN_LEVELS.len()).map(LevelSource::Builtin).collect()
}

/// Lists the level files in `dir`.
///
/// Files are ordered by numeric stem first (`2.l1t` before `10.l1t`), then
/// by file name for anything non-numeric.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// let levels = l1t::levels::discover(Path::new("levels")).unwrap();
/// assert!(!levels.is_empty());
/// ```
pub fn discover(dir: &Path) -> L1tResult<Vec<LevelSource>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_level = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == LEVEL_FILE_EXTENSION);
        if is_level {
            paths.push(path);
        }
    }

    paths.sort_by_cached_key(|path| sort_key(path));
    log::debug!("Found {} levels in {}", paths.len(), dir.display());
    Ok(paths.into_iter().map(LevelSource::File).collect())
}

fn sort_key(path: &Path) -> (bool, u64, String) {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.parse::<u64>() {
        Ok(number) => (false, number, stem),
        Err(_) => (true, 0, stem),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_decode() {
        for (index, level) in BUILTIN_LEVELS.iter().enumerate() {
            let decoded = decode_level(level.text)
                .unwrap_or_else(|e| panic!("built-in level {} failed: {}", index, e));
            assert!(!decoded.markers.is_empty(), "{} has no markers", level.name);
        }
    }

    #[test]
    fn test_unknown_builtin() {
        let err = LevelSource::Builtin(99).read_text().unwrap_err();
        assert!(matches!(err, LoadError::UnknownBuiltin(99)));
    }

    #[test]
    fn test_source_names() {
        assert_eq!(LevelSource::Builtin(0).name(), "First Light");
        assert_eq!(
            LevelSource::File(PathBuf::from("/tmp/levels/7.l1t")).name(),
            "7"
        );
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let source = LevelSource::File(PathBuf::from("/definitely/not/here.l1t"));
        assert!(matches!(
            source.read_text().unwrap_err(),
            LoadError::Unreadable { .. }
        ));
    }
}
