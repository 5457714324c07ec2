// src/watch/scan.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::errors::{LivebuildError, Result};

/// A tracked file: its path and the modification time last observed for it.
///
/// One snapshot is owned by exactly one change detector for its entire
/// lifetime; the detector rebases `last_modified` each time it observes a
/// new timestamp. No other component reads or writes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSnapshot {
    pub path: PathBuf,
    pub last_modified: SystemTime,
}

/// Extension filter compiled to a glob set.
#[derive(Debug, Clone)]
pub struct SourceFilter {
    set: GlobSet,
}

impl SourceFilter {
    /// Build a filter matching files with any of the given extensions
    /// (without the leading dot).
    pub fn from_extensions<I, S>(extensions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        for ext in extensions {
            builder.add(Glob::new(&format!("*.{}", ext.as_ref()))?);
        }
        Ok(Self {
            set: builder.build()?,
        })
    }

    /// Whether a path's file name matches the filter.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| self.set.is_match(Path::new(name)))
            .unwrap_or(false)
    }
}

/// Recursively enumerate all files under `root` matching `filter`, recording
/// each file's current modification time.
///
/// Fails if any directory cannot be read. Results are sorted by path so the
/// returned sequence is deterministic.
pub fn scan_source_files(
    root: impl AsRef<Path>,
    filter: &SourceFilter,
) -> Result<Vec<FileSnapshot>> {
    let root = root.as_ref();

    let mut found = Vec::new();
    walk_dir(root, filter, &mut found)?;
    found.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(root = ?root, files = found.len(), "scanned source tree");
    Ok(found)
}

fn walk_dir(dir: &Path, filter: &SourceFilter, found: &mut Vec<FileSnapshot>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|source| LivebuildError::Scan {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| LivebuildError::Scan {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|source| LivebuildError::Scan {
            path: path.clone(),
            source,
        })?;

        if file_type.is_dir() {
            walk_dir(&path, filter, found)?;
        } else if filter.matches(&path) {
            let last_modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .map_err(|source| LivebuildError::Scan {
                    path: path.clone(),
                    source,
                })?;
            found.push(FileSnapshot {
                path,
                last_modified,
            });
        }
    }

    Ok(())
}
