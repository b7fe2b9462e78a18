use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SweepError};

/// Recursively collect every directory under `root` that directly contains a
/// file named `descriptor`.
///
/// Any unreadable entry aborts the whole walk. The returned list is in
/// walk order (sorted by file name at every level).
pub fn find_module_roots(root: &Path, descriptor: &str) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|source| SweepError::Traversal {
            path: source.path().unwrap_or(root).to_path_buf(),
            source,
        })?;

        if entry.file_type().is_file() && entry.file_name() == descriptor {
            if let Some(parent) = entry.path().parent() {
                dirs.push(parent.to_path_buf());
            }
        }
    }

    log::debug!("found {} module roots under {}", dirs.len(), root.display());
    Ok(dirs)
}

/// Like [`find_module_roots`] but treats an empty result as an error.
pub fn require_module_roots(root: &Path, descriptor: &str) -> Result<Vec<PathBuf>> {
    let dirs = find_module_roots(root, descriptor)?;
    if dirs.is_empty() {
        return Err(SweepError::NoModulesFound {
            root: root.to_path_buf(),
            descriptor: descriptor.to_string(),
        });
    }
    Ok(dirs)
}
