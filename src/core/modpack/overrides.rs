use std::fs;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::error::{InstallError, InstallResult};

/// Copy everything under `src` onto `dest`.
///
/// Files in the override tree replace their counterparts; nothing else under
/// `dest` is touched. A missing `src` is not an error. Returns files copied.
pub fn merge_overrides(src: &Path, dest: &Path) -> InstallResult<usize> {
    if !src.is_dir() {
        debug!("No override directory at {:?}", src);
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
        let entry = entry.map_err(|e| InstallError::io(src, e.into()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| InstallError::UnsafePath(entry.path().display().to_string()))?;
        let target = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|e| InstallError::io(&target, e))?;
        } else if file_type.is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| InstallError::io(parent, e))?;
            }
            fs::copy(entry.path(), &target).map_err(|e| InstallError::io(&target, e))?;
            copied += 1;
        } else {
            warn!("Skipping override {:?}: not a regular file", entry.path());
        }
    }

    Ok(copied)
}
