use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::error::{InstallError, InstallResult};

/// Unpack `archive` into `dest`, overwriting existing files.
///
/// Entries whose names would land outside `dest` are skipped.
pub fn extract_archive(archive: &Path, dest: &Path) -> InstallResult<usize> {
    let file = fs::File::open(archive).map_err(|e| InstallError::io(archive, e))?;
    let mut zip = zip::ZipArchive::new(file)?;
    let mut written = 0;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let Some(relative) = entry.enclosed_name() else {
            warn!("Skipping unsafe archive entry {}", entry.name());
            continue;
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| InstallError::io(&out_path, e))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| InstallError::io(parent, e))?;
        }

        // Write inside a block so the handle is closed before the next entry.
        {
            let mut out = fs::File::create(&out_path).map_err(|e| InstallError::io(&out_path, e))?;
            std::io::copy(&mut entry, &mut out).map_err(|e| InstallError::io(&out_path, e))?;
        }
        written += 1;
    }

    debug!("Extracted {} files from {:?}", written, archive);
    Ok(written)
}

/// Owner-only (0700) permissions on `paths`, recursively. No-op off Unix.
pub fn restrict_permissions(paths: &[PathBuf]) -> InstallResult<()> {
    for root in paths.iter().filter(|p| p.exists()) {
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                InstallError::io(path, e.into())
            })?;
            if entry.path_is_symlink() {
                continue;
            }
            set_owner_only(entry.path())?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn set_owner_only(path: &Path) -> InstallResult<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o700))
        .map_err(|e| InstallError::io(path, e))
}

#[cfg(not(unix))]
fn set_owner_only(_path: &Path) -> InstallResult<()> {
    Ok(())
}
