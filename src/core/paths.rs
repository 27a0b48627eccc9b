use std::path::{Component, Path, PathBuf};

use crate::core::error::{InstallError, InstallResult};

/// Validate a path taken from remote metadata so it stays under the install root.
///
/// Rejects absolute paths, drive prefixes and `..` components.
pub fn relative_to_root(raw: &str) -> InstallResult<PathBuf> {
    let path = Path::new(raw);
    let mut clean = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(InstallError::UnsafePath(raw.to_string()));
            }
        }
    }

    if clean.as_os_str().is_empty() {
        return Err(InstallError::UnsafePath(raw.to_string()));
    }

    Ok(clean)
}

/// Like [`relative_to_root`], but only a bare file name is accepted.
pub fn file_name(raw: &str) -> InstallResult<PathBuf> {
    let path = relative_to_root(raw)?;
    if path.components().count() != 1 {
        return Err(InstallError::UnsafePath(raw.to_string()));
    }
    Ok(path)
}
