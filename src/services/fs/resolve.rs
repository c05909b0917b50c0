use crate::core::errors::{Error, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const PARENT_DIR: &str = "..";

/// Resolves a `cd` target against `current`.
///
/// The target is tried joined onto `current` first, then on its own
/// (relative to the process working directory). Each candidate is made
/// absolute and normalized before it is checked, so the directory that is
/// checked is the one that comes back.
pub fn resolve_target(current: &Path, target: &str) -> Result<PathBuf> {
    let relative = if target == PARENT_DIR {
        match current.parent() {
            Some(parent) => Some(parent.to_path_buf()),
            None => return Err(Error::PathNotFound(target.to_string())),
        }
    } else if is_joinable(target) {
        Some(current.join(target))
    } else {
        None
    };

    let standalone = PathBuf::from(target);
    let mut found_non_dir = false;

    for candidate in relative.into_iter().chain(std::iter::once(standalone)) {
        let Ok(absolute) = std::path::absolute(&candidate) else {
            continue;
        };
        let resolved = normalize(&absolute);
        match fs::metadata(&resolved) {
            Ok(md) if md.is_dir() => {
                tracing::debug!(input = target, resolved = %resolved.display(), "resolved cd target");
                return Ok(resolved);
            }
            Ok(_) => found_non_dir = true,
            Err(_) => {}
        }
    }

    if found_non_dir {
        Err(Error::NotADirectory(target.to_string()))
    } else {
        Err(Error::PathNotFound(target.to_string()))
    }
}

/// A NUL byte can never be part of a joined path on any host.
fn is_joinable(target: &str) -> bool {
    !target.contains('\0')
}

/// Folds `.` and `..` components without touching the file system.
/// `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
