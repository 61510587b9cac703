//! Lexical path helpers.
//!
//! Entry names and ignore lookups are computed without touching the
//! filesystem: paths are made absolute against the current directory and
//! cleaned of `.`, `..` and redundant separators, but symlinks are never
//! resolved.

use crate::PackError;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Lexically cleans a path.
///
/// Removes `.` components, collapses `name/..` pairs and drops `..` that
/// would climb above the root of an absolute path. Leading `..` of a
/// relative path are kept. An empty result becomes `.`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipstage_core::paths::clean;
///
/// assert_eq!(clean(Path::new("ignore/")), Path::new("ignore"));
/// assert_eq!(clean(Path::new("./a//b/../c")), Path::new("a/c"));
/// assert_eq!(clean(Path::new("/../etc")), Path::new("/etc"));
/// assert_eq!(clean(Path::new("../x")), Path::new("../x"));
/// assert_eq!(clean(Path::new("")), Path::new("."));
/// ```
#[must_use]
pub fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Makes a path absolute against the current directory and cleans it.
///
/// # Errors
///
/// Returns an I/O error if the current directory cannot be determined.
pub fn absolute_clean(path: &Path) -> Result<PathBuf> {
    Ok(clean(&std::path::absolute(path)?))
}

/// Computes `path` relative to `base`.
///
/// Both paths are made absolute and cleaned first, so `a/./b` and `a/b`
/// compare equal. Fails when `path` does not lie under `base`.
///
/// # Errors
///
/// Returns `PackError::OutsideBasePath` if `path` is not a descendant of
/// `base`, or an I/O error if the current directory is unavailable.
pub fn relative_to(path: &Path, base: &Path) -> Result<PathBuf> {
    let abs_path = absolute_clean(path)?;
    let abs_base = absolute_clean(base)?;

    abs_path
        .strip_prefix(&abs_base)
        .map(Path::to_path_buf)
        .map_err(|_| PackError::OutsideBasePath {
            path: abs_path.clone(),
            base: abs_base.clone(),
        })
}

/// Converts a relative path into a zip entry name.
///
/// Zip entry names always use `/` separators regardless of platform.
///
/// # Errors
///
/// Returns `PackError::NonUtf8Path` if a component is not valid UTF-8.
pub fn to_zip_name(path: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        let part = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| PackError::NonUtf8Path {
                path: path.to_path_buf(),
            })?;
        parts.push(part);
    }
    Ok(parts.join("/"))
}
