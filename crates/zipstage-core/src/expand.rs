//! Source expansion.
//!
//! Turns a source root and an ignore list into the flat, ordered list of
//! absolute file paths to archive.

use crate::IgnoreSet;
use crate::PackError;
use crate::Result;
use crate::paths;
use std::path::Path;
use std::path::PathBuf;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// Returns every file under `root` that is not excluded by `ignore`.
///
/// The walk is depth-first and pre-order with siblings sorted by file
/// name. Ignore rules are matched against each node's path relative to
/// `root`: an ignored directory prunes its whole subtree, an ignored file
/// is skipped. Directories are never emitted. If `root` is a file it is
/// returned on its own without consulting the ignore list.
///
/// Symlinks are not followed. A symlink resolving to a regular file is
/// emitted like a file; any other symlink is skipped.
///
/// # Examples
///
/// ```no_run
/// use zipstage_core::expand_source;
///
/// let files = expand_source("app", &["node_modules", "src/docs/README.md"])?;
/// for file in &files {
///     println!("{}", file.display());
/// }
/// # Ok::<(), zipstage_core::PackError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - `root` does not exist
/// - A directory or entry under `root` cannot be read
pub fn expand_source<P: AsRef<Path>, S: AsRef<str>>(root: P, ignore: &[S]) -> Result<Vec<PathBuf>> {
    let ignore = IgnoreSet::new(ignore);
    expand_with(root.as_ref(), &ignore)
}

/// Expands several roots and concatenates the results in root order.
///
/// No deduplication is done: a file reachable from two roots appears
/// twice.
///
/// # Errors
///
/// Fails on the first root that cannot be expanded; no partial list is
/// returned.
pub fn expand_sources<P: AsRef<Path>, S: AsRef<str>>(
    roots: &[P],
    ignore: &[S],
) -> Result<Vec<PathBuf>> {
    let ignore = IgnoreSet::new(ignore);
    let mut files = Vec::new();

    for root in roots {
        files.extend(expand_with(root.as_ref(), &ignore)?);
    }

    Ok(files)
}

fn expand_with(root: &Path, ignore: &IgnoreSet) -> Result<Vec<PathBuf>> {
    let root = paths::absolute_clean(root)?;

    if std::fs::symlink_metadata(&root).is_err() {
        return Err(PackError::SourceNotFound { path: root });
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_ignored(entry, &root, ignore));

    for entry in walker {
        let entry = entry.map_err(|e| traversal_error(e, &root))?;
        let file_type = entry.file_type();

        if file_type.is_dir() {
            continue;
        }

        if file_type.is_symlink() && !entry.path().is_file() {
            tracing::debug!(path = %entry.path().display(), "skipping symlink without a file target");
            continue;
        }

        files.push(entry.into_path());
    }

    tracing::debug!(
        root = %root.display(),
        files = files.len(),
        rules = ignore.len(),
        "expanded source"
    );

    Ok(files)
}

/// The root itself is never matched against the ignore set.
fn is_ignored(entry: &DirEntry, root: &Path, ignore: &IgnoreSet) -> bool {
    if entry.depth() == 0 {
        return false;
    }

    let Ok(relative) = entry.path().strip_prefix(root) else {
        return false;
    };

    let ignored = ignore.is_ignored(relative);
    if ignored {
        tracing::debug!(path = %relative.display(), "ignored");
    }
    ignored
}

fn traversal_error(err: walkdir::Error, root: &Path) -> PackError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source = err.into_io_error().unwrap_or_else(|| {
        std::io::Error::other(format!("filesystem loop detected under {}", root.display()))
    });
    PackError::Traversal { path, source }
}
