//! Reading back a written archive.

use crate::Result;
use std::fs::File;
use std::path::Path;

/// One entry of an existing zip archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// Entry name as stored in the archive.
    pub name: String,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Compressed size in bytes.
    pub compressed_size: u64,
}

/// Lists the entries of a zip archive in stored order.
///
/// # Examples
///
/// ```no_run
/// use zipstage_core::list_archive;
///
/// for entry in list_archive("webapp.zip")? {
///     println!("{} ({} bytes)", entry.name, entry.size);
/// }
/// # Ok::<(), zipstage_core::PackError>(())
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a valid zip.
pub fn list_archive<P: AsRef<Path>>(archive_path: P) -> Result<Vec<ListedEntry>> {
    let file = File::open(archive_path.as_ref())?;
    let mut archive = zip::ZipArchive::new(file)?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        entries.push(ListedEntry {
            name: entry.name().to_string(),
            size: entry.size(),
            compressed_size: entry.compressed_size(),
        });
    }

    Ok(entries)
}
