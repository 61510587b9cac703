//! Build step: resolve a request, expand its sources and write the archive.

use crate::PackError;
use crate::PackReport;
use crate::PackRequest;
use crate::ProgressCallback;
use crate::Result;
use crate::archive::build_archive_with_progress;
use crate::expand::expand_sources;
use crate::paths;
use std::path::Path;
use std::path::PathBuf;

/// Runs one archive build for `request`.
///
/// Resolves the application directory as `working_dir/source_dir`,
/// refuses to replace an existing archive unless `overwrite_existing` is
/// set, expands every source with the shared ignore list and writes the
/// archive into the application directory.
///
/// Entry names are relative to the application directory when
/// `collapse_top_level_folder` is set, and relative to its parent
/// otherwise.
///
/// # Examples
///
/// ```no_run
/// use zipstage_core::NoopProgress;
/// use zipstage_core::PackRequest;
/// use zipstage_core::pack;
///
/// let request = PackRequest::new("webapp.zip")
///     .with_source_dir("app")
///     .with_sources(vec![".".to_string()])
///     .with_ignore(vec!["node_modules".to_string()]);
///
/// let report = pack(&request, &mut NoopProgress)?;
/// println!("archive saved to {}", report.output_path.display());
/// # Ok::<(), zipstage_core::PackError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The request fails validation
/// - The output exists and overwriting is disabled
/// - A source cannot be expanded
/// - The archive cannot be written
pub fn pack(request: &PackRequest, progress: &mut dyn ProgressCallback) -> Result<PackReport> {
    request.validate()?;

    let layout = Layout::resolve(request)?;

    tracing::debug!(
        app_dir = %layout.app_dir.display(),
        output = %layout.output_path.display(),
        sources = request.sources.len(),
        ignore = request.ignore.len(),
        "creating a new archive"
    );

    if !request.overwrite_existing && layout.output_path.exists() {
        return Err(PackError::OutputExists {
            path: layout.output_path,
        });
    }

    let roots: Vec<PathBuf> = request
        .sources
        .iter()
        .map(|source| layout.app_dir.join(source))
        .collect();
    let files = expand_sources(&roots, &request.ignore)?;

    build_archive_with_progress(&files, &layout.base_path, &layout.output_path, progress)
}

/// Absolute paths derived from a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// The application directory sources are resolved against.
    pub app_dir: PathBuf,
    /// Where the archive is written.
    pub output_path: PathBuf,
    /// The path entry names are made relative to.
    pub base_path: PathBuf,
}

impl Layout {
    /// Computes the layout for `request` without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the current directory is unavailable.
    pub fn resolve(request: &PackRequest) -> Result<Self> {
        let app_dir = paths::absolute_clean(&request.working_dir.join(&request.source_dir))?;
        let output_path = app_dir.join(&request.output_name);
        let base_path = if request.collapse_top_level_folder {
            app_dir.clone()
        } else {
            app_dir.parent().map_or_else(|| app_dir.clone(), Path::to_path_buf)
        };

        Ok(Self {
            app_dir,
            output_path,
            base_path,
        })
    }
}
