//! Explicit build request.

use crate::PackError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

/// Everything one archive build needs, validated once at the boundary.
///
/// `working_dir` and `source_dir` are supplied by the surrounding
/// pipeline: the application directory is `working_dir/source_dir`, and
/// `sources` and `ignore` are interpreted relative to it. The archive is
/// written to `<app dir>/<output_name>`.
///
/// # Examples
///
/// ```
/// use zipstage_core::PackRequest;
///
/// let request = PackRequest::new("webapp.zip")
///     .with_source_dir("app")
///     .with_sources(vec![".".to_string()])
///     .with_ignore(vec!["node_modules".to_string()])
///     .with_collapse_top_level_folder(true);
///
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct PackRequest {
    /// Directory the pipeline runs in. Defaults to `.`.
    pub working_dir: PathBuf,

    /// Application directory, relative to `working_dir` unless absolute.
    /// Defaults to `.`.
    pub source_dir: PathBuf,

    /// Files and directories to package, relative to the application
    /// directory.
    pub sources: Vec<String>,

    /// Paths to leave out, relative to whichever source is being walked.
    pub ignore: Vec<String>,

    /// File name of the archive, created inside the application
    /// directory.
    pub output_name: String,

    /// Replace an existing archive instead of failing.
    ///
    /// Default: `false`.
    pub overwrite_existing: bool,

    /// Put only the application directory's contents at the archive root.
    ///
    /// When `false` the directory's own name becomes the top-level folder
    /// of every entry.
    ///
    /// Default: `false`.
    pub collapse_top_level_folder: bool,
}

impl Default for PackRequest {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            source_dir: PathBuf::from("."),
            sources: Vec::new(),
            ignore: Vec::new(),
            output_name: String::new(),
            overwrite_existing: false,
            collapse_top_level_folder: false,
        }
    }
}

impl PackRequest {
    /// Creates a request writing to `output_name` with default settings.
    #[must_use]
    pub fn new<S: Into<String>>(output_name: S) -> Self {
        Self {
            output_name: output_name.into(),
            ..Self::default()
        }
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_working_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.working_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Sets the application directory.
    #[must_use]
    pub fn with_source_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.source_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Sets the sources to package.
    #[must_use]
    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    /// Sets the ignore rules.
    #[must_use]
    pub fn with_ignore(mut self, ignore: Vec<String>) -> Self {
        self.ignore = ignore;
        self
    }

    /// Sets whether an existing archive may be replaced.
    #[must_use]
    pub fn with_overwrite_existing(mut self, overwrite: bool) -> Self {
        self.overwrite_existing = overwrite;
        self
    }

    /// Sets whether the application directory's name is left out of entry
    /// names.
    #[must_use]
    pub fn with_collapse_top_level_folder(mut self, collapse: bool) -> Self {
        self.collapse_top_level_folder = collapse;
        self
    }

    /// Validates the request structure.
    ///
    /// # Errors
    ///
    /// Returns `PackError::InvalidConfig` if:
    /// - `sources` is empty
    /// - `output_name` is empty or is not a bare file name
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(PackError::InvalidConfig(
                "sources can't be empty, provide the path to at least one file or directory"
                    .to_string(),
            ));
        }

        if self.output_name.trim().is_empty() {
            return Err(PackError::InvalidConfig(
                "output_name can't be empty".to_string(),
            ));
        }

        let name = Path::new(&self.output_name);
        if name.file_name() != Some(name.as_os_str()) {
            return Err(PackError::InvalidConfig(format!(
                "output_name must be a file name, got '{}'",
                self.output_name
            )));
        }

        Ok(())
    }
}
