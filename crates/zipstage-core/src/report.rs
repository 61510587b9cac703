//! Build reporting and progress callbacks.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// Result of a successful archive build.
///
/// Carries the location of the written archive together with statistics
/// about what went into it.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use zipstage_core::PackReport;
///
/// let mut report = PackReport::new(PathBuf::from("/srv/app/app.zip"));
/// report.files_added = 3;
/// assert_eq!(report.output_path.file_name().unwrap(), "app.zip");
/// assert!(!report.skipped_output());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackReport {
    /// Absolute path of the archive that was written.
    pub output_path: PathBuf,

    /// Number of file entries written to the archive.
    pub files_added: usize,

    /// Number of candidates skipped because they were the output archive.
    pub files_skipped: usize,

    /// Total uncompressed bytes copied into the archive.
    pub bytes_written: u64,

    /// Size of the finished archive on disk.
    pub archive_size: u64,

    /// In-archive names in the order they were written.
    pub entries: Vec<String>,

    /// Duration of the build.
    pub duration: Duration,
}

impl PackReport {
    /// Creates an empty report for the given output path.
    #[must_use]
    pub fn new(output_path: PathBuf) -> Self {
        Self {
            output_path,
            ..Self::default()
        }
    }

    /// Returns `true` if the output archive showed up among the inputs and
    /// was left out.
    #[must_use]
    pub fn skipped_output(&self) -> bool {
        self.files_skipped > 0
    }

    /// Returns the compression ratio (uncompressed / archive size).
    ///
    /// Returns 0.0 when either size is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use zipstage_core::PackReport;
    ///
    /// let mut report = PackReport::default();
    /// report.bytes_written = 1000;
    /// report.archive_size = 250;
    /// assert_eq!(report.compression_ratio(), 4.0);
    ///
    /// report.archive_size = 0;
    /// assert_eq!(report.compression_ratio(), 0.0);
    /// ```
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.archive_size == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.archive_size as f64
    }
}

/// Callback trait for progress reporting during an archive build.
///
/// The build step takes this capability instead of a host-specific UI,
/// so the core stays usable from any front end.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipstage_core::ProgressCallback;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("[{current}/{total}] {}", path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _path: &Path) {}
///
///     fn on_complete(&mut self) {
///         println!("archive written");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called before an entry is written.
    ///
    /// # Arguments
    ///
    /// * `path` - In-archive name of the entry
    /// * `total` - Number of entries that will be written
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called for each chunk copied into the archive.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called after an entry has been fully written.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called once the archive has been finished.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}
