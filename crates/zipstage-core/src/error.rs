//! Error types for source expansion and archive construction.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackError`.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while packaging sources into an archive.
///
/// Every error is terminal for the current build: nothing is retried and
/// nothing is downgraded to a warning.
#[derive(Error, Debug)]
pub enum PackError {
    /// A source root does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing source root.
        path: PathBuf,
    },

    /// Directory traversal failed partway through a source root.
    #[error("cannot traverse {path}: {source}")]
    Traversal {
        /// The node that could not be read.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// A file does not lie under the base path used for entry names.
    #[error("{path} is not under base path {base}")]
    OutsideBasePath {
        /// The file that could not be made relative.
        path: PathBuf,
        /// The base path entry names are computed against.
        base: PathBuf,
    },

    /// An entry name is not valid UTF-8 and cannot be stored in a zip.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// I/O operation failed while reading a source or writing the archive.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip writer rejected an operation.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The output archive already exists and overwriting is disabled.
    #[error("output file already exists: {path}")]
    OutputExists {
        /// The existing output path.
        path: PathBuf,
    },

    /// The pack request failed structural validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PackError {
    /// Returns `true` if the error came from walking a source root.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use zipstage_core::PackError;
    ///
    /// let err = PackError::SourceNotFound {
    ///     path: PathBuf::from("missing"),
    /// };
    /// assert!(err.is_traversal_error());
    /// assert!(!err.is_path_error());
    /// ```
    #[must_use]
    pub const fn is_traversal_error(&self) -> bool {
        matches!(self, Self::SourceNotFound { .. } | Self::Traversal { .. })
    }

    /// Returns `true` if a path could not be turned into an entry name.
    #[must_use]
    pub const fn is_path_error(&self) -> bool {
        matches!(self, Self::OutsideBasePath { .. } | Self::NonUtf8Path { .. })
    }

    /// Returns `true` if the output path is already taken.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::OutputExists { .. })
    }

    /// Returns the filesystem path the error refers to, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use std::path::PathBuf;
    /// use zipstage_core::PackError;
    ///
    /// let err = PackError::OutputExists {
    ///     path: PathBuf::from("app.zip"),
    /// };
    /// assert_eq!(err.path(), Some(Path::new("app.zip")));
    ///
    /// let err = PackError::InvalidConfig("no sources".to_string());
    /// assert_eq!(err.path(), None);
    /// ```
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::SourceNotFound { path }
            | Self::Traversal { path, .. }
            | Self::OutsideBasePath { path, .. }
            | Self::NonUtf8Path { path }
            | Self::OutputExists { path } => Some(path),
            _ => None,
        }
    }
}
