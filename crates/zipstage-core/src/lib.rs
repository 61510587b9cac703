//! Source expansion and zip archive construction for deployment builds.
//!
//! `zipstage-core` walks one or more source roots, drops paths named in an
//! ignore list and writes the remaining files into a zip archive whose
//! entry names are computed against a chosen base path. The base path is
//! the single knob deciding whether the source directory's own name
//! appears as a top-level folder in the archive.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use zipstage_core::build_archive;
//! use zipstage_core::expand_source;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let files = expand_source("/srv/app", &["node_modules", "src/docs/README.md"])?;
//!
//! // Entries named "app/...": keep the top-level folder.
//! let report = build_archive(&files, Path::new("/srv"), Path::new("/srv/app/app.zip"))?;
//! println!("Archived {} files", report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod error;
pub mod expand;
pub mod ignore;
pub mod inspect;
pub mod pack;
pub mod paths;
pub mod report;
pub mod request;

pub use archive::build_archive;
pub use archive::build_archive_with_progress;
pub use error::PackError;
pub use error::Result;
pub use expand::expand_source;
pub use expand::expand_sources;
pub use ignore::IgnoreSet;
pub use inspect::ListedEntry;
pub use inspect::list_archive;
pub use pack::Layout;
pub use pack::pack;
pub use report::NoopProgress;
pub use report::PackReport;
pub use report::ProgressCallback;
pub use request::PackRequest;
